//! In-memory font model used by the merger.
//!
//! A [`Font`] is loaded from any sfnt with TrueType or CFF outlines. Glyph
//! outlines are drawn with skrifa into quadratic paths so they can be
//! measured, transformed and copied between fonts. On output the tables that
//! depend on the glyph set are rebuilt and every other table is copied as-is.

mod cff;
mod generate;
mod glyph;
mod pen;

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};

use fontmerger_font_ops::{NameEntry, find_name, read_name_entries, set_name};
use kurbo::BezPath;
use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::Glyph as ReadGlyph,
    types::{GlyphId, GlyphId16},
};
use skrifa::{
    MetadataProvider,
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlineGlyphCollection},
};
use write_fonts::{from_obj::ToOwnedTable, tables::glyf::Glyph as GlyfGlyph};

pub use cff::is_cid_keyed;
pub use glyph::{BoundingBox, Glyph};
pub use pen::{CUBIC_TO_QUAD_ACCURACY, QuadPathPen};

use crate::{
    MergeError, Result,
    glyph_name::{GlyphName, NameRegistry},
    types::{Codepoint, GlyphIndex},
};
use glyph::SourceGlyph;

pub const NAME_ID_COPYRIGHT: u16 = 0;
pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_SUBFAMILY: u16 = 2;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_POSTSCRIPT_NAME: u16 = 6;
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;
pub const NAME_ID_COMPATIBLE_FULL: u16 = 18;

/// Font-wide metrics used for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// `hhea` ascender
    pub ascent: i16,
    /// `hhea` descender, usually negative
    pub descent: i16,
}

impl FontMetrics {
    /// `ascent + |descent|`
    pub fn height(&self) -> i32 {
        self.ascent as i32 + (self.descent as i32).abs()
    }
}

/// An editable font.
#[derive(Debug, Clone)]
pub struct Font {
    data: Vec<u8>,
    metrics: FontMetrics,
    glyphs: Vec<Glyph>,
    encoding: BTreeMap<Codepoint, GlyphIndex>,
    names: Vec<NameEntry>,
    registry: NameRegistry,
    components: HashSet<GlyphIndex>,
    has_vertical_metrics: bool,
    cff_outlines: bool,
}

impl Font {
    /// Open a font for reading glyphs from.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::read(path)
            .map_err(MergeError::from)
            .and_then(Self::from_bytes)
            .map_err(MergeError::opening(path))
    }

    /// Open a font that will receive glyphs.
    ///
    /// CID-keyed CFF fonts and variable fonts are rejected before any glyph
    /// is loaded.
    pub fn open_base(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::read(path)
            .map_err(MergeError::from)
            .and_then(Self::base_from_bytes)
            .map_err(MergeError::opening(path))
    }

    pub fn base_from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontRef::new(&data)?;
        if is_cid_keyed(&font) {
            return Err(MergeError::CidKeyedCffNotSupported);
        }
        if font.fvar().is_ok() {
            return Err(MergeError::VariableFontNotSupported);
        }
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let loaded = LoadedFont::read(&data)?;

        debug!(
            "loaded font with {} glyphs, {} encoded code points, {} units per em",
            loaded.glyphs.len(),
            loaded.encoding.len(),
            loaded.metrics.units_per_em
        );

        Ok(Self {
            data,
            metrics: loaded.metrics,
            glyphs: loaded.glyphs,
            encoding: loaded.encoding,
            names: loaded.names,
            registry: loaded.registry,
            components: loaded.components,
            has_vertical_metrics: loaded.has_vertical_metrics,
            cff_outlines: loaded.cff_outlines,
        })
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub fn units_per_em(&self) -> u16 {
        self.metrics.units_per_em
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn num_encoded(&self) -> usize {
        self.encoding.len()
    }

    pub fn has_vertical_metrics(&self) -> bool {
        self.has_vertical_metrics
    }

    pub fn has_cff_outlines(&self) -> bool {
        self.cff_outlines
    }

    pub fn glyph_index(&self, cp: Codepoint) -> Option<GlyphIndex> {
        self.encoding.get(&cp).copied()
    }

    /// The glyph encoded at `cp`.
    pub fn glyph(&self, cp: Codepoint) -> Option<&Glyph> {
        self.glyph_index(cp).and_then(|idx| self.glyphs.get(idx.as_usize()))
    }

    pub fn glyph_mut(&mut self, cp: Codepoint) -> Option<&mut Glyph> {
        let idx = self.glyph_index(cp)?;
        self.glyph_at_mut(idx)
    }

    pub fn glyph_at(&self, idx: GlyphIndex) -> Option<&Glyph> {
        self.glyphs.get(idx.as_usize())
    }

    pub fn glyph_at_mut(&mut self, idx: GlyphIndex) -> Option<&mut Glyph> {
        self.glyphs.get_mut(idx.as_usize())
    }

    /// Encoded glyphs in ascending code point order.
    pub fn encoded_glyphs(&self) -> impl Iterator<Item = (Codepoint, &Glyph)> {
        self.encoding
            .iter()
            .filter_map(|(&cp, idx)| self.glyphs.get(idx.as_usize()).map(|g| (cp, g)))
    }

    /// Copy `source` into this font at `cp`, keeping its name where possible.
    ///
    /// The glyph currently encoded at `cp` is replaced in place unless other
    /// code points or composite glyphs still refer to it, or it is `.notdef`;
    /// in those cases a new glyph is appended and only `cp` is re-pointed.
    pub fn paste(&mut self, cp: Codepoint, source: &Glyph) -> GlyphIndex {
        match self.glyph_index(cp) {
            Some(idx) if !self.is_shared(idx, cp) => {
                let slot = idx.as_usize();
                self.registry.release(self.glyphs[slot].name());
                let name = self.registry.claim(source.name().clone());
                self.glyphs[slot] = source.detached(name);
                idx
            }
            _ => {
                let name = self.registry.claim(source.name().clone());
                let idx = GlyphIndex::new(self.glyphs.len());
                self.glyphs.push(source.detached(name));
                self.encoding.insert(cp, idx);
                idx
            }
        }
    }

    fn is_shared(&self, idx: GlyphIndex, cp: Codepoint) -> bool {
        idx.as_usize() == 0
            || self.components.contains(&idx)
            || self.encoding.iter().any(|(&other, &i)| i == idx && other != cp)
    }

    pub fn names(&self) -> &[NameEntry] {
        &self.names
    }

    /// Look up a `name` string, preferring the Windows English record.
    pub fn name(&self, name_id: u16) -> Option<&str> {
        find_name(&self.names, name_id)
    }

    /// Replace every record of `name_id`, adding one if the font has none.
    pub fn set_name(&mut self, name_id: u16, value: &str) {
        set_name(&mut self.names, name_id, value);
    }

    pub fn copyright(&self) -> Option<&str> {
        self.name(NAME_ID_COPYRIGHT)
    }

    pub fn postscript_name(&self) -> Option<&str> {
        self.name(NAME_ID_POSTSCRIPT_NAME)
    }
}

/// Everything [`Font`] keeps besides the raw bytes.
struct LoadedFont {
    metrics: FontMetrics,
    glyphs: Vec<Glyph>,
    encoding: BTreeMap<Codepoint, GlyphIndex>,
    names: Vec<NameEntry>,
    registry: NameRegistry,
    components: HashSet<GlyphIndex>,
    has_vertical_metrics: bool,
    cff_outlines: bool,
}

impl LoadedFont {
    fn read(data: &[u8]) -> Result<Self> {
        let font = FontRef::new(data)?;

        let metrics = {
            let head = font.head()?;
            let hhea = font.hhea()?;
            FontMetrics {
                units_per_em: head.units_per_em(),
                ascent: hhea.ascender().to_i16(),
                descent: hhea.descender().to_i16(),
            }
        };
        let num_glyphs = font.maxp()?.num_glyphs();
        let names = read_name_entries(&font)?;

        let hmtx = font.hmtx().ok();
        let vmtx = font.vmtx().ok();
        let has_vertical_metrics = font.vhea().is_ok() && vmtx.is_some();
        let post = font.post().ok();
        let glyf_loca = font.glyf().ok().zip(font.loca(None).ok());
        let cff_outlines = glyf_loca.is_none() && font.cff().is_ok();
        let outlines = font.outline_glyphs();

        let mut registry = NameRegistry::default();
        let mut components = HashSet::new();
        let mut glyphs = Vec::with_capacity(num_glyphs as usize);

        for gid in 0..num_glyphs {
            let id = GlyphId::new(gid as u32);

            let wanted = post
                .as_ref()
                .and_then(|p| p.glyph_name(GlyphId16::new(gid)))
                .map(GlyphName::new)
                .unwrap_or_else(|| GlyphName::synthesized(gid as u32));
            let name = registry.claim(wanted);

            let outline = draw_outline(&outlines, id, &name)?;
            let advance = hmtx.as_ref().and_then(|h| h.advance(id)).unwrap_or(0);
            let vertical_advance = vmtx
                .as_ref()
                .and_then(|v| v.advance(id))
                .unwrap_or(metrics.units_per_em);

            let mut glyph = Glyph::new(name, outline, advance as f64, vertical_advance as f64);

            if let Some((glyf, loca)) = &glyf_loca {
                let record = match loca.get_glyf(id, glyf)? {
                    None => GlyfGlyph::Empty,
                    Some(ReadGlyph::Simple(simple)) => GlyfGlyph::Simple(simple.to_owned_table()),
                    Some(ReadGlyph::Composite(composite)) => {
                        for component in composite.components() {
                            components.insert(GlyphIndex::new(component.glyph.to_u16() as usize));
                        }
                        GlyfGlyph::Composite(composite.to_owned_table())
                    }
                };
                glyph = glyph.with_source(SourceGlyph {
                    glyf: record,
                    lsb: hmtx.as_ref().and_then(|h| h.side_bearing(id)).unwrap_or(0),
                    tsb: vmtx.as_ref().and_then(|v| v.side_bearing(id)),
                });
            }

            glyphs.push(glyph);
        }

        let encoding = font
            .charmap()
            .mappings()
            .filter(|(_, gid)| gid.to_u32() < num_glyphs as u32)
            .map(|(cp, gid)| (Codepoint::new(cp), GlyphIndex::new(gid.to_u32() as usize)))
            .collect();

        Ok(Self {
            metrics,
            glyphs,
            encoding,
            names,
            registry,
            components,
            has_vertical_metrics,
            cff_outlines,
        })
    }
}

fn draw_outline(
    outlines: &OutlineGlyphCollection,
    gid: GlyphId,
    name: &GlyphName,
) -> Result<BezPath> {
    let Some(glyph) = outlines.get(gid) else {
        return Ok(BezPath::new());
    };
    let mut pen = QuadPathPen::new();
    glyph
        .draw(DrawSettings::unhinted(Size::unscaled(), LocationRef::default()), &mut pen)
        .map_err(|e| MergeError::MalformedOutline {
            glyph: name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(pen.into_path())
}
