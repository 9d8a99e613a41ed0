//! Serializing an edited [`Font`].

use std::{fs, path::Path};

use chrono::Utc;
use font_types::{FWord, LongDateTime, UfWord};
use fontmerger_font_ops::{build_name_table, rewrite_font};
use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    types::{GlyphId, Tag},
};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        cmap::Cmap,
        glyf::{Bbox, GlyfLocaBuilder, Glyph as GlyfGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        os2::Os2,
        post::Post,
        vhea::Vhea,
        vmtx::{self, Vmtx},
    },
};

use super::{Font, glyph::CompiledGlyph};
use crate::{MergeError, Result};

/// Tables whose contents become stale once glyphs change.
const STALE_TABLES: &[[u8; 4]] = &[*b"hdmx", *b"LTSH", *b"DSIG"];

/// Dropped when CFF outlines are re-emitted as TrueType.
const CFF_TABLES: &[[u8; 4]] = &[*b"CFF ", *b"VORG"];

/// Seconds between the `head` epoch (1904-01-01) and the Unix epoch.
const SECONDS_1904_TO_1970: i64 = 2_082_844_800;

#[derive(Debug, Default)]
struct OutlineStats {
    bbox: Option<Bbox>,
    max_points: u16,
    max_contours: u16,
}

impl OutlineStats {
    fn add(&mut self, glyph: &CompiledGlyph) {
        if let Some(bbox) = glyph.bbox {
            self.bbox = Some(self.bbox.map_or(bbox, |b| b.union(bbox)));
        }
        if let GlyfGlyph::Simple(simple) = &glyph.glyf {
            let points: usize = simple.contours.iter().map(|c| c.len()).sum();
            self.max_points = self.max_points.max(points.min(u16::MAX as usize) as u16);
            self.max_contours =
                self.max_contours.max(simple.contours.len().min(u16::MAX as usize) as u16);
        }
    }
}

impl Font {
    /// Write the font to `path`.
    pub fn generate(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        fs::write(path, data)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    /// Serialize the font with TrueType outlines.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let num_glyphs = u16::try_from(self.glyphs.len())
            .map_err(|_| MergeError::TooManyGlyphs(self.glyphs.len()))?;

        let compiled = self
            .glyphs
            .iter()
            .map(|g| g.compile(self.metrics.ascent))
            .collect::<Result<Vec<_>>>()?;

        let mut glyf_builder = GlyfLocaBuilder::new();
        let mut stats = OutlineStats::default();
        for glyph in &compiled {
            glyf_builder.add_glyph(&glyph.glyf)?;
            stats.add(glyph);
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let source = FontRef::new(&self.data)?;
        let head = self.build_head(&source, &stats, loca_format)?;
        let hhea = build_hhea(&source, &compiled, num_glyphs)?;
        let hmtx = Hmtx {
            h_metrics: compiled
                .iter()
                .map(|g| LongMetric { advance: g.advance, side_bearing: g.lsb })
                .collect(),
            left_side_bearings: vec![],
        };
        let maxp = self.build_maxp(&source, &stats, num_glyphs)?;
        let cmap = self.build_cmap()?;
        let post = self.build_post(&source);
        let name = build_name_table(&self.names);
        let os2 = self.build_os2(&source);
        let vertical = if self.has_vertical_metrics {
            Some(build_vertical(&source, &compiled, num_glyphs)?)
        } else {
            None
        };

        let mut dropped: Vec<Tag> = STALE_TABLES.iter().map(Tag::new).collect();
        if self.cff_outlines {
            dropped.extend(CFF_TABLES.iter().map(Tag::new));
        }

        let data = rewrite_font(&self.data, &dropped, |_, builder| {
            builder.add_table(&head)?;
            builder.add_table(&hhea)?;
            builder.add_table(&maxp)?;
            builder.add_table(&hmtx)?;
            builder.add_table(&cmap)?;
            builder.add_table(&post)?;
            builder.add_table(&name)?;
            builder.add_table(&glyf)?;
            builder.add_table(&loca)?;
            if let Some(os2) = &os2 {
                builder.add_table(os2)?;
            }
            if let Some((vhea, vmtx)) = &vertical {
                builder.add_table(vhea)?;
                builder.add_table(vmtx)?;
            }
            Ok(())
        })?;
        Ok(data)
    }

    fn build_head(
        &self,
        source: &FontRef,
        stats: &OutlineStats,
        loca_format: LocaFormat,
    ) -> Result<Head> {
        let mut head: Head = source.head()?.to_owned_table();
        let bbox = stats.bbox.unwrap_or_default();
        head.x_min = bbox.x_min;
        head.y_min = bbox.y_min;
        head.x_max = bbox.x_max;
        head.y_max = bbox.y_max;
        head.index_to_loc_format = match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        };
        head.modified = LongDateTime::new(Utc::now().timestamp() + SECONDS_1904_TO_1970);
        Ok(head)
    }

    fn build_maxp(&self, source: &FontRef, stats: &OutlineStats, num_glyphs: u16) -> Result<Maxp> {
        let maxp: Maxp = source.maxp()?.to_owned_table();
        let truetype = maxp.max_points.is_some() && !self.cff_outlines;
        let keep = |value: Option<u16>, default: u16| if truetype { value } else { Some(default) };

        Ok(Maxp {
            num_glyphs,
            max_points: Some(maxp.max_points.unwrap_or(0).max(stats.max_points)),
            max_contours: Some(maxp.max_contours.unwrap_or(0).max(stats.max_contours)),
            max_composite_points: keep(maxp.max_composite_points, 0),
            max_composite_contours: keep(maxp.max_composite_contours, 0),
            max_zones: keep(maxp.max_zones, 1),
            max_twilight_points: keep(maxp.max_twilight_points, 0),
            max_storage: keep(maxp.max_storage, 0),
            max_function_defs: keep(maxp.max_function_defs, 0),
            max_instruction_defs: keep(maxp.max_instruction_defs, 0),
            max_stack_elements: keep(maxp.max_stack_elements, 0),
            max_size_of_instructions: keep(maxp.max_size_of_instructions, 0),
            max_component_elements: keep(maxp.max_component_elements, 0),
            max_component_depth: keep(maxp.max_component_depth, 0),
        })
    }

    fn build_cmap(&self) -> Result<Cmap> {
        let mappings = self.encoding.iter().filter_map(|(cp, idx)| {
            let ch = cp.to_char()?;
            Some((ch, GlyphId::new(idx.as_usize() as u32)))
        });
        Cmap::from_mappings(mappings).map_err(|e| MergeError::CmapBuildError(format!("{e:?}")))
    }

    fn build_post(&self, source: &FontRef) -> Post {
        let mut post = Post::new_v2(self.glyphs.iter().map(|g| g.name().as_str()));
        if let Ok(original) = source.post() {
            post.italic_angle = original.italic_angle();
            post.underline_position = original.underline_position();
            post.underline_thickness = original.underline_thickness();
            post.is_fixed_pitch = original.is_fixed_pitch();
        }
        post
    }

    fn build_os2(&self, source: &FontRef) -> Option<Os2> {
        let mut os2: Os2 = source.os2().ok()?.to_owned_table();
        let first = self.encoding.keys().next()?;
        let last = self.encoding.keys().next_back()?;
        os2.us_first_char_index = first.to_u32().min(0xFFFF) as u16;
        os2.us_last_char_index = last.to_u32().min(0xFFFF) as u16;
        Some(os2)
    }
}

fn build_hhea(source: &FontRef, glyphs: &[CompiledGlyph], num_glyphs: u16) -> Result<Hhea> {
    let mut hhea: Hhea = source.hhea()?.to_owned_table();

    let advance_max = glyphs.iter().map(|g| g.advance).max().unwrap_or(0);
    let inked = glyphs.iter().filter_map(|g| g.bbox.map(|b| (g, b)));
    let min_lsb = inked.clone().map(|(g, _)| g.lsb).min().unwrap_or(0);
    let min_rsb = inked
        .clone()
        .map(|(g, b)| clamp_i16(g.advance as i32 - (g.lsb as i32 + b.x_max as i32 - b.x_min as i32)))
        .min()
        .unwrap_or(0);
    let x_max_extent = inked
        .map(|(g, b)| clamp_i16(g.lsb as i32 + b.x_max as i32 - b.x_min as i32))
        .max()
        .unwrap_or(0);

    hhea.advance_width_max = UfWord::new(advance_max);
    hhea.min_left_side_bearing = FWord::new(min_lsb);
    hhea.min_right_side_bearing = FWord::new(min_rsb);
    hhea.x_max_extent = FWord::new(x_max_extent);
    hhea.number_of_h_metrics = num_glyphs;
    Ok(hhea)
}

fn build_vertical(
    source: &FontRef,
    glyphs: &[CompiledGlyph],
    num_glyphs: u16,
) -> Result<(Vhea, Vmtx)> {
    let mut vhea: Vhea = source.vhea()?.to_owned_table();

    let advance_max = glyphs.iter().map(|g| g.vertical_advance).max().unwrap_or(0);
    let inked = glyphs.iter().filter_map(|g| g.bbox.map(|b| (g, b)));
    let min_tsb = inked.clone().map(|(g, _)| g.tsb).min().unwrap_or(0);
    let min_bsb = inked
        .clone()
        .map(|(g, b)| {
            clamp_i16(g.vertical_advance as i32 - (g.tsb as i32 + b.y_max as i32 - b.y_min as i32))
        })
        .min()
        .unwrap_or(0);
    let y_max_extent = inked
        .map(|(g, b)| clamp_i16(g.tsb as i32 + b.y_max as i32 - b.y_min as i32))
        .max()
        .unwrap_or(0);

    vhea.advance_height_max = UfWord::new(advance_max);
    vhea.min_top_side_bearing = FWord::new(min_tsb);
    vhea.min_bottom_side_bearing = FWord::new(min_bsb);
    vhea.y_max_extent = FWord::new(y_max_extent);
    vhea.number_of_long_ver_metrics = num_glyphs;

    let vmtx = Vmtx {
        v_metrics: glyphs
            .iter()
            .map(|g| vmtx::LongMetric { advance: g.vertical_advance, side_bearing: g.tsb })
            .collect(),
        top_side_bearings: Vec::new(),
    };
    Ok((vhea, vmtx))
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
