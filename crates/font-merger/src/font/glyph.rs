//! Editable glyph records.

use kurbo::{Affine, BezPath, Shape};
use write_fonts::tables::glyf::{Bbox, Glyph as GlyfGlyph, SimpleGlyph};

use crate::{MergeError, Result, glyph_name::GlyphName};

/// Ink extent of a glyph outline. All zero for an empty outline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// `glyf` data and side bearings of a glyph nobody has edited.
#[derive(Debug, Clone)]
pub(crate) struct SourceGlyph {
    pub glyf: GlyfGlyph,
    pub lsb: i16,
    pub tsb: Option<i16>,
}

/// A glyph as edited by the merger.
///
/// The outline holds only line and quadratic segments. Untouched glyphs of a
/// TrueType base font keep their original `glyf` record, so instructions and
/// component references survive; any outline edit drops it.
#[derive(Debug, Clone)]
pub struct Glyph {
    name: GlyphName,
    outline: BezPath,
    advance_width: f64,
    vertical_advance: f64,
    source: Option<SourceGlyph>,
}

/// A glyph ready for the `glyf`, `hmtx` and `vmtx` tables.
#[derive(Debug, Clone)]
pub(crate) struct CompiledGlyph {
    pub glyf: GlyfGlyph,
    pub bbox: Option<Bbox>,
    pub advance: u16,
    pub lsb: i16,
    pub vertical_advance: u16,
    pub tsb: i16,
}

impl Glyph {
    pub fn new(
        name: GlyphName,
        outline: BezPath,
        advance_width: f64,
        vertical_advance: f64,
    ) -> Self {
        Self { name, outline, advance_width, vertical_advance, source: None }
    }

    pub(crate) fn with_source(mut self, source: SourceGlyph) -> Self {
        self.source = Some(source);
        self
    }

    pub fn name(&self) -> &GlyphName {
        &self.name
    }

    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    pub fn advance_width(&self) -> f64 {
        self.advance_width
    }

    pub fn vertical_advance(&self) -> f64 {
        self.vertical_advance
    }

    /// Whether the original `glyf` record is still used for output.
    pub fn is_pristine(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.outline.segments().next().is_none()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        if self.is_empty() {
            return BoundingBox::default();
        }
        let rect = self.outline.bounding_box();
        BoundingBox { xmin: rect.x0, ymin: rect.y0, xmax: rect.x1, ymax: rect.y1 }
    }

    /// Apply an affine transform to the outline.
    ///
    /// Advances follow the horizontal and vertical scale factors; translation
    /// leaves them alone.
    pub fn transform(&mut self, affine: Affine) {
        let [xx, _, _, yy, _, _] = affine.as_coeffs();
        self.outline.apply_affine(affine);
        self.advance_width *= xx;
        self.vertical_advance *= yy;
        self.source = None;
    }

    pub fn set_advances(&mut self, advance_width: f64, vertical_advance: f64) {
        self.advance_width = advance_width;
        self.vertical_advance = vertical_advance;
    }

    /// A copy of this glyph for another font, under a new name.
    pub(crate) fn detached(&self, name: GlyphName) -> Glyph {
        Glyph {
            name,
            outline: self.outline.clone(),
            advance_width: self.advance_width,
            vertical_advance: self.vertical_advance,
            source: None,
        }
    }

    pub(crate) fn compile(&self, ascent: i16) -> Result<CompiledGlyph> {
        let advance = to_u16(self.advance_width);
        let vertical_advance = to_u16(self.vertical_advance);

        if let Some(source) = &self.source {
            let bbox = glyf_bbox(&source.glyf);
            let tsb = source
                .tsb
                .unwrap_or_else(|| bbox.map_or(0, |b| ascent.saturating_sub(b.y_max)));
            return Ok(CompiledGlyph {
                glyf: source.glyf.clone(),
                bbox,
                advance,
                lsb: source.lsb,
                vertical_advance,
                tsb,
            });
        }

        if self.is_empty() {
            return Ok(CompiledGlyph {
                glyf: GlyfGlyph::Empty,
                bbox: None,
                advance,
                lsb: 0,
                vertical_advance,
                tsb: 0,
            });
        }

        let simple =
            SimpleGlyph::from_bezpath(&self.outline).map_err(|e| MergeError::MalformedOutline {
                glyph: self.name.to_string(),
                reason: format!("{e:?}"),
            })?;
        let bbox = simple.bbox;
        Ok(CompiledGlyph {
            glyf: GlyfGlyph::Simple(simple),
            bbox: Some(bbox),
            advance,
            lsb: bbox.x_min,
            vertical_advance,
            tsb: ascent.saturating_sub(bbox.y_max),
        })
    }
}

fn glyf_bbox(glyph: &GlyfGlyph) -> Option<Bbox> {
    match glyph {
        GlyfGlyph::Empty => None,
        GlyfGlyph::Simple(simple) => Some(simple.bbox),
        GlyfGlyph::Composite(composite) => Some(composite.bbox),
    }
}

fn to_u16(value: f64) -> u16 {
    value.round().clamp(0.0, u16::MAX as f64) as u16
}
