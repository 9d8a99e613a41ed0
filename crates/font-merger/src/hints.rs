//! Reference glyph metrics used to normalize merged glyphs.

use std::ops::RangeInclusive;

use crate::{
    font::{Font, Glyph},
    types::Codepoint,
};

/// Visible ASCII, the half-width reference window.
pub const HALF_WIDTH_WINDOW: RangeInclusive<u32> = 0x23..=0x7E;

/// Fullwidth forms, the full-width reference window.
pub const FULL_WIDTH_WINDOW: RangeInclusive<u32> = 0xFF01..=0xFF5E;

/// Measurements of one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphSizeInfo {
    /// The larger of the advance width and the ink width.
    pub width: f64,
    pub vertical_advance: f64,
    pub height: f64,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl GlyphSizeInfo {
    pub fn measure(glyph: &Glyph) -> Self {
        let bbox = glyph.bounding_box();
        Self {
            width: glyph.advance_width().max(bbox.width()),
            vertical_advance: glyph.vertical_advance(),
            height: bbox.height(),
            xmin: bbox.xmin,
            ymin: bbox.ymin,
            xmax: bbox.xmax,
            ymax: bbox.ymax,
        }
    }

    /// Keep, field by field, whichever value has the larger magnitude.
    ///
    /// Ties keep the current value.
    pub fn fold(self, other: Self) -> Self {
        fn larger(current: f64, candidate: f64) -> f64 {
            if candidate.abs() > current.abs() { candidate } else { current }
        }
        Self {
            width: larger(self.width, other.width),
            vertical_advance: larger(self.vertical_advance, other.vertical_advance),
            height: larger(self.height, other.height),
            xmin: larger(self.xmin, other.xmin),
            ymin: larger(self.ymin, other.ymin),
            xmax: larger(self.xmax, other.xmax),
            ymax: larger(self.ymax, other.ymax),
        }
    }

    /// Aggregate over every glyph of `font` encoded in `window`.
    ///
    /// Code points without a glyph are skipped; an empty window yields zeros.
    pub fn aggregate(font: &Font, window: RangeInclusive<u32>) -> Self {
        Codepoint::window(window)
            .filter_map(|cp| font.glyph(cp))
            .map(Self::measure)
            .fold(Self::default(), Self::fold)
    }
}

/// Synthetic largest half-width and full-width glyphs of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontSizeHints {
    pub half: GlyphSizeInfo,
    pub full: GlyphSizeInfo,
    pub ascent: f64,
    pub descent: f64,
}

impl FontSizeHints {
    pub fn compute(font: &Font) -> Self {
        let metrics = font.metrics();
        Self {
            half: GlyphSizeInfo::aggregate(font, HALF_WIDTH_WINDOW),
            full: GlyphSizeInfo::aggregate(font, FULL_WIDTH_WINDOW),
            ascent: metrics.ascent as f64,
            descent: metrics.descent as f64,
        }
    }
}
