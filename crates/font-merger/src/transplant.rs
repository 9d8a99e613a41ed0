//! Copying glyphs from an extension font into the base font.
//!
//! Each selected glyph is pasted at its (possibly remapped) code point,
//! scaled to the base font's em and height, pulled below the base ascent,
//! optionally centered, and given the advance of the half-width or
//! full-width reference glyph so merged glyphs share uniform spacing.

use kurbo::Affine;
use log::{debug, warn};

use crate::{
    MergeError, Result,
    config::MergeContext,
    font::{Font, FontMetrics, Glyph, NAME_ID_COPYRIGHT},
    hints::{FontSizeHints, GlyphSizeInfo},
    types::Codepoint,
};

/// Glyphs up to this multiple of the half-width reference count as half-width.
///
/// Earlier revisions of the tool used [`STRICT_HALF_WIDTH_TOLERANCE`]; which
/// of the two is canonical is unresolved.
pub const HALF_WIDTH_TOLERANCE: f64 = 1.2;

pub const STRICT_HALF_WIDTH_TOLERANCE: f64 = 1.05;

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Source window and destination of a context's code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRemap {
    pub ext_start: Codepoint,
    pub ext_end: Codepoint,
    pub base_start: Codepoint,
}

impl CodepointRemap {
    pub fn resolve(ctx: &MergeContext) -> Self {
        let ext_start = ctx.unicode_range.first().copied().unwrap_or_default();
        let ext_end = ctx.unicode_range.get(1).copied().unwrap_or_default();
        let base_start = ctx.remap_start_point.unwrap_or(ext_start);
        Self { ext_start, ext_end, base_start }
    }

    /// A zero start selects every encoded glyph.
    pub fn selects_all(&self) -> bool {
        self.ext_start.to_u32() == 0
    }

    pub fn contains(&self, cp: Codepoint) -> bool {
        self.selects_all() || (self.ext_start..=self.ext_end).contains(&cp)
    }

    /// Where `cp` lands in the base font; `None` past U+10FFFF.
    pub fn target(&self, cp: Codepoint) -> Option<Codepoint> {
        cp.relocate(self.ext_start, self.base_start)
    }

    /// Selected glyphs of `font` in ascending code point order.
    pub fn select<'a>(&self, font: &'a Font) -> Vec<(Codepoint, &'a Glyph)> {
        font.encoded_glyphs().filter(|(cp, _)| self.contains(*cp)).collect()
    }
}

/// Anisotropic scale taking extension-font units to base-font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub x: f64,
    pub y: f64,
}

impl ScaleTransform {
    /// Em ratio horizontally, height ratio vertically, each rounded to three
    /// decimals before the context's `scale` is applied.
    pub fn compute(base: FontMetrics, ext: FontMetrics, glyph_scale: f64) -> Result<Self> {
        if ext.units_per_em == 0 {
            return Err(MergeError::InvalidMetrics("extension font has zero units per em".into()));
        }
        if ext.height() <= 0 {
            return Err(MergeError::InvalidMetrics(format!(
                "extension font height is {}",
                ext.height()
            )));
        }
        let x = round3(base.units_per_em as f64 / ext.units_per_em as f64) * glyph_scale;
        let y = round3(base.height() as f64 / ext.height() as f64) * glyph_scale;
        Ok(Self { x, y })
    }

    pub fn affine(&self) -> Affine {
        Affine::scale_non_uniform(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Half,
    Full,
}

impl WidthClass {
    pub fn classify(width: f64, hints: &FontSizeHints) -> Self {
        if width <= hints.half.width * HALF_WIDTH_TOLERANCE {
            WidthClass::Half
        } else {
            WidthClass::Full
        }
    }

    pub fn hint(self, hints: &FontSizeHints) -> &GlyphSizeInfo {
        match self {
            WidthClass::Half => &hints.half,
            WidthClass::Full => &hints.full,
        }
    }
}

/// Final offset and advances of one transplanted glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub shift_x: f64,
    pub shift_y: f64,
    pub class: WidthClass,
    pub advance_width: f64,
    pub vertical_advance: f64,
}

impl Placement {
    /// Position a glyph already scaled into base-font units.
    pub fn compute(
        info: &GlyphSizeInfo,
        hints: &FontSizeHints,
        em: f64,
        glyph_scale: f64,
        adjust_position: bool,
    ) -> Self {
        let mut move_x = 0.0;
        let mut move_y = 0.0;
        if info.ymax > hints.ascent {
            move_y = hints.ascent - info.ymax;
        }
        if glyph_scale < 1.0 && adjust_position {
            move_x += info.width * (1.0 - glyph_scale) / 2.0;
            move_y -= info.height * (1.0 - glyph_scale) / 2.0;
        }

        let mut shift_x = if info.width + move_x < em { move_x } else { 0.0 };

        // Classified on the unshifted width.
        let class = WidthClass::classify(info.width, hints);
        let hint = class.hint(hints);
        if adjust_position && hint.width != 0.0 && hint.width < info.width {
            shift_x += 1.0 - (info.width - hint.width) / hint.width;
        }

        // An empty reference window leaves zero hints. The advance then stays the
        // glyph's own instead of matching the hint exactly.
        let advance_width = if hint.width > 0.0 { hint.width } else { info.width };
        let vertical_advance = if hint.vertical_advance > 0.0 {
            hint.vertical_advance
        } else {
            info.vertical_advance
        };

        Self { shift_x, shift_y: move_y, class, advance_width, vertical_advance }
    }

    pub fn translation(&self) -> Affine {
        Affine::translate((self.shift_x, self.shift_y))
    }
}

/// What one context contributed to the base font.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransplantReport {
    pub context_id: String,
    pub merged: usize,
    pub half_width: usize,
    pub full_width: usize,
    pub out_of_range: usize,
    pub copyright_appended: bool,
}

/// Merge the glyphs selected by `ctx` from `ext` into `base`.
///
/// `base_hints` must be computed once from the base font before the first
/// context is merged.
pub fn merge_one(
    base: &mut Font,
    base_hints: &FontSizeHints,
    ctx: &MergeContext,
    ext: &Font,
) -> Result<TransplantReport> {
    let remap = CodepointRemap::resolve(ctx);
    let scale = ScaleTransform::compute(base.metrics(), ext.metrics(), ctx.scale)?;
    let em = base.units_per_em() as f64;

    debug!(
        "{}: range {}..={} -> {}, scale {:.3} x {:.3}",
        ctx.id, remap.ext_start, remap.ext_end, remap.base_start, scale.x, scale.y
    );

    let mut report = TransplantReport { context_id: ctx.id.clone(), ..Default::default() };

    for (cp, source) in remap.select(ext) {
        let Some(target) = remap.target(cp) else {
            warn!("{}: {cp} maps past U+10FFFF, skipped", ctx.id);
            report.out_of_range += 1;
            continue;
        };

        let idx = base.paste(target, source);
        let Some(glyph) = base.glyph_at_mut(idx) else {
            continue;
        };
        glyph.transform(scale.affine());

        let info = GlyphSizeInfo::measure(glyph);
        let placement = Placement::compute(&info, base_hints, em, ctx.scale, ctx.adjust_position);
        glyph.transform(placement.translation());
        glyph.set_advances(placement.advance_width, placement.vertical_advance);

        match placement.class {
            WidthClass::Half => report.half_width += 1,
            WidthClass::Full => report.full_width += 1,
        }
        report.merged += 1;
    }

    report.copyright_appended = append_copyright(base, ext.copyright());
    Ok(report)
}

/// Add `extra` to the base copyright on its own line unless already present.
pub fn append_copyright(base: &mut Font, extra: Option<&str>) -> bool {
    let Some(extra) = extra.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };
    let current = base.copyright().unwrap_or_default();
    if current.contains(extra) {
        return false;
    }
    let combined = if current.is_empty() {
        extra.to_string()
    } else {
        format!("{current}\n{extra}")
    };
    base.set_name(NAME_ID_COPYRIGHT, &combined);
    true
}
