//! Plain-text preview of the glyphs a context would merge.

use crate::{
    config::MergeContext,
    font::Font,
    hints::{FontSizeHints, GlyphSizeInfo},
    transplant::{CodepointRemap, WidthClass},
};

pub const GLYPHS_PER_LINE: usize = 40;

/// Banner followed by the target characters of `ctx`, wrapped every
/// [`GLYPHS_PER_LINE`] glyphs. Half-width glyphs are padded with a space.
pub fn preview_lines(ctx: &MergeContext, ext: &Font, ext_hints: &FontSizeHints) -> Vec<String> {
    let remap = CodepointRemap::resolve(ctx);
    let mut lines = vec![format!("{:-^80}", format!(" {} ", ctx.id))];

    let mut line = String::new();
    let mut count = 0;
    for (cp, glyph) in remap.select(ext) {
        let Some(ch) = remap.target(cp).and_then(|t| t.to_char()) else {
            continue;
        };
        line.push(ch);
        let width = GlyphSizeInfo::measure(glyph).width;
        if WidthClass::classify(width, ext_hints) == WidthClass::Half {
            line.push(' ');
        }
        count += 1;
        if count == GLYPHS_PER_LINE {
            lines.push(std::mem::take(&mut line));
            count = 0;
        }
    }
    if count > 0 {
        lines.push(line);
    }
    lines
}
