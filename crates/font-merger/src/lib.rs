//! Merge glyphs from extension fonts (icon sets, symbol fonts) into a base
//! font, normalizing their size and advance widths so they fit the base
//! font's grid.

mod config;
mod error;
mod font;
mod glyph_name;
mod hints;
mod merger;
mod preview;
mod rename;
mod transplant;
mod types;

pub use config::{Config, DEFAULT_CONFIG_PATH, MergeContext};
pub use error::{ConfigError, MergeError, Result};
pub use font::{
    BoundingBox, CUBIC_TO_QUAD_ACCURACY, Font, FontMetrics, Glyph, NAME_ID_COMPATIBLE_FULL,
    NAME_ID_COPYRIGHT, NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT_NAME,
    NAME_ID_SUBFAMILY, NAME_ID_TYPOGRAPHIC_FAMILY, QuadPathPen, is_cid_keyed,
};
pub use fontmerger_font_ops::NameEntry;
pub use glyph_name::GlyphName;
pub use hints::{FULL_WIDTH_WINDOW, FontSizeHints, GlyphSizeInfo, HALF_WIDTH_WINDOW};
pub use merger::FontMerger;
pub use preview::{GLYPHS_PER_LINE, preview_lines};
pub use rename::{NameInfo, rename};
pub use transplant::{
    CodepointRemap, HALF_WIDTH_TOLERANCE, Placement, STRICT_HALF_WIDTH_TOLERANCE,
    ScaleTransform, TransplantReport, WidthClass, append_copyright, merge_one, round3,
};
pub use types::{Codepoint, GlyphIndex, MAX_CODEPOINT};
