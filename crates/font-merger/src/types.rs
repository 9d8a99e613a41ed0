//! Domain-specific newtypes.

use std::{
    fmt::{Display, Formatter, Result},
    ops::RangeInclusive,
};

/// Largest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A Unicode codepoint
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint(pub u32);

impl Codepoint {
    pub const fn new(cp: u32) -> Self {
        Self(cp)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Convert to a Rust char if valid
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// Move this codepoint from a window starting at `from` to one starting at `to`.
    ///
    /// Returns `None` when the result falls outside the Unicode range.
    pub fn relocate(self, from: Codepoint, to: Codepoint) -> Option<Codepoint> {
        let offset = self.0.checked_sub(from.0)?;
        to.0
            .checked_add(offset)
            .filter(|&cp| cp <= MAX_CODEPOINT)
            .map(Codepoint)
    }

    /// Iterate every codepoint of an inclusive window.
    pub fn window(range: RangeInclusive<u32>) -> impl Iterator<Item = Codepoint> {
        range.map(Codepoint)
    }
}

impl From<u32> for Codepoint {
    fn from(cp: u32) -> Self {
        Self(cp)
    }
}

impl From<char> for Codepoint {
    fn from(ch: char) -> Self {
        Self(ch as u32)
    }
}

impl From<Codepoint> for u32 {
    fn from(cp: Codepoint) -> Self {
        cp.0
    }
}

impl Display for Codepoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "U+{:04X}", self.0)
    }
}

/// Index of a glyph in a font's glyph order
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphIndex(pub usize);

impl GlyphIndex {
    pub const fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for GlyphIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "GID{}", self.0)
    }
}
