//! Glyph names carried through a merge.

use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

/// A glyph name as written to the output `post` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphName(String);

impl GlyphName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name used when a font carries no glyph names.
    pub fn synthesized(gid: u32) -> Self {
        Self(format!("glyph{gid:05}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `count`th alternative spelling, `name.count`.
    pub fn numbered(&self, count: usize) -> Self {
        Self(format!("{}.{count}", self.0))
    }
}

impl Deref for GlyphName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlyphName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Tracks names in use so every glyph in a font gets a unique one.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    used: HashMap<GlyphName, usize>,
}

impl NameRegistry {
    /// Reserve `wanted`, or the first free `wanted.N` when it is taken.
    pub fn claim(&mut self, wanted: GlyphName) -> GlyphName {
        if !self.used.contains_key(wanted.as_str()) {
            self.used.insert(wanted.clone(), 0);
            return wanted;
        }

        let mut count = self.used.get(wanted.as_str()).copied().unwrap_or(0);
        loop {
            count += 1;
            let candidate = wanted.numbered(count);
            if !self.used.contains_key(candidate.as_str()) {
                self.used.insert(wanted, count);
                self.used.insert(candidate.clone(), 0);
                return candidate;
            }
        }
    }

    /// Forget a name so a replacement glyph can reuse it.
    pub fn release(&mut self, name: &GlyphName) {
        self.used.remove(name.as_str());
    }
}
