//! Family and style naming of the merged font.

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::{
    Result,
    font::{
        Font, NAME_ID_COMPATIBLE_FULL, NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT_NAME,
        NAME_ID_SUBFAMILY, NAME_ID_TYPOGRAPHIC_FAMILY,
    },
};

const DEFAULT_SUBFAMILY: &str = "Regular";

/// Splits a PostScript name at its last hyphen.
const STYLE_PATTERN: &str = r"^([^-]*)(?:.*-)?([^-]*)$";

/// Naming strings of a font with the style stripped from the family names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInfo {
    pub postscript_name: String,
    pub family: String,
    pub full_name: String,
    pub subfamily: String,
}

impl NameInfo {
    pub fn derive(font: &Font) -> Result<Self> {
        Self::from_names(
            font.name(NAME_ID_FAMILY).unwrap_or_default(),
            font.name(NAME_ID_FULL_NAME).unwrap_or_default(),
            font.name(NAME_ID_POSTSCRIPT_NAME).unwrap_or_default(),
            font.name(NAME_ID_SUBFAMILY),
        )
    }

    /// A `Regular` (or missing) subfamily is replaced by the style taken from
    /// the PostScript name, which is empty when that name has no hyphen.
    pub fn from_names(
        family: &str,
        full_name: &str,
        postscript_name: &str,
        subfamily: Option<&str>,
    ) -> Result<Self> {
        let mut subfamily = subfamily.unwrap_or(DEFAULT_SUBFAMILY).to_string();
        if subfamily == DEFAULT_SUBFAMILY {
            subfamily = postscript_style(postscript_name)?;
        }

        let style = RegexBuilder::new(&format!("[ _-]?{}$", regex::escape(&subfamily)))
            .case_insensitive(true)
            .build()?;
        let strip = |s: &str| style.replace(s, "").into_owned();

        Ok(Self {
            postscript_name: strip(postscript_name),
            family: strip(family),
            full_name: strip(full_name),
            subfamily,
        })
    }

    pub fn with_suffix(self, suffix: &str) -> Self {
        let family = format!("{} {suffix}", self.family);
        Self {
            postscript_name: format!("{}-{suffix}-{}", self.postscript_name, self.subfamily),
            full_name: format!("{family} {}", self.subfamily),
            family,
            subfamily: self.subfamily,
        }
    }

    /// Write the names into the font's `name` table.
    pub fn apply(&self, font: &mut Font) {
        font.set_name(NAME_ID_FAMILY, &self.family);
        font.set_name(NAME_ID_FULL_NAME, &self.full_name);
        font.set_name(NAME_ID_POSTSCRIPT_NAME, &self.postscript_name);
        font.set_name(NAME_ID_TYPOGRAPHIC_FAMILY, &self.family);
        font.set_name(NAME_ID_COMPATIBLE_FULL, &self.full_name);
        font.set_name(NAME_ID_SUBFAMILY, &self.subfamily);
    }
}

/// Rename `font`, appending `suffix` to its family when given.
pub fn rename(font: &mut Font, suffix: Option<&str>) -> Result<NameInfo> {
    let mut info = NameInfo::derive(font)?;
    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        info = info.with_suffix(suffix);
    }
    debug!(
        "renamed to '{}' ({} / {})",
        info.postscript_name, info.family, info.subfamily
    );
    info.apply(font);
    Ok(info)
}

fn postscript_style(postscript_name: &str) -> Result<String> {
    let pattern = Regex::new(STYLE_PATTERN)?;
    Ok(pattern
        .captures(postscript_name)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default())
}
