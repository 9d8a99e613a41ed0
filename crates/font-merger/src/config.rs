//! Merge-context configuration.
//!
//! The configuration file is a JSON array; each element describes one
//! extension font and the code-point window taken from it:
//!
//! ```json
//! [
//!   {
//!     "id": "octicons",
//!     "filename": "fonts/octicons.ttf",
//!     "name": "Octicons",
//!     "unicode_range": ["0xf000", "0xf0db"],
//!     "remap_start_point": "0xe000",
//!     "scale": 0.9,
//!     "adjust_position": true
//!   }
//! ]
//! ```
//!
//! Unknown keys are ignored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::{error::ConfigError, types::Codepoint};

pub const DEFAULT_CONFIG_PATH: &str = "./fonts.json";

/// A code point written either as a hex string (`"0x41"`, `"41"`, `"U+0041"`)
/// or as a plain JSON integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum HexValue {
    Number(u32),
    Text(String),
}

impl HexValue {
    fn parse(&self, id: &str) -> Result<Codepoint, ConfigError> {
        match self {
            HexValue::Number(n) => Ok(Codepoint::new(*n)),
            HexValue::Text(s) => parse_hex(s).ok_or_else(|| ConfigError::InvalidHex {
                id: id.to_string(),
                value: s.clone(),
            }),
        }
    }
}

fn parse_hex(s: &str) -> Option<Codepoint> {
    let s = s.trim();
    let digits = ["0x", "0X", "U+", "u+"]
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).ok().map(Codepoint::new)
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct RawContext {
    id: String,
    filename: PathBuf,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    unicode_range: Option<Vec<HexValue>>,
    #[serde(default)]
    remap_start_point: Option<HexValue>,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    adjust_position: bool,
}

/// Parameters for merging one extension font.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeContext {
    pub id: String,
    pub filename: PathBuf,
    pub name: String,
    pub description: String,
    /// Zero, one or two code points; missing bounds read as 0.
    pub unicode_range: Vec<Codepoint>,
    pub remap_start_point: Option<Codepoint>,
    pub scale: f64,
    pub adjust_position: bool,
    pub enabled: bool,
}

impl MergeContext {
    /// A context that takes every encoded glyph of `filename` as-is.
    pub fn new(id: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            name: String::new(),
            description: String::new(),
            unicode_range: Vec::new(),
            remap_start_point: None,
            scale: default_scale(),
            adjust_position: false,
            enabled: false,
        }
    }

    pub fn with_range(mut self, start: u32, end: u32) -> Self {
        self.unicode_range = vec![Codepoint::new(start), Codepoint::new(end)];
        self
    }

    pub fn with_remap(mut self, start: u32) -> Self {
        self.remap_start_point = Some(Codepoint::new(start));
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_adjust_position(mut self, adjust: bool) -> Self {
        self.adjust_position = adjust;
        self
    }

    fn from_raw(raw: RawContext, base_dir: &Path) -> Result<Self, ConfigError> {
        let id = raw.id;

        let unicode_range = raw
            .unicode_range
            .unwrap_or_default()
            .iter()
            .map(|v| v.parse(&id))
            .collect::<Result<Vec<_>, _>>()?;
        if unicode_range.len() > 2 {
            return Err(ConfigError::RangeTooLong { id });
        }
        if let [start, end] = unicode_range[..] {
            if start > end {
                return Err(ConfigError::InvertedRange { id, start, end });
            }
        }

        let remap_start_point = raw.remap_start_point.map(|v| v.parse(&id)).transpose()?;

        if raw.scale.is_nan() || raw.scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale { id, scale: raw.scale });
        }

        let filename = if raw.filename.is_relative() {
            base_dir.join(raw.filename)
        } else {
            raw.filename
        };

        Ok(Self {
            id,
            filename,
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            unicode_range,
            remap_start_point,
            scale: raw.scale,
            adjust_position: raw.adjust_position,
            enabled: false,
        })
    }
}

/// All merge contexts of a configuration file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Config {
    contexts: IndexMap<String, MergeContext>,
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// Relative font paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_json(&text, base_dir)
    }

    pub fn from_json(text: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: Vec<RawContext> = serde_json::from_str(text)?;
        let mut contexts = IndexMap::with_capacity(raw.len());
        for raw in raw {
            let ctx = MergeContext::from_raw(raw, base_dir)?;
            if contexts.contains_key(&ctx.id) {
                return Err(ConfigError::DuplicateId(ctx.id));
            }
            contexts.insert(ctx.id.clone(), ctx);
        }
        Ok(Self { contexts })
    }

    pub fn from_contexts(contexts: impl IntoIterator<Item = MergeContext>) -> Self {
        Self { contexts: contexts.into_iter().map(|c| (c.id.clone(), c)).collect() }
    }

    /// Mark contexts as enabled: all of them, or those named in `ids`.
    ///
    /// Ids that match no context are reported and otherwise ignored.
    pub fn enable(&mut self, all: bool, ids: &[String]) {
        for id in ids {
            if !self.contexts.contains_key(id) {
                warn!("unknown extension font id '{id}'");
            }
        }
        for ctx in self.contexts.values_mut() {
            ctx.enabled = all || ids.contains(&ctx.id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&MergeContext> {
        self.contexts.get(id)
    }

    pub fn contexts(&self) -> impl Iterator<Item = &MergeContext> {
        self.contexts.values()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &MergeContext> {
        self.contexts.values().filter(|c| c.enabled)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
