use std::{error, io, path::PathBuf, result};

use read_fonts::ReadError;
use thiserror::Error;
use write_fonts::BuilderError;

use crate::types::Codepoint;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("failed to read font: {0}")]
    ReadError(#[from] ReadError),

    #[error("failed to write font: {0}")]
    WriteError(#[from] write_fonts::error::Error),

    #[error("failed to build font: {0}")]
    BuilderError(#[from] BuilderError),

    #[error("failed to rewrite font tables: {0}")]
    RewriteError(#[source] Box<dyn error::Error + Send + Sync>),

    #[error("CID-keyed CFF fonts are not supported")]
    CidKeyedCffNotSupported,

    #[error("variable fonts are not supported")]
    VariableFontNotSupported,

    #[error("font has unusable metrics: {0}")]
    InvalidMetrics(String),

    #[error("cannot convert outline of glyph '{glyph}': {reason}")]
    MalformedOutline { glyph: String, reason: String },

    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build cmap table: {0}")]
    CmapBuildError(String),

    #[error("font would contain {0} glyphs, more than 65535")]
    TooManyGlyphs(usize),

    #[error("failed to load font {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: Box<MergeError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<anyhow::Error> for MergeError {
    fn from(e: anyhow::Error) -> Self {
        MergeError::RewriteError(e.into())
    }
}

impl MergeError {
    /// Attach the path of the font being opened.
    pub fn opening(path: impl Into<PathBuf>) -> impl FnOnce(MergeError) -> MergeError {
        let path = path.into();
        move |source| MergeError::Open { path, source: Box::new(source) }
    }
}

/// Errors raised while loading the merge-context configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid hex code point '{value}' in context '{id}'")]
    InvalidHex { id: String, value: String },

    #[error("unicode_range of context '{id}' has more than two elements")]
    RangeTooLong { id: String },

    #[error("unicode_range of context '{id}' is inverted: {start} > {end}")]
    InvertedRange { id: String, start: Codepoint, end: Codepoint },

    #[error("scale of context '{id}' must be positive, got {scale}")]
    NonPositiveScale { id: String, scale: f64 },

    #[error("duplicate context id '{0}'")]
    DuplicateId(String),
}

pub type Result<T> = result::Result<T, MergeError>;
