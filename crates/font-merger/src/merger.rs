//! One base font from open to generated output.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    Result,
    config::MergeContext,
    font::Font,
    hints::FontSizeHints,
    rename::{NameInfo, rename},
    transplant::{TransplantReport, merge_one},
};

/// Merges extension fonts into one base font.
#[derive(Debug)]
pub struct FontMerger {
    path: PathBuf,
    base: Font,
    base_hints: FontSizeHints,
}

impl FontMerger {
    /// Open `path` as a base font.
    ///
    /// Size hints are measured here, before any glyph is merged, so every
    /// context is normalized against the unmodified base font.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let base = Font::open_base(path)?;
        Ok(Self::new(path, base))
    }

    pub fn new(path: impl Into<PathBuf>, base: Font) -> Self {
        let base_hints = FontSizeHints::compute(&base);
        debug!("base hints: {base_hints:?}");
        Self { path: path.into(), base, base_hints }
    }

    pub fn base_font(&self) -> &Font {
        &self.base
    }

    pub fn hints(&self) -> &FontSizeHints {
        &self.base_hints
    }

    pub fn rename(&mut self, suffix: Option<&str>) -> Result<NameInfo> {
        rename(&mut self.base, suffix)
    }

    /// Merge every context in order; later contexts win at shared targets.
    pub fn merge<'a>(
        &mut self,
        contexts: impl IntoIterator<Item = &'a MergeContext>,
    ) -> Result<Vec<TransplantReport>> {
        let mut reports = Vec::new();
        for ctx in contexts {
            reports.push(self.merge_context(ctx)?);
        }
        Ok(reports)
    }

    pub fn merge_context(&mut self, ctx: &MergeContext) -> Result<TransplantReport> {
        let ext = Font::open(&ctx.filename)?;
        if log::log_enabled!(log::Level::Debug) {
            debug!("{} hints: {:?}", ctx.id, FontSizeHints::compute(&ext));
        }
        let report = merge_one(&mut self.base, &self.base_hints, ctx, &ext)?;
        info!(
            "{}: merged {} glyphs ({} half-width, {} full-width)",
            ctx.id, report.merged, report.half_width, report.full_width
        );
        Ok(report)
    }

    /// `<dir>/<PostScript name><original extension>`.
    ///
    /// Falls back to the base file's stem when the font has no PostScript name.
    pub fn output_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        let stem = self
            .base
            .postscript_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| self.path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "font".to_string());
        let filename = match self.path.extension() {
            Some(ext) => format!("{stem}.{}", ext.to_string_lossy()),
            None => stem,
        };
        dir.as_ref().join(filename)
    }

    /// Write the merged font into `dir` and return its path.
    pub fn generate(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.output_path(dir);
        self.base.generate(&path)?;
        info!("\"{}\" generated.", path.display());
        Ok(path)
    }
}
