//! Sequential processing of base fonts.

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fontmerger_font_merger::{FontMerger, MergeContext};
use log::{error, info};

use crate::display::FontSummary;

/// Settings shared by every base font of a run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub suffix: Option<String>,
    pub info: bool,
    pub debug: bool,
}

/// Result of a batch operation.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub outputs: Vec<PathBuf>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Process each base font in turn.
///
/// A failing font is logged and counted; the remaining fonts are still
/// processed.
pub fn run_batch(
    base_fonts: &[PathBuf],
    contexts: &[&MergeContext],
    options: &BatchOptions,
) -> BatchResult {
    let mut result = BatchResult::default();
    for path in base_fonts {
        info!("\"{}\" merging fonts...", path.display());
        match process_font(path, contexts, options) {
            Ok(output) => {
                result.succeeded += 1;
                result.outputs.extend(output);
            }
            Err(e) => {
                if options.debug {
                    error!("{e:?}");
                } else {
                    error!("{e:#}");
                }
                result.failed += 1;
            }
        }
    }
    info!("{} succeeded, {} failed", result.succeeded, result.failed);
    result
}

fn process_font(
    path: &Path,
    contexts: &[&MergeContext],
    options: &BatchOptions,
) -> Result<Option<PathBuf>> {
    let mut merger = FontMerger::open(path)?;
    if options.info {
        print!("{}", FontSummary::from(merger.base_font()));
        return Ok(None);
    }

    merger.rename(options.suffix.as_deref())?;
    merger.merge(contexts.iter().copied())?;

    ensure_dir(&options.output_dir)?;
    let output = merger
        .generate(&options.output_dir)
        .with_context(|| format!("Failed to generate font from {}", path.display()))?;
    Ok(Some(output))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}
