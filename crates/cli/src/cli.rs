//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use fontmerger_font_merger::DEFAULT_CONFIG_PATH;

pub const VERSION: &str = concat!("fontmerger v", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "fontmerger", disable_version_flag = true)]
#[command(about = "Merge glyphs from extension fonts into base fonts")]
pub struct Cli {
    /// Base fonts to extend
    #[arg(value_name = "BASE_FONT")]
    pub base_fonts: Vec<PathBuf>,

    /// Show version
    #[arg(short = 'V', long = "version")]
    pub show_version: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Merge-context configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Extension font ids to merge
    #[arg(short = 'x', long = "ext-fonts", value_name = "EXT_FONT_ID", num_args = 0..)]
    pub ext_fonts: Vec<String>,

    /// Show base font details instead of merging
    #[arg(short, long)]
    pub info: bool,

    /// Output directory
    #[arg(short, long = "output", value_name = "OUTPUT_DIR", default_value = "./")]
    pub output_dir: PathBuf,

    /// List available extension fonts
    #[arg(short, long = "list")]
    pub list_fonts: bool,

    /// Preview the selected extension fonts
    #[arg(short, long = "preview")]
    pub preview_fonts: bool,

    /// Merge every configured extension font
    #[arg(long)]
    pub all: bool,

    /// Font name suffix
    #[arg(long)]
    pub suffix: Option<String>,

    /// Print full error details
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Whether `--config` was left at its default.
    pub fn uses_default_config(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG_PATH
    }
}
