//! fontmerger command-line driver.

pub mod batch;
pub mod cli;
pub mod display;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;
use env_logger::{Builder, Env};
use fontmerger_font_merger::{Config, Font, FontSizeHints, MergeContext, preview_lines};
use log::{LevelFilter, debug, error};

pub use batch::{BatchOptions, BatchResult, run_batch};
pub use cli::{Cli, VERSION};
pub use display::{FontSummary, available_fonts};

/// Configure `env_logger`. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: bool, debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    Builder::from_env(Env::default().default_filter_or(level.as_str().to_lowercase()))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    if cli.show_version {
        println!("{VERSION}");
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = load_config(&cli)?;
    config.enable(cli.all, &cli.ext_fonts);

    if cli.list_fonts {
        for line in available_fonts(&config) {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let contexts: Vec<&MergeContext> = config.enabled().collect();
    if cli.base_fonts.is_empty() && contexts.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    }

    if cli.preview_fonts {
        for ctx in &contexts {
            if let Err(e) = preview(ctx) {
                error!("{e:#}");
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let options = BatchOptions {
        output_dir: cli.output_dir,
        suffix: cli.suffix,
        info: cli.info,
        debug: cli.debug,
    };
    run_batch(&cli.base_fonts, &contexts, &options);
    Ok(ExitCode::SUCCESS)
}

/// A missing default configuration reads as an empty one.
fn load_config(cli: &Cli) -> Result<Config> {
    if cli.uses_default_config() && !cli.config.exists() {
        debug!("{} not found, no extension fonts configured", cli.config.display());
        return Ok(Config::default());
    }
    Config::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))
}

fn preview(ctx: &MergeContext) -> Result<()> {
    let font = Font::open(&ctx.filename)?;
    let hints = FontSizeHints::compute(&font);
    for line in preview_lines(ctx, &font, &hints) {
        println!("{line}");
    }
    Ok(())
}
