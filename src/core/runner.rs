//! Application runner logic
//!
//! Loads settings, installs logging and dispatches the chosen subcommand.

use crate::commands::{cmap_diff, convert, diff, merge_svg, optimize};
use crate::core::cli::{CliArgs, Command};
use crate::core::config_file::ConfigFile;
use crate::engine::FontForgeEngine;
use crate::logging::{self, LogOptions};
use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use tracing::{debug, warn};

fn locate_engine(config: &ConfigFile) -> Result<FontForgeEngine> {
    let engine = FontForgeEngine::locate(config.fontforge_path.as_deref())?;
    debug!("Using FontForge at {}", engine.executable().display());
    Ok(engine)
}

/// Run fontsmith with the given CLI arguments.
pub async fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    // A broken settings file should not stop the tools from working
    let (config, config_error) = match ConfigFile::load() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };

    let _log_guard = logging::init(LogOptions {
        verbose: cli_args.verbose,
        to_file: cli_args.log_file || config.log_to_file.unwrap_or(false),
    });
    if let Some(e) = config_error {
        warn!("Ignoring settings file: {:#}", e);
    }

    let Some(command) = cli_args.command else {
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Command::Convert(args) => {
            if args.list_formats {
                print!("{}", convert::format_list());
                return Ok(());
            }
            let Some(options) = args.resolve(&config) else {
                bail!("No input font given");
            };
            let engine = locate_engine(&config)?;
            convert::run(&engine, &options).await?;
        }
        Command::CmapDiff(args) => {
            cmap_diff::run(&args.into())?;
        }
        Command::Diff(args) => {
            diff::run(&args.into())?;
        }
        Command::MergeSvg(args) => {
            let engine = locate_engine(&config)?;
            merge_svg::run(&engine, &args.into()).await?;
        }
        Command::Optimize(args) => {
            let Some(options) = args.resolve(&config) else {
                print!("{}", optimize::usage_guide());
                bail!("No font file given");
            };
            let engine = locate_engine(&config)?;
            optimize::run(&engine, &options).await?;
        }
    }
    Ok(())
}
