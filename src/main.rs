//! Codebook - interactive launcher for codebook chapters
//!
//! Browse chapter groups with the arrow keys and run the selected chapter
//! through the configured run tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codebook::cli::{CliContext, CliError, DoctorArgs, ListArgs, RunArgs};
use codebook::config::Config;
use codebook::constants::APP_BINARY_NAME;
use codebook::logging;
use codebook::menu::TerminalKeys;
use codebook::navigator::Launcher;
use codebook::runner::ProcessRunner;
use codebook::theme::Theme;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

/// Codebook - browse and run codebook chapters
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Chapters root directory (defaults to ../chapters)
    #[arg(long, value_name = "PATH", global = true)]
    chapters: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List groups and chapters
    List(ListArgs),
    /// Run a single chapter
    Run(RunArgs),
    /// Check the run tool and chapters root
    Doctor(DoctorArgs),
}

/// Loads the explicit config file strictly, or the default one leniently.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => match Config::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("Warning: Failed to load config: {e:#}");
                eprintln!("Using default settings.");
                eprintln!();
                Ok(Config::default())
            }
        },
    }
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(err.code.code());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, logging::default_log_path().as_deref());

    let config = load_config(cli.config.as_ref())?;
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let ctx = CliContext {
        chapters_root: config.chapters_root(cli.chapters.as_deref(), &cwd),
        config,
    };

    match cli.command {
        Some(Command::List(args)) => {
            if let Err(e) = args.execute(&ctx) {
                exit_with(&e);
            }
        }
        Some(Command::Run(args)) => match args.execute(&ctx) {
            Ok(outcome) => {
                if !outcome.success() {
                    warn!(%outcome, "chapter did not exit cleanly");
                    std::process::exit(outcome.exit_code.unwrap_or(1));
                }
            }
            Err(e) => exit_with(&e),
        },
        Some(Command::Doctor(args)) => {
            if let Err(e) = args.execute(&ctx) {
                exit_with(&e);
            }
        }
        None => {
            info!(root = %ctx.chapters_root.display(), "starting interactive launcher");
            let runner = ProcessRunner::new(ctx.config.runner.to_command());
            let theme = Theme::from_mode(ctx.config.ui.theme_mode);
            let mut launcher =
                Launcher::new(ctx.chapters_root, TerminalKeys, runner, io::stdout(), theme);
            launcher.run()?;
        }
    }

    Ok(())
}
