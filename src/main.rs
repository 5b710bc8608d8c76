//! SplitBind - terminal editor for split keyboard input maps
//!
//! Without a subcommand the interactive editor starts. Subcommands give
//! headless access to export, SVG rendering, geometry and configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use splitbind::cli::{CliResult, ConfigArgs, ExportArgs, GeometryArgs, SvgArgs};
use splitbind::config::Config;
use splitbind::constants::{APP_BINARY_NAME, LOG_FILE_NAME};
use splitbind::models::BindingStore;
use splitbind::services::BindingsService;
use splitbind::{cli, logging, tui};

/// SplitBind - terminal editor for split keyboard input maps
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Bindings file to edit (created on first save if missing)
    #[arg(short, long, value_name = "FILE")]
    bindings: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print or write the firmware array literals
    Export(ExportArgs),
    /// Render both halves as SVG files
    Svg(SvgArgs),
    /// Print the physical layout table
    Geometry(GeometryArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return run_editor(cli.bindings, cli.config.as_deref(), cli.verbose);
    };

    logging::init_stderr(cli.verbose);
    if let Err(e) = run_command(command, cli.config.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

fn run_command(command: Commands, config_path: Option<&Path>) -> CliResult<()> {
    match command {
        Commands::Export(args) => args.execute(&cli::common::load_config(config_path)?),
        Commands::Svg(args) => args.execute(&cli::common::load_config(config_path)?),
        Commands::Geometry(args) => args.execute(),
        Commands::Config(args) => args.execute(config_path),
    }
}

fn run_editor(bindings: Option<PathBuf>, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // The editor owns the terminal, so logs go to a file
    let log_path = Config::config_dir()?.join(LOG_FILE_NAME);
    if let Err(e) = logging::init_file(&log_path, verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let bindings_path = bindings.or_else(|| config.paths.bindings_file.clone());
    let store = match &bindings_path {
        Some(path) if path.exists() => BindingsService::load(path)?,
        _ => BindingStore::default(),
    };

    let mut app_state = tui::AppState::new(store, bindings_path, config)?;

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut app_state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result.context("Editor exited with an error")
}
