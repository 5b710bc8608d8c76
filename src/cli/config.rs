//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::cli::common::{config_path, load_config, CliError, CliResult};
use crate::config::Config;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file location
    Path,
    /// Set one value, e.g. `config set editor.reselect keep-current`
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set a configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key: paths.bindings_file, ui.theme_mode, ui.keyboard_scale,
    /// editor.reselect, editor.validate_codes, export.array_name
    key: String,
    /// New value (empty clears `paths.bindings_file`)
    value: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, explicit: Option<&Path>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(explicit),
            ConfigCommand::Path => {
                println!("{}", config_path(explicit)?.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(explicit),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, explicit: Option<&Path>) -> CliResult<()> {
        let config = load_config(explicit)?;

        if self.json {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, explicit: Option<&Path>) -> CliResult<()> {
        let path: PathBuf = config_path(explicit)?;
        let mut config = load_config(explicit)?;

        config
            .set_value(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("✓ {} = {}", self.key, self.value);
        Ok(())
    }
}

fn output_human_readable(config: &Config) {
    println!("Paths:");
    println!(
        "  bindings_file: {}",
        config
            .paths
            .bindings_file
            .as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    );
    println!("UI:");
    println!("  theme_mode: {:?}", config.ui.theme_mode);
    println!("  keyboard_scale: {}", config.ui.keyboard_scale);
    println!("Editor:");
    println!("  reselect: {:?}", config.editor.reselect);
    println!("  validate_codes: {}", config.editor.validate_codes);
    println!("Export:");
    println!("  array_name: {}", config.export.array_name);
}
