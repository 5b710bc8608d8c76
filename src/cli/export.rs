//! Export command: prints or writes the firmware array literals.

use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::common::{load_bindings, CliError, CliResult};
use crate::config::{is_c_identifier, Config};
use crate::export::{export_store, HalfSelection};

/// Export bindings as C array literals
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Which half to export
    #[arg(long, value_enum, default_value_t = HalfSelection::Both)]
    pub half: HalfSelection,

    /// Bindings file (defaults to the configured file, then built-in bindings)
    #[arg(short, long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// C identifier for the array (defaults to `export.array_name`)
    #[arg(long, value_name = "NAME")]
    pub array_name: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let array_name = self.array_name(config)?;
        let store = load_bindings(self.bindings.as_deref(), config)?;
        let text = export_store(&store, self.half, &array_name);

        match &self.output {
            Some(path) => {
                write_output(path, &text)?;
                info!(path = %path.display(), half = ?self.half, "arrays exported");
                println!("✓ Exported to: {}", path.display());
            }
            None => print!("{text}"),
        }
        Ok(())
    }

    /// Array name from the flag or config, checked as a C identifier.
    fn array_name(&self, config: &Config) -> CliResult<String> {
        let Some(name) = &self.array_name else {
            return Ok(config.export.array_name.clone());
        };
        if !is_c_identifier(name) {
            return Err(CliError::validation(format!(
                "--array-name must be a valid C identifier (got '{name}')"
            )));
        }
        Ok(name.clone())
    }
}

fn write_output(path: &Path, text: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("Failed to create {}: {e}", parent.display())))?;
    }
    fs::write(path, text)
        .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::ExitCode;

    fn args(array_name: Option<&str>) -> ExportArgs {
        ExportArgs {
            half: HalfSelection::Both,
            bindings: None,
            output: None,
            array_name: array_name.map(str::to_string),
        }
    }

    #[test]
    fn test_array_name_defaults_to_config() {
        let mut config = Config::default();
        config.export.array_name = "keymap".to_string();
        assert_eq!(args(None).array_name(&config).unwrap(), "keymap");
        assert_eq!(args(Some("left_map")).array_name(&config).unwrap(), "left_map");
    }

    #[test]
    fn test_array_name_rejects_non_identifier() {
        let err = args(Some("1bad-name")).array_name(&Config::default()).unwrap_err();
        assert_eq!(err.kind, ExitCode::Validation);
        assert!(err.message.contains("'1bad-name'"));
        assert!(args(Some("")).array_name(&Config::default()).is_err());
    }
}
