//! Shared CLI plumbing: error type and process exit codes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::BindingStore;
use crate::services::BindingsService;

/// Process exit codes used by all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: invalid arguments, config values or bindings
    Validation = 1,
    /// Filesystem or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process ends with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Numeric exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Config file in effect: `--config` when given, otherwise the default location.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate config directory: {e:#}"))),
    }
}

/// Loads the config in effect. A missing file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<Config> {
    let path = config_path(explicit)?;
    Config::load_from(&path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Loads bindings from `--bindings`, else the configured file, else the defaults.
///
/// An explicit path must exist. A configured path that has not been saved yet
/// yields the defaults, as in the editor.
pub fn load_bindings(explicit: Option<&Path>, config: &Config) -> CliResult<BindingStore> {
    let path = explicit.or_else(|| {
        config
            .paths
            .bindings_file
            .as_deref()
            .filter(|path| path.exists())
    });
    BindingsService::load_or_default(path).map_err(|e| CliError::validation(format!("{e:#}")))
}
