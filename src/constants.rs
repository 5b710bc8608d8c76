//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and directory names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "SplitBind";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "splitbind";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "SplitBind";

/// Log file written while the interactive editor owns the terminal.
pub const LOG_FILE_NAME: &str = "splitbind.log";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "SPLITBIND_CONFIG_DIR";
