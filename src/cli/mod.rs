//! CLI command handlers.
//!
//! Headless, scriptable access to export, rendering and configuration.

pub mod common;
pub mod config;
pub mod export;
pub mod geometry;
pub mod svg;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use geometry::GeometryArgs;
pub use svg::SvgArgs;
