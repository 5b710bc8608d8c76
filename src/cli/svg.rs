//! SVG command: writes one drawing per half.

use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::cli::common::{load_bindings, CliError, CliResult};
use crate::config::Config;
use crate::keycode_db::KeycodeDb;
use crate::models::{Half, LayoutTable, Selection};
use crate::render::{render_scene, svg::render_half_svg};

/// Render both halves as SVG files
#[derive(Debug, Clone, Args)]
pub struct SvgArgs {
    /// Directory that receives `primary.svg` and `secondary.svg`
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Bindings file (defaults to the configured file, then built-in bindings)
    #[arg(short, long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,
}

impl SvgArgs {
    /// Execute the svg command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let store = load_bindings(self.bindings.as_deref(), config)?;
        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;
        let scene = render_scene(&LayoutTable::new(), &store, Selection::Idle, &keycode_db);

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create {}: {e}",
                self.output_dir.display()
            ))
        })?;

        for half in Half::ALL {
            let path = self.output_dir.join(format!("{}.svg", half.id()));
            fs::write(&path, render_half_svg(&scene, half))
                .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
            info!(path = %path.display(), %half, "svg written");
            println!("✓ Wrote {}", path.display());
        }
        Ok(())
    }
}
