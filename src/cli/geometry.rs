//! Geometry command: dumps the physical layout table.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::export::HalfSelection;
use crate::models::{Half, LayoutTable, SLOT_COUNT};

/// Print key positions for one or both halves
#[derive(Debug, Clone, Args)]
pub struct GeometryArgs {
    /// Which half to print
    #[arg(long, value_enum, default_value_t = HalfSelection::Both)]
    pub half: HalfSelection,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One row of JSON output.
#[derive(Debug, Serialize)]
struct SlotRow {
    half: Half,
    index: usize,
    x: f32,
    y: f32,
    xscale: f32,
    yscale: f32,
    rotation: f32,
}

impl GeometryArgs {
    /// Execute the geometry command
    pub fn execute(&self) -> CliResult<()> {
        let table = LayoutTable::new();

        if self.json {
            let rows: Vec<SlotRow> = self
                .half
                .halves()
                .iter()
                .flat_map(|&half| table.slots(half))
                .map(|(slot, g)| SlotRow {
                    half: slot.half,
                    index: slot.index,
                    x: g.x,
                    y: g.y,
                    xscale: g.xscale,
                    yscale: g.yscale,
                    rotation: g.rotation,
                })
                .collect();
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        for &half in self.half.halves() {
            println!("{half} half ({} keys)", table.slots(half).count());
            for index in 0..SLOT_COUNT {
                match table.geometry(half, index) {
                    Some(g) => println!(
                        "  #{index:<2}  x={:>6.1}  y={:>6.1}  {}x{}  rot={}",
                        g.x, g.y, g.xscale, g.yscale, g.rotation
                    ),
                    None => println!("  #{index:<2}  (no key)"),
                }
            }
        }
        Ok(())
    }
}
