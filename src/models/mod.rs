//! Data models for the split keyboard: slots, layout geometry, bindings and selection.
//!
//! Models are independent of UI and I/O.

pub mod binding;
pub mod keyboard_geometry;
pub mod selection;
pub mod slot;

// Re-export all model types
pub use binding::{BindingMap, BindingStore, SymbolicCode, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
pub use keyboard_geometry::{LayoutTable, SlotGeometry, KEY_UNIT, LAYOUT_HEIGHT, LAYOUT_WIDTH};
pub use selection::{OpenOutcome, ReselectPolicy, Selection, SelectionMachine};
pub use slot::{Half, Slot, SLOT_COUNT};
