//! SplitBind library
//!
//! Core of an interactive key binding editor for a two-half split keyboard:
//! the physical layout table, the per-half binding maps, the selection state
//! machine, scene rendering (terminal and SVG) and the firmware array export.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod keycode_db;
pub mod logging;
pub mod models;
pub mod render;
pub mod services;
pub mod shortcuts;
pub mod tui;
