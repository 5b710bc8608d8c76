//! Service layer for file I/O.
//!
//! Services keep file handling and error context out of the models and the UI.

pub mod bindings;

pub use bindings::BindingsService;
