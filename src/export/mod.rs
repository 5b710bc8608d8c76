//! Firmware array export.
//!
//! Turns a binding map into the body of a C array initializer, six codes per
//! row, ready to paste into firmware source.

use crate::models::{BindingMap, BindingStore, Half, SymbolicCode};

/// Codes per output row.
pub const ROW_WIDTH: usize = 6;

/// Default C identifier of the exported array.
pub const DEFAULT_ARRAY_NAME: &str = "input_map";

/// Serializes codes in index order as `CODE,` tokens.
///
/// Tokens on a row are separated by one space, a row ends after every element
/// whose index satisfies `index % 6 == 5`, and the last element always ends its
/// row. Empty codes produce a bare `,` so positions stay aligned. Nothing is
/// escaped.
#[must_use]
pub fn serialize_codes(codes: &[SymbolicCode]) -> String {
    let mut out = String::new();
    for (i, code) in codes.iter().enumerate() {
        if i % ROW_WIDTH != 0 {
            out.push(' ');
        }
        out.push_str(code.as_str());
        out.push(',');
        if i % ROW_WIDTH == ROW_WIDTH - 1 || i + 1 == codes.len() {
            out.push('\n');
        }
    }
    out
}

/// Serializes one half's binding map. See [`serialize_codes`].
#[must_use]
pub fn serialize(map: &BindingMap) -> String {
    serialize_codes(map.as_slice())
}

/// Wraps a serialized map in a `uint8_t name[] = { ... };` declaration.
#[must_use]
pub fn array_literal(name: &str, map: &BindingMap) -> String {
    format!("uint8_t {name}[] = {{\n{}}};\n", serialize(map))
}

/// Which halves an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HalfSelection {
    /// Left half only
    Primary,
    /// Right half only
    Secondary,
    /// Both halves, Primary first
    #[default]
    Both,
}

impl HalfSelection {
    /// Halves covered, in output order.
    #[must_use]
    pub fn halves(self) -> &'static [Half] {
        match self {
            Self::Primary => &[Half::Primary],
            Self::Secondary => &[Half::Secondary],
            Self::Both => &Half::ALL,
        }
    }
}

/// Array literals for the selected halves, each preceded by a comment naming the half.
#[must_use]
pub fn export_store(store: &BindingStore, selection: HalfSelection, array_name: &str) -> String {
    let mut out = String::new();
    for (i, half) in selection.halves().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("// {half} half\n"));
        out.push_str(&array_literal(array_name, store.map(*half)));
    }
    out
}
