//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use splitbind::models::{BindingStore, Half, SymbolicCode};
use splitbind::services::BindingsService;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Path to the splitbind binary
pub fn splitbind_bin() -> &'static str {
    env!("CARGO_BIN_EXE_splitbind")
}

/// Creates a Command whose config directory is an isolated temp dir.
pub fn isolated_command(args: &[&str], config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(splitbind_bin());
    cmd.env("SPLITBIND_CONFIG_DIR", config_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Default bindings with the given slots overridden.
pub fn store_with(overrides: &[(Half, usize, &str)]) -> BindingStore {
    let mut store = BindingStore::default();
    for &(half, index, code) in overrides {
        store.set(half, index, SymbolicCode::from(code));
    }
    store
}

/// Writes `store` to a bindings file in a fresh temp dir.
///
/// # Returns
/// The file path and the `TempDir` keeping it alive.
pub fn create_temp_bindings_file(store: &BindingStore) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("bindings.json");
    BindingsService::save(store, &path).expect("Failed to write bindings file");
    (path, temp_dir)
}

/// Writes raw text as a bindings file, for malformed-input tests.
pub fn create_raw_bindings_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("bindings.json");
    std::fs::write(&path, content).expect("Failed to write bindings file");
    (path, temp_dir)
}
