//! Bindings file I/O service.
//!
//! A bindings file is a small JSON document holding both halves' codes:
//!
//! ```json
//! { "primary": ["KC_ESCAPE", "KC_1", ...], "secondary": ["KC_MINUS", ...] }
//! ```
//!
//! Each array must hold exactly `SLOT_COUNT` entries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::{BindingMap, BindingStore, Half, SymbolicCode, SLOT_COUNT};

/// On-disk representation of a [`BindingStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BindingsFile {
    primary: Vec<SymbolicCode>,
    secondary: Vec<SymbolicCode>,
}

/// Service for loading and saving bindings files.
pub struct BindingsService;

impl BindingsService {
    /// Loads a binding store from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid JSON, or either half
    /// does not hold exactly `SLOT_COUNT` codes.
    pub fn load(path: &Path) -> Result<BindingStore> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bindings file {}", path.display()))?;
        let store = Self::from_json(&content)
            .with_context(|| format!("Failed to load bindings from {}", path.display()))?;
        info!(path = %path.display(), "bindings loaded");
        Ok(store)
    }

    /// Parses a binding store from JSON text.
    pub fn from_json(content: &str) -> Result<BindingStore> {
        let file: BindingsFile = serde_json::from_str(content).context("Invalid bindings JSON")?;
        let primary = Self::to_map(Half::Primary, file.primary)?;
        let secondary = Self::to_map(Half::Secondary, file.secondary)?;
        Ok(BindingStore::new(primary, secondary))
    }

    fn to_map(half: Half, codes: Vec<SymbolicCode>) -> Result<BindingMap> {
        let len = codes.len();
        BindingMap::from_codes(codes).with_context(|| {
            format!("{half} half has {len} codes, expected exactly {SLOT_COUNT}")
        })
    }

    /// Serializes a binding store to pretty JSON.
    pub fn to_json(store: &BindingStore) -> Result<String> {
        let file = BindingsFile {
            primary: store.map(Half::Primary).as_slice().to_vec(),
            secondary: store.map(Half::Secondary).as_slice().to_vec(),
        };
        serde_json::to_string_pretty(&file).context("Failed to serialize bindings")
    }

    /// Saves a binding store using a temp file + rename so the target is never
    /// left half-written.
    pub fn save(store: &BindingStore, path: &Path) -> Result<()> {
        let content = Self::to_json(store)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save bindings to {}", path.display()))?;

        debug!(path = %path.display(), "bindings saved");
        Ok(())
    }

    /// Loads `path` when given, otherwise returns the default bindings.
    pub fn load_or_default(path: Option<&Path>) -> Result<BindingStore> {
        path.map_or_else(|| Ok(BindingStore::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bindings.json");

        let mut store = BindingStore::default();
        store.set(Half::Secondary, 9, SymbolicCode::from("MO(1)"));
        BindingsService::save(&store, &path).unwrap();

        let loaded = BindingsService::load(&path).unwrap();
        assert_eq!(loaded, store);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_rejects_wrong_length() {
        let json = r#"{ "primary": ["KC_A"], "secondary": [] }"#;
        let err = BindingsService::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("Primary half has 1 codes"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = BindingsService::load(&temp_dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read bindings file"));
    }

    #[test]
    fn test_blank_codes_survive() {
        let json = BindingsService::to_json(&BindingStore::default()).unwrap();
        let store = BindingsService::from_json(&json).unwrap();
        assert!(store.code(Half::Secondary, 24).is_blank());
    }

    #[test]
    fn test_load_or_default() {
        let store = BindingsService::load_or_default(None).unwrap();
        assert_eq!(store, BindingStore::default());
    }
}
