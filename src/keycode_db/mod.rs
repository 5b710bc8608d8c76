//! Keycode catalogue and label resolution.
//!
//! The renderer never looks labels up directly; it goes through the
//! [`LabelResolver`] trait so tests can inject a stub vocabulary. [`KeycodeDb`]
//! is the default implementation, backed by an embedded `keycodes.json`.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves a symbolic code to a short display label.
pub trait LabelResolver {
    /// Label for `code`, or `None` when the code is unknown.
    fn label_for(&self, code: &str) -> Option<String>;
}

impl LabelResolver for HashMap<String, String> {
    fn label_for(&self, code: &str) -> Option<String> {
        self.get(code).cloned()
    }
}

/// Resolver that echoes every code back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodes;

impl LabelResolver for RawCodes {
    fn label_for(&self, code: &str) -> Option<String> {
        Some(code.to_string())
    }
}

/// Individual keycode definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeycodeDefinition {
    /// Canonical keycode (e.g., "`KC_A`", "MO()")
    pub code: String,
    /// Short in-key label (e.g., "A", "Bksp")
    pub label: String,
    /// Human-readable name (e.g., "Backspace")
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Regex for parameterized keycodes (e.g., "^MO\\((\\d+)\\)$")
    #[serde(default)]
    pub pattern: Option<String>,
    /// Alternative keycode names
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from keycodes.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeycodeDatabase {
    keycodes: Vec<KeycodeDefinition>,
}

/// Keycode catalogue with O(1) lookup by code or alias.
#[derive(Debug, Clone)]
pub struct KeycodeDb {
    /// All keycode definitions
    keycodes: Vec<KeycodeDefinition>,
    /// Lookup by code and alias
    lookup: HashMap<String, usize>,
    /// Compiled patterns for parameterized keycodes, with the owning definition index
    patterns: Vec<(usize, Regex)>,
}

impl KeycodeDb {
    /// Loads the keycode database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("keycodes.json"))
            .context("Failed to parse embedded keycodes.json")
    }

    /// Builds a database from a JSON document with the keycodes.json schema.
    pub fn from_json(json_data: &str) -> Result<Self> {
        let db: KeycodeDatabase = serde_json::from_str(json_data)?;

        let mut lookup = HashMap::new();
        let mut patterns = Vec::new();

        for (idx, keycode) in db.keycodes.iter().enumerate() {
            lookup.insert(keycode.code.clone(), idx);
            for alias in &keycode.aliases {
                lookup.insert(alias.clone(), idx);
            }

            if let Some(pattern) = &keycode.pattern {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid pattern for {}: {pattern}", keycode.code))?;
                patterns.push((idx, regex));
            }
        }

        Ok(Self {
            keycodes: db.keycodes,
            lookup,
            patterns,
        })
    }

    /// True if the code, an alias, or a parameterized form (e.g. `MO(5)`) is known.
    #[must_use]
    pub fn is_valid(&self, keycode: &str) -> bool {
        self.lookup.contains_key(keycode) || self.patterns.iter().any(|(_, re)| re.is_match(keycode))
    }

    /// Definition for a code or alias.
    #[must_use]
    pub fn get(&self, keycode: &str) -> Option<&KeycodeDefinition> {
        let idx = self.lookup.get(keycode)?;
        self.keycodes.get(*idx)
    }

    /// Label for a parameterized code such as `MO(2)` or `LT(1, KC_A)`.
    fn pattern_label(&self, keycode: &str) -> Option<String> {
        self.patterns.iter().find_map(|(idx, regex)| {
            let caps = regex.captures(keycode)?;
            let def = self.keycodes.get(*idx)?;
            let params: Vec<String> = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| {
                    let param = m.as_str();
                    self.get(param)
                        .map_or_else(|| param.to_string(), |d| d.label.clone())
                })
                .collect();
            Some(format!("{}{}", def.label, params.join(" ")))
        })
    }
}

impl LabelResolver for KeycodeDb {
    fn label_for(&self, code: &str) -> Option<String> {
        self.get(code)
            .map(|def| def.label.clone())
            .or_else(|| self.pattern_label(code))
    }
}
