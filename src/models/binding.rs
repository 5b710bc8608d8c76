//! Symbolic key codes and the per-half binding maps that hold them.
//!
//! Binding maps are copy-on-write: replacing one element produces a new map and
//! leaves every previously handed-out view untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use super::slot::{Half, SLOT_COUNT};

/// Opaque key-code token, e.g. `KC_A`.
///
/// Two values carry meaning of their own: [`SymbolicCode::NO`] marks an
/// unassigned key and the empty string marks a slot with no physical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolicCode(String);

impl SymbolicCode {
    /// The "no operation" keycode.
    pub const NO: &'static str = "KC_NO";

    /// Creates a code from any text. No vocabulary check is performed.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The blank code (slot physically absent).
    #[must_use]
    pub const fn blank() -> Self {
        Self(String::new())
    }

    /// The code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty "absent slot" token.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// True for `KC_NO`.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        self.0 == Self::NO
    }
}

impl fmt::Display for SymbolicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolicCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SymbolicCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for SymbolicCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SymbolicCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Fixed-length, immutable sequence of codes for one half.
///
/// Cloning is cheap (shared buffer). [`BindingMap::with_code`] returns a new map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingMap {
    codes: Arc<[SymbolicCode]>,
}

impl BindingMap {
    /// Builds a map from exactly `SLOT_COUNT` codes.
    ///
    /// Returns `None` when the length is wrong.
    #[must_use]
    pub fn from_codes(codes: Vec<SymbolicCode>) -> Option<Self> {
        (codes.len() == SLOT_COUNT).then(|| Self {
            codes: codes.into(),
        })
    }

    /// Builds a map from a constant table.
    #[must_use]
    pub fn from_strs(codes: &[&str; SLOT_COUNT]) -> Self {
        Self {
            codes: codes.iter().map(|c| SymbolicCode::from(*c)).collect(),
        }
    }

    /// Number of slots (always `SLOT_COUNT`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SymbolicCode> {
        self.codes.get(index)
    }

    /// Codes in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, SymbolicCode> {
        self.codes.iter()
    }

    /// The codes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SymbolicCode] {
        &self.codes
    }

    /// Returns a new map with `index` replaced by `code`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SLOT_COUNT`. Indices come from the layout table, so an
    /// out-of-range value means the wiring is broken.
    #[must_use]
    pub fn with_code(&self, index: usize, code: SymbolicCode) -> Self {
        assert!(
            index < self.codes.len(),
            "slot index {index} out of range for binding map of length {}",
            self.codes.len()
        );
        let mut codes = self.codes.to_vec();
        codes[index] = code;
        Self {
            codes: codes.into(),
        }
    }
}

impl Index<usize> for BindingMap {
    type Output = SymbolicCode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.codes[index]
    }
}

impl<'a> IntoIterator for &'a BindingMap {
    type Item = &'a SymbolicCode;
    type IntoIter = std::slice::Iter<'a, SymbolicCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Default left-half assignment.
#[rustfmt::skip]
pub const DEFAULT_PRIMARY: [&str; SLOT_COUNT] = [
    "KC_ESCAPE", "KC_1", "KC_2", "KC_3", "KC_4", "KC_5",
    "KC_GRAVE", "KC_Q", "KC_W", "KC_E", "KC_R", "KC_T",
    "KC_TAB", "KC_A", "KC_S", "KC_D", "KC_F", "KC_G",
    "KC_LSHIFT", "KC_Z", "KC_X", "KC_C", "KC_V", "KC_B",
    "KC_NO", "KC_NO", "KC_TAB", "KC_BSLASH", "KC_DELETE", "KC_LSHIFT",
    "KC_SPACE", "KC_LCTRL", "KC_ENTER", "KC_LALT", "KC_NO", "KC_NO",
];

/// Default right-half assignment, in mirrored index order (index 0 is the outer column).
#[rustfmt::skip]
pub const DEFAULT_SECONDARY: [&str; SLOT_COUNT] = [
    "KC_MINUS", "KC_0", "KC_9", "KC_8", "KC_7", "KC_6",
    "KC_EQUAL", "KC_P", "KC_O", "KC_I", "KC_U", "KC_Y",
    "KC_QUOTE", "KC_SCOLON", "KC_L", "KC_K", "KC_J", "KC_H",
    "KC_RSHIFT", "KC_SLASH", "KC_DOT", "KC_COMMA", "KC_M", "KC_N",
    "", "", "KC_RBRACKET", "KC_LBRACKET", "KC_BSPACE", "KC_SPACE",
    "KC_PGDOWN", "KC_RCTRL", "KC_RGUI", "KC_RALT", "", "",
];

/// Owner of both halves' binding maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingStore {
    primary: BindingMap,
    secondary: BindingMap,
}

impl Default for BindingStore {
    fn default() -> Self {
        Self::new(
            BindingMap::from_strs(&DEFAULT_PRIMARY),
            BindingMap::from_strs(&DEFAULT_SECONDARY),
        )
    }
}

impl BindingStore {
    /// Creates a store from two maps.
    #[must_use]
    pub const fn new(primary: BindingMap, secondary: BindingMap) -> Self {
        Self { primary, secondary }
    }

    /// Read-only view of a half's map. The returned value never changes.
    #[must_use]
    pub fn get(&self, half: Half) -> BindingMap {
        self.map(half).clone()
    }

    /// Borrowed view of a half's map.
    #[must_use]
    pub const fn map(&self, half: Half) -> &BindingMap {
        match half {
            Half::Primary => &self.primary,
            Half::Secondary => &self.secondary,
        }
    }

    /// Code currently bound at a slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SLOT_COUNT`.
    #[must_use]
    pub fn code(&self, half: Half, index: usize) -> &SymbolicCode {
        &self.map(half)[index]
    }

    /// Replaces one code and returns the half's new map.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SLOT_COUNT`.
    pub fn set(&mut self, half: Half, index: usize, code: SymbolicCode) -> BindingMap {
        let updated = self.map(half).with_code(index, code);
        match half {
            Half::Primary => self.primary = updated.clone(),
            Half::Secondary => self.secondary = updated.clone(),
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_fixed_length() {
        let store = BindingStore::default();
        assert_eq!(store.get(Half::Primary).len(), SLOT_COUNT);
        assert_eq!(store.get(Half::Secondary).len(), SLOT_COUNT);
        assert_eq!(store.code(Half::Primary, 0), "KC_ESCAPE");
    }

    #[test]
    fn test_secondary_defaults_follow_mirrored_order() {
        assert_eq!(
            &DEFAULT_SECONDARY[..6],
            &["KC_MINUS", "KC_0", "KC_9", "KC_8", "KC_7", "KC_6"]
        );
        let blanks: Vec<usize> = (0..SLOT_COUNT)
            .filter(|&i| DEFAULT_SECONDARY[i].is_empty())
            .collect();
        assert_eq!(blanks, vec![24, 25, 34, 35]);
    }

    #[test]
    fn test_set_replaces_only_one_index() {
        let mut store = BindingStore::default();
        let before = store.get(Half::Primary);
        let after = store.set(Half::Primary, 7, SymbolicCode::from("KC_A"));

        assert_eq!(after[7], "KC_A");
        for i in (0..SLOT_COUNT).filter(|&i| i != 7) {
            assert_eq!(after[i], before[i], "index {i} changed");
        }
        assert_eq!(store.get(Half::Primary), after);
        // Secondary untouched
        assert_eq!(store.get(Half::Secondary), BindingStore::default().get(Half::Secondary));
    }

    #[test]
    fn test_prior_views_stay_valid() {
        let mut store = BindingStore::default();
        let view = store.get(Half::Secondary);
        store.set(Half::Secondary, 0, SymbolicCode::from("KC_X"));
        assert_eq!(view[0], "KC_MINUS");
        assert_eq!(store.code(Half::Secondary, 0), "KC_X");
    }

    #[test]
    fn test_set_accepts_arbitrary_text() {
        let mut store = BindingStore::default();
        store.set(Half::Primary, 1, SymbolicCode::from("  not a keycode "));
        assert_eq!(store.code(Half::Primary, 1), "  not a keycode ");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_panics() {
        let mut store = BindingStore::default();
        store.set(Half::Primary, SLOT_COUNT, SymbolicCode::from("KC_A"));
    }

    #[test]
    fn test_from_codes_rejects_wrong_length() {
        assert!(BindingMap::from_codes(vec![SymbolicCode::from("KC_A"); 3]).is_none());
        assert!(BindingMap::from_codes(vec![SymbolicCode::blank(); SLOT_COUNT]).is_some());
    }

    #[test]
    fn test_sentinels() {
        assert!(SymbolicCode::blank().is_blank());
        assert!(SymbolicCode::from("KC_NO").is_no_op());
        assert!(!SymbolicCode::from("KC_A").is_no_op());
    }
}
