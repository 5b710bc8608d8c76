//! Back-end independent keyboard scene.
//!
//! [`render_scene`] is a pure function of the layout table, the binding store,
//! the selection and a label resolver. The terminal and SVG back-ends both draw
//! from the resulting [`Scene`]; neither keeps state of its own.

pub mod svg;

use crate::keycode_db::LabelResolver;
use crate::models::{BindingStore, Half, LayoutTable, Selection, Slot, SlotGeometry};

/// Label size class, picked from the label's length so it fits a fixed-size key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontTier {
    /// Up to 2 characters
    Large,
    /// 3 to 6 characters
    Medium,
    /// 7 or more characters
    Small,
}

impl FontTier {
    /// Tier for a label of `len` characters.
    #[must_use]
    pub const fn for_len(len: usize) -> Self {
        if len <= 2 {
            Self::Large
        } else if len <= 6 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    /// Tier for a label, counted in characters rather than bytes.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        Self::for_len(label.chars().count())
    }

    /// Font size in layout units.
    #[must_use]
    pub const fn point_size(self) -> u8 {
        match self {
            Self::Large => 16,
            Self::Medium => 8,
            Self::Small => 6,
        }
    }
}

/// One drawable key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyShape {
    /// Which slot this key belongs to
    pub slot: Slot,
    /// Placement within the half's layout box
    pub geometry: SlotGeometry,
    /// Text shown on the key (empty when the code has no label)
    pub label: String,
    /// Label size class
    pub tier: FontTier,
    /// Whether this key is the current edit target
    pub selected: bool,
}

/// Everything needed to draw both halves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Keys of the Primary half, in slot order
    pub primary: Vec<KeyShape>,
    /// Keys of the Secondary half, in slot order
    pub secondary: Vec<KeyShape>,
}

impl Scene {
    /// Keys of one half.
    #[must_use]
    pub fn keys(&self, half: Half) -> &[KeyShape] {
        match half {
            Half::Primary => &self.primary,
            Half::Secondary => &self.secondary,
        }
    }

    /// Key shape for a slot, if the slot is physically present.
    #[must_use]
    pub fn key(&self, slot: Slot) -> Option<&KeyShape> {
        self.keys(slot.half).iter().find(|k| k.slot == slot)
    }

    /// Slot under a point given in the half's layout units.
    ///
    /// Later keys win when shapes overlap, matching paint order.
    #[must_use]
    pub fn hit_test(&self, half: Half, x: f32, y: f32) -> Option<Slot> {
        self.keys(half)
            .iter()
            .rev()
            .find(|k| k.geometry.contains(x, y))
            .map(|k| k.slot)
    }
}

/// Composes the layout table, bindings and selection into a [`Scene`].
pub fn render_scene(
    table: &LayoutTable,
    store: &BindingStore,
    selection: Selection,
    resolver: &dyn LabelResolver,
) -> Scene {
    let selected = selection.slot();
    let half_keys = |half: Half| -> Vec<KeyShape> {
        let map = store.map(half);
        table
            .slots(half)
            .map(|(slot, geometry)| {
                let label = map
                    .get(slot.index)
                    .and_then(|code| resolver.label_for(code.as_str()))
                    .unwrap_or_default();
                KeyShape {
                    slot,
                    geometry,
                    tier: FontTier::for_label(&label),
                    label,
                    selected: selected == Some(slot),
                }
            })
            .collect()
    };

    Scene {
        primary: half_keys(Half::Primary),
        secondary: half_keys(Half::Secondary),
    }
}
