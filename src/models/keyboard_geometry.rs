//! Physical layout table for the split keyboard.
//!
//! The table is authored once, in Primary-half coordinates, inside a
//! `LAYOUT_WIDTH` × `LAYOUT_HEIGHT` box. The Secondary half reuses it with the
//! x-coordinate mirrored about the box centre and the rotation negated.

use serde::{Deserialize, Serialize};

use super::slot::{Half, Slot, SLOT_COUNT};

/// Width of one half's layout box in layout units.
pub const LAYOUT_WIDTH: f32 = 260.0;

/// Height of one half's layout box in layout units.
pub const LAYOUT_HEIGHT: f32 = 320.0;

/// Edge length of a 1u key in layout units.
pub const KEY_UNIT: f32 = 30.0;

/// Placement of one key inside a half's layout box.
///
/// # Coordinate Conversion (to terminal)
///
/// - Terminal X = `x` / 5 characters per layout unit (a 35-unit key pitch is 7 columns)
/// - Terminal Y = `y` * 3 / 35 lines per layout unit
/// - Both are multiplied by the configured keyboard scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    /// Anchor (key centre) X in layout units
    pub x: f32,
    /// Anchor (key centre) Y in layout units
    pub y: f32,
    /// Horizontal size multiplier of `KEY_UNIT`
    pub xscale: f32,
    /// Vertical size multiplier of `KEY_UNIT`
    pub yscale: f32,
    /// Clockwise rotation about the anchor, in degrees
    pub rotation: f32,
}

impl SlotGeometry {
    /// Creates a 1u, unrotated key at the given anchor.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            xscale: 1.0,
            yscale: 1.0,
            rotation: 0.0,
        }
    }

    /// Sets the size multipliers.
    #[must_use]
    pub const fn with_scale(mut self, xscale: f32, yscale: f32) -> Self {
        self.xscale = xscale;
        self.yscale = yscale;
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Key width in layout units.
    #[must_use]
    pub fn width(&self) -> f32 {
        KEY_UNIT * self.xscale
    }

    /// Key height in layout units.
    #[must_use]
    pub fn height(&self) -> f32 {
        KEY_UNIT * self.yscale
    }

    /// The same key as seen on the other half.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            x: LAYOUT_WIDTH - self.x,
            // Adding 0.0 normalises -0.0 so unrotated keys print as "0"
            rotation: -self.rotation + 0.0,
            ..*self
        }
    }

    /// Whether a point (layout units) lies on this key, taking rotation into account.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        // Rotate the point back into the key's unrotated frame
        let (sin, cos) = (-self.rotation).to_radians().sin_cos();
        let dx = px - self.x;
        let dy = py - self.y;
        let lx = dx * cos - dy * sin;
        let ly = dx * sin + dy * cos;
        lx.abs() <= self.width() / 2.0 && ly.abs() <= self.height() / 2.0
    }

    /// Whether the key is turned far enough that width and height read swapped.
    #[must_use]
    pub fn is_sideways(&self) -> bool {
        let r = self.rotation.rem_euclid(180.0);
        r > 45.0 && r < 135.0
    }
}

const fn key(x: f32, y: f32) -> Option<SlotGeometry> {
    Some(SlotGeometry::new(x, y))
}

const fn tall(x: f32, y: f32) -> Option<SlotGeometry> {
    Some(SlotGeometry::new(x, y).with_scale(1.0, 1.5).with_rotation(20.0))
}

const fn thumb(x: f32, y: f32) -> Option<SlotGeometry> {
    Some(SlotGeometry::new(x, y).with_rotation(80.0))
}

/// Primary-half geometry by slot index. `None` marks indices with no physical key.
const PRIMARY_TABLE: [Option<SlotGeometry>; SLOT_COUNT] = [
    // Number row
    key(35.0, 45.0),
    key(70.0, 45.0),
    key(105.0, 35.0),
    key(140.0, 35.0),
    key(175.0, 40.0),
    key(210.0, 40.0),
    // Top row
    key(35.0, 80.0),
    key(70.0, 80.0),
    key(105.0, 70.0),
    key(140.0, 70.0),
    key(175.0, 75.0),
    key(210.0, 75.0),
    // Home row
    key(35.0, 115.0),
    key(70.0, 115.0),
    key(105.0, 105.0),
    key(140.0, 105.0),
    key(175.0, 110.0),
    key(210.0, 110.0),
    // Bottom row
    key(35.0, 150.0),
    key(70.0, 150.0),
    key(105.0, 140.0),
    key(140.0, 140.0),
    key(175.0, 145.0),
    key(210.0, 145.0),
    None,
    None,
    // Lower row stubs
    key(105.0, 175.0),
    key(140.0, 175.0),
    // Tall thumb keys
    tall(190.0, 195.0),
    tall(220.0, 210.0),
    // Thumb cluster
    thumb(188.0, 262.0),
    thumb(220.0, 255.0),
    thumb(190.0, 295.0),
    thumb(223.0, 290.0),
    None,
    None,
];

/// Static lookup of slot geometry for both halves.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutTable;

impl LayoutTable {
    /// Creates the layout table.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Geometry of a slot, or `None` when the index has no physical key.
    ///
    /// Indices at or beyond `SLOT_COUNT` also return `None`.
    #[must_use]
    pub fn geometry(&self, half: Half, index: usize) -> Option<SlotGeometry> {
        let base = PRIMARY_TABLE.get(index).copied().flatten()?;
        Some(match half {
            Half::Primary => base,
            Half::Secondary => base.mirrored(),
        })
    }

    /// All physically present slots of a half with their geometry, in index order.
    pub fn slots(&self, half: Half) -> impl Iterator<Item = (Slot, SlotGeometry)> + '_ {
        (0..SLOT_COUNT).filter_map(move |index| {
            self.geometry(half, index)
                .map(|geometry| (Slot::new(half, index), geometry))
        })
    }

    /// Number of physically present keys per half.
    #[must_use]
    pub fn key_count(&self) -> usize {
        PRIMARY_TABLE.iter().filter(|g| g.is_some()).count()
    }
}
