//! Keyboard halves and slot identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of slots in each half's binding map.
pub const SLOT_COUNT: usize = 36;

/// One of the two physical halves of the split keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    /// Left half, the one the layout table is authored for
    Primary,
    /// Right half, drawn mirrored
    Secondary,
}

impl Half {
    /// Both halves in display order.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Returns the other half.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Lowercase identifier used in file names and CLI arguments.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::Secondary => write!(f, "Secondary"),
        }
    }
}

impl FromStr for Half {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "left" | "p" => Ok(Self::Primary),
            "secondary" | "right" | "s" => Ok(Self::Secondary),
            other => anyhow::bail!("Unknown half '{other}' (expected primary or secondary)"),
        }
    }
}

/// A physical key position: which half, and which index in that half's binding map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Keyboard half
    pub half: Half,
    /// Index into the half's binding map, in `[0, SLOT_COUNT)`
    pub index: usize,
}

impl Slot {
    /// Creates a slot identifier.
    #[must_use]
    pub const fn new(half: Half, index: usize) -> Self {
        Self { half, index }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.half, self.index)
    }
}
