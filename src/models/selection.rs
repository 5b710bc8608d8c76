//! Edit-target state machine.
//!
//! ```text
//!   Idle ──open(slot)──▶ Editing(slot) ──commit(code)──▶ Idle
//! ```
//!
//! There is no cancel edge: the only way out of `Editing` is `commit`.
//! What happens when `open` is requested while already editing is decided by
//! [`ReselectPolicy`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::binding::{BindingMap, BindingStore, SymbolicCode};
use super::slot::{Half, Slot};

/// Current edit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing is being edited
    #[default]
    Idle,
    /// The editor is open for this slot
    Editing(Slot),
}

impl Selection {
    /// The slot being edited, if any.
    #[must_use]
    pub const fn slot(&self) -> Option<Slot> {
        match self {
            Self::Idle => None,
            Self::Editing(slot) => Some(*slot),
        }
    }

    /// True while the editor is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

/// Behavior of `open` while an edit is already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReselectPolicy {
    /// Drop the pending edit without committing and open the new slot
    #[default]
    LastActionWins,
    /// Ignore the request; the current edit must be committed first
    KeepCurrent,
}

/// Result of an `open` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Editor opened from idle
    Opened,
    /// A pending edit on the given slot was abandoned in favour of the new one
    Replaced(Slot),
    /// The request was ignored because of [`ReselectPolicy::KeepCurrent`]
    Ignored,
}

/// Owner and sole writer of the [`Selection`].
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: Selection,
    policy: ReselectPolicy,
}

impl SelectionMachine {
    /// Creates an idle machine with the given reselect policy.
    #[must_use]
    pub const fn new(policy: ReselectPolicy) -> Self {
        Self {
            state: Selection::Idle,
            policy,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> Selection {
        self.state
    }

    /// Active reselect policy.
    #[must_use]
    pub const fn policy(&self) -> ReselectPolicy {
        self.policy
    }

    /// Changes the reselect policy. Does not affect the current state.
    pub fn set_policy(&mut self, policy: ReselectPolicy) {
        self.policy = policy;
    }

    /// Opens the editor on a slot.
    pub fn open(&mut self, half: Half, index: usize) -> OpenOutcome {
        let slot = Slot::new(half, index);
        match (self.state, self.policy) {
            (Selection::Idle, _) => {
                debug!(%slot, "selection opened");
                self.state = Selection::Editing(slot);
                OpenOutcome::Opened
            }
            (Selection::Editing(previous), ReselectPolicy::LastActionWins) => {
                info!(%previous, %slot, "pending edit abandoned by reselect");
                self.state = Selection::Editing(slot);
                OpenOutcome::Replaced(previous)
            }
            (Selection::Editing(current), ReselectPolicy::KeepCurrent) => {
                debug!(%current, requested = %slot, "reselect ignored while editing");
                OpenOutcome::Ignored
            }
        }
    }

    /// Alias of [`SelectionMachine::open`], named after the click gesture.
    pub fn select(&mut self, half: Half, index: usize) -> OpenOutcome {
        self.open(half, index)
    }

    /// Writes `code` to the slot being edited and returns to idle.
    ///
    /// Returns the half's updated map, or `None` (and changes nothing) when idle.
    pub fn commit(&mut self, store: &mut BindingStore, code: SymbolicCode) -> Option<BindingMap> {
        let Selection::Editing(slot) = self.state else {
            debug!("commit ignored: nothing selected");
            return None;
        };
        info!(%slot, code = %code, "binding committed");
        let updated = store.set(slot.half, slot.index, code);
        self.state = Selection::Idle;
        Some(updated)
    }
}
