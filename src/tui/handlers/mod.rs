//! Input handler modules for different TUI contexts.

pub mod editor;
pub mod main;
pub mod popups;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::tui::AppState;

pub use editor::handle_editor_input;
pub use main::handle_main_input;
pub use popups::handle_popup_input;

/// Routes a key press to the error overlay, a popup, the binding editor or
/// the main screen, in that order.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<()> {
    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(());
    }

    if state.active_popup.is_some() {
        return handle_popup_input(state, key);
    }

    if state.selection.state().is_editing() {
        return handle_editor_input(state, key);
    }

    handle_main_input(state, key)
}

/// A left click on a key selects it, whether or not an edit is open.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.error_message.is_some() || state.active_popup.is_some() {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let viewport = state.viewport_for(state.keyboard_inner_area());
    if let Some(slot) = viewport.slot_at(&state.scene(), mouse.column, mouse.row) {
        state.select_slot(slot);
    }
}
