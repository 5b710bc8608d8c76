//! Main UI input handler.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::shortcuts::{Action, ShortcutRegistry};
use crate::tui::keyboard::{neighbor, Direction};
use crate::tui::AppState;

/// Handle input for main UI
pub fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<()> {
    let registry = ShortcutRegistry::new();

    if let Some(action) = registry.lookup(key) {
        dispatch_action(state, action);
    }
    // No action mapped - ignore key
    Ok(())
}

fn dispatch_action(state: &mut AppState, action: Action) {
    match action {
        Action::NavigateUp => move_focus(state, Direction::Up),
        Action::NavigateDown => move_focus(state, Direction::Down),
        Action::NavigateLeft => move_focus(state, Direction::Left),
        Action::NavigateRight => move_focus(state, Direction::Right),
        Action::SwitchHalf => {
            state.focus.half = state.focus.half.other();
        }
        Action::SelectKey => state.select_slot(state.focus),
        Action::CopyOutput => state.copy_output(),
        Action::Save => {
            state.save();
        }
        Action::Quit => state.request_quit(),
        Action::Cancel => state.set_status(""),
    }
}

fn move_focus(state: &mut AppState, direction: Direction) {
    if let Some(next) = neighbor(&state.scene(), state.focus, direction) {
        state.focus = next;
    }
}
