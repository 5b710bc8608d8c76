//! Binding editor input handler.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::binding_editor::NO_CANCEL_HINT;
use crate::tui::keyboard::{neighbor, Direction};
use crate::tui::AppState;

/// Handle input while a slot is being edited
pub fn handle_editor_input(state: &mut AppState, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => {
                state.save();
            }
            KeyCode::Char('q') => state.request_quit(),
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Enter => state.commit_editor(),
        KeyCode::Esc => {
            let warning = state.theme.warning;
            state.set_status_with_style(NO_CANCEL_HINT, warning);
        }
        KeyCode::Up => reselect(state, Direction::Up),
        KeyCode::Down => reselect(state, Direction::Down),
        KeyCode::Left => state.editor.cursor_left(),
        KeyCode::Right => state.editor.cursor_right(),
        KeyCode::Home => state.editor.cursor_home(),
        KeyCode::End => state.editor.cursor_end(),
        KeyCode::Backspace => state.editor.handle_backspace(),
        KeyCode::Delete => state.editor.handle_delete(),
        KeyCode::Char(c) => state.editor.handle_char(c),
        _ => {}
    }
    Ok(())
}

/// Opens the neighbouring key; the reselect policy decides what happens to
/// the current edit.
fn reselect(state: &mut AppState, direction: Direction) {
    let Some(current) = state.selection.state().slot() else {
        return;
    };
    if let Some(next) = neighbor(&state.scene(), current, direction) {
        state.select_slot(next);
    }
}
