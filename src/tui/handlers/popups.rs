//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::{AppState, PopupType};

/// Handle input for whichever popup is open
pub fn handle_popup_input(state: &mut AppState, key: KeyEvent) -> Result<()> {
    match state.active_popup {
        Some(PopupType::UnsavedChangesPrompt) => handle_unsaved_prompt_input(state, key),
        None => Ok(()),
    }
}

fn handle_unsaved_prompt_input(state: &mut AppState, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('s' | 'S') => {
            state.active_popup = None;
            if state.save() {
                state.should_quit = true;
            }
        }
        KeyCode::Char('q' | 'Q') => {
            state.active_popup = None;
            state.should_quit = true;
        }
        KeyCode::Esc => {
            state.active_popup = None;
            state.set_status("Quit cancelled");
        }
        _ => {}
    }
    Ok(())
}
