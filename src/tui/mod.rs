//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod binding_editor;
pub mod handlers;
pub mod keyboard;
pub mod output_panel;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::export::{export_store, HalfSelection};
use crate::keycode_db::KeycodeDb;
use crate::models::{BindingStore, Half, LayoutTable, OpenOutcome, SelectionMachine, Slot};
use crate::render::{render_scene, Scene};
use crate::services::BindingsService;

pub use binding_editor::BindingEditorState;
pub use keyboard::{KeyboardWidget, Viewport};
pub use output_panel::OutputPanel;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// File name used when saving without a configured bindings path.
pub const DEFAULT_BINDINGS_FILE: &str = "bindings.json";

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Unsaved changes confirmation popup
    UnsavedChangesPrompt,
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Bindings for both halves
    pub store: BindingStore,
    /// Idle/editing state
    pub selection: SelectionMachine,
    /// Physical key positions
    pub table: LayoutTable,
    /// Where bindings are saved
    pub bindings_path: Option<PathBuf>,
    /// Whether bindings have unsaved changes
    pub dirty: bool,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Key that arrow navigation starts from
    pub focus: Slot,
    /// Staged text for the slot being edited
    pub editor: BindingEditorState,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for status message
    pub status_color_override: Option<Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,
    /// Terminal area of the last drawn frame, used to map mouse clicks
    pub frame_area: Rect,

    // System resources
    /// Keycode database
    pub keycode_db: KeycodeDb,
    /// Application configuration
    pub config: Config,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates a new `AppState` from loaded bindings and config.
    ///
    /// # Errors
    ///
    /// Returns error if the config is invalid or the keycode database fails to load
    pub fn new(store: BindingStore, bindings_path: Option<PathBuf>, config: Config) -> Result<Self> {
        config.validate()?;
        let keycode_db = KeycodeDb::load().context("Failed to load keycode database")?;

        Ok(Self {
            store,
            selection: SelectionMachine::new(config.editor.reselect),
            table: LayoutTable::new(),
            bindings_path,
            dirty: false,
            theme: Theme::from_mode(config.ui.theme_mode),
            focus: Slot::new(Half::Primary, 0),
            editor: BindingEditorState::new(),
            active_popup: None,
            status_message: String::new(),
            status_color_override: None,
            error_message: None,
            frame_area: Rect::default(),
            keycode_db,
            config,
            should_quit: false,
        })
    }

    /// Scene for the current bindings and selection.
    #[must_use]
    pub fn scene(&self) -> Scene {
        render_scene(
            &self.table,
            &self.store,
            self.selection.state(),
            &self.keycode_db,
        )
    }

    /// Viewport mapping for a keyboard area (inside its border).
    #[must_use]
    pub fn viewport_for(&self, inner: Rect) -> Viewport {
        Viewport::fit(inner, self.config.ui.keyboard_scale)
    }

    /// Keyboard area (inside its border) of the last drawn frame.
    #[must_use]
    pub fn keyboard_inner_area(&self) -> Rect {
        let chunks = main_layout(self.frame_area, self.config.ui.keyboard_scale);
        Block::default().borders(Borders::ALL).inner(chunks[1])
    }

    /// Asks the selection machine to open `slot` and syncs the editor.
    pub fn select_slot(&mut self, slot: Slot) {
        let abandoned = self.editor.is_modified().then(|| self.editor.buffer.clone());
        match self.selection.select(slot.half, slot.index) {
            OpenOutcome::Opened => {
                self.open_editor(slot);
                self.set_status(format!("Editing {slot}"));
            }
            OpenOutcome::Replaced(previous) => {
                self.open_editor(slot);
                if let Some(text) = abandoned {
                    warn!(%previous, staged = %text, "uncommitted edit abandoned");
                    self.set_status_with_style(
                        format!("Discarded \"{text}\" for {previous}; editing {slot}"),
                        self.theme.warning,
                    );
                } else {
                    self.set_status(format!("Editing {slot}"));
                }
            }
            OpenOutcome::Ignored => {
                if let Some(current) = self.selection.state().slot() {
                    self.set_status_with_style(
                        format!("Finish editing {current} first (Enter commits)"),
                        self.theme.warning,
                    );
                }
            }
        }
    }

    fn open_editor(&mut self, slot: Slot) {
        let current = self.store.code(slot.half, slot.index).clone();
        self.editor.open(slot, &current);
        self.focus = slot;
    }

    /// Commits the staged text to the slot being edited.
    ///
    /// With `editor.validate_codes` set, codes unknown to the keycode
    /// database are refused and the editor stays open.
    pub fn commit_editor(&mut self) {
        let code = self.editor.staged();
        if self.config.editor.validate_codes
            && !code.is_blank()
            && !self.keycode_db.is_valid(code.as_str())
        {
            self.set_error(format!("Unknown keycode: {code}"));
            return;
        }

        let Some(slot) = self.selection.state().slot() else {
            return;
        };
        if self.selection.commit(&mut self.store, code.clone()).is_some() {
            self.editor.reset();
            self.dirty = true;
            self.set_status(format!("{slot} = {code}"));
        }
    }

    /// Path that Ctrl+S writes to.
    ///
    /// # Errors
    ///
    /// Fails when no path is known and the config directory cannot be resolved.
    pub fn save_path(&self) -> Result<PathBuf> {
        if let Some(path) = self
            .bindings_path
            .as_ref()
            .or(self.config.paths.bindings_file.as_ref())
        {
            return Ok(path.clone());
        }
        Ok(Config::config_dir()?.join(DEFAULT_BINDINGS_FILE))
    }

    /// Saves bindings and reports the outcome in the status bar.
    ///
    /// Returns whether the save succeeded.
    pub fn save(&mut self) -> bool {
        let result = self
            .save_path()
            .and_then(|path| BindingsService::save(&self.store, &path).map(|()| path));
        match result {
            Ok(path) => {
                info!(path = %path.display(), "bindings saved");
                self.dirty = false;
                self.set_status(format!(
                    "Saved {} at {}",
                    path.display(),
                    chrono::Local::now().format("%H:%M:%S")
                ));
                self.bindings_path = Some(path);
                true
            }
            Err(e) => {
                self.set_error(format!("Failed to save: {e:#}"));
                false
            }
        }
    }

    /// Copies both array literals to the system clipboard.
    pub fn copy_output(&mut self) {
        let text = export_store(
            &self.store,
            HalfSelection::Both,
            &self.config.export.array_name,
        );
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                info!("array literals copied to clipboard");
                self.set_status("Copied both arrays to clipboard");
            }
            Err(e) => self.set_error(format!("Clipboard unavailable: {e}")),
        }
    }

    /// Quits, or asks first when there are unsaved changes.
    pub fn request_quit(&mut self) {
        if self.dirty {
            self.active_popup = Some(PopupType::UnsavedChangesPrompt);
        } else {
            self.should_quit = true;
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set status message with custom foreground color (used for warnings)
    pub fn set_status_with_style(&mut self, message: impl Into<String>, color: Color) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = Some(color);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        warn!(%error, "error shown");
        self.error_message = Some(error);
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let frame = terminal.draw(|f| render(f, state))?;
        state.frame_area = frame.area;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handlers::handle_key_event(state, key)?;
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(state, mouse),
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Splits the screen into title, keyboard, lower panel and status bar.
fn main_layout(area: Rect, keyboard_scale: f32) -> Rc<[Rect]> {
    let inner_width = area.width.saturating_sub(2);
    let keyboard_height = Viewport::fit(Rect::new(0, 0, inner_width, 1), keyboard_scale)
        .height()
        .saturating_add(2);

    RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title bar
            Constraint::Length(keyboard_height), // Keyboard
            Constraint::Min(8),                  // Output panel or binding editor
            Constraint::Length(5),               // Status bar
        ])
        .split(area)
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = main_layout(f.area(), state.config.ui.keyboard_scale);

    render_title_bar(f, chunks[0], state);
    KeyboardWidget::render(f, chunks[1], state);

    if state.selection.state().is_editing() {
        binding_editor::render_binding_editor(f, chunks[2], state);
    } else {
        OutputPanel::render(f, chunks[2], state);
    }

    StatusBar::render(f, chunks[3], state, &state.theme);

    if let Some(PopupType::UnsavedChangesPrompt) = state.active_popup {
        render_unsaved_prompt(f, &state.theme);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with bindings file and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let source = state
        .bindings_path
        .as_ref()
        .map_or_else(|| "default bindings".to_string(), |p| p.display().to_string());
    let title = format!(" {} - {source}{dirty_indicator}", crate::constants::APP_NAME);

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

fn render_unsaved_prompt(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(50, 30, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("You have unsaved changes."),
        Line::from(""),
        Line::from("  [S] Save and quit"),
        Line::from("  [Q] Quit without saving"),
        Line::from("  [Esc] Back to editing"),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Unsaved Changes ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning).bg(theme.background)),
    );

    f.render_widget(prompt, area);
}

fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Error message
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ERROR ")
                .title_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(theme.error)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background));
    f.render_widget(help, chunks[1]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReselectPolicy, SymbolicCode};
    use tempfile::TempDir;

    fn app_state() -> AppState {
        let mut config = Config::default();
        config.ui.theme_mode = crate::config::ThemeMode::Dark;
        AppState::new(BindingStore::default(), None, config).unwrap()
    }

    fn type_text(state: &mut AppState, text: &str) {
        state.editor.cursor_end();
        while !state.editor.buffer.is_empty() {
            state.editor.handle_backspace();
        }
        for c in text.chars() {
            state.editor.handle_char(c);
        }
    }

    #[test]
    fn test_select_and_commit() {
        let mut state = app_state();
        let slot = Slot::new(Half::Primary, 0);
        state.select_slot(slot);
        assert_eq!(state.editor.buffer, "KC_ESCAPE");

        type_text(&mut state, "KC_CAPSLOCK");
        state.commit_editor();

        assert!(!state.selection.state().is_editing());
        assert_eq!(state.store.code(Half::Primary, 0), "KC_CAPSLOCK");
        assert!(state.dirty);
        assert!(state.editor.slot.is_none());
    }

    #[test]
    fn test_reselect_abandons_staged_text() {
        let mut state = app_state();
        state.select_slot(Slot::new(Half::Primary, 0));
        type_text(&mut state, "KC_Q");
        state.select_slot(Slot::new(Half::Secondary, 1));

        assert_eq!(state.editor.slot, Some(Slot::new(Half::Secondary, 1)));
        assert_eq!(state.editor.buffer, "KC_0");
        assert_eq!(state.store.code(Half::Primary, 0), "KC_ESCAPE");
        assert!(state.status_message.contains("Discarded"));
        assert!(!state.dirty);
    }

    #[test]
    fn test_keep_current_policy_ignores_reselect() {
        let mut state = app_state();
        state.selection.set_policy(ReselectPolicy::KeepCurrent);
        state.select_slot(Slot::new(Half::Primary, 0));
        state.select_slot(Slot::new(Half::Primary, 1));
        assert_eq!(state.editor.slot, Some(Slot::new(Half::Primary, 0)));
        assert!(state.status_message.contains("Finish editing"));
    }

    #[test]
    fn test_validate_codes_keeps_editor_open() {
        let mut state = app_state();
        state.config.editor.validate_codes = true;
        state.select_slot(Slot::new(Half::Primary, 2));
        type_text(&mut state, "NOT_A_KEY");
        state.commit_editor();

        assert!(state.selection.state().is_editing());
        assert!(state.error_message.is_some());
        assert_eq!(state.store.code(Half::Primary, 2), "KC_2");

        state.clear_error();
        type_text(&mut state, "MO(1)");
        state.commit_editor();
        assert_eq!(state.store.code(Half::Primary, 2), "MO(1)");
    }

    #[test]
    fn test_commit_accepts_arbitrary_text_by_default() {
        let mut state = app_state();
        state.select_slot(Slot::new(Half::Primary, 2));
        type_text(&mut state, "whatever you like");
        state.commit_editor();
        assert_eq!(
            *state.store.code(Half::Primary, 2),
            SymbolicCode::from("whatever you like")
        );
    }

    #[test]
    fn test_save_clears_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bindings.json");
        let mut state = app_state();
        state.bindings_path = Some(path.clone());
        state.select_slot(Slot::new(Half::Primary, 0));
        state.commit_editor();
        assert!(state.dirty);

        assert!(state.save());
        assert!(!state.dirty);
        assert_eq!(BindingsService::load(&path).unwrap(), state.store);
    }

    #[test]
    fn test_quit_prompts_when_dirty() {
        let mut state = app_state();
        state.request_quit();
        assert!(state.should_quit);

        let mut state = app_state();
        state.dirty = true;
        state.request_quit();
        assert!(!state.should_quit);
        assert_eq!(state.active_popup, Some(PopupType::UnsavedChangesPrompt));
    }

    #[test]
    fn test_keyboard_area_tracks_frame() {
        let mut state = app_state();
        state.frame_area = Rect::new(0, 0, 120, 50);
        let inner = state.keyboard_inner_area();
        assert_eq!(inner.y, 4);
        assert_eq!(inner.height, 28);
    }
}
