//! Binding editor dialog for the slot being edited.
//!
//! The dialog is shown whenever a slot is selected. It stages free text,
//! seeded with the slot's current code, and hands it back verbatim on Enter.
//! There is no cancel: Escape only explains how to leave.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Slot, SymbolicCode};

use super::AppState;

/// Shown when Escape is pressed inside the editor.
pub const NO_CANCEL_HINT: &str =
    "Editing stays open until Enter commits a code (select another key to switch)";

/// Staged text for the binding editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingEditorState {
    /// Slot the staged text belongs to
    pub slot: Option<Slot>,
    /// Text that Enter will commit
    pub buffer: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Code the slot held when the editor opened
    pub original: String,
}

impl BindingEditorState {
    /// Creates an empty editor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: None,
            buffer: String::new(),
            cursor: 0,
            original: String::new(),
        }
    }

    /// Seeds the editor with the slot's current code, cursor at the end.
    pub fn open(&mut self, slot: Slot, current: &SymbolicCode) {
        self.slot = Some(slot);
        self.buffer = current.as_str().to_string();
        self.original = self.buffer.clone();
        self.cursor = self.char_len();
    }

    /// The staged code, exactly as typed.
    #[must_use]
    pub fn staged(&self) -> SymbolicCode {
        SymbolicCode::new(self.buffer.clone())
    }

    /// Whether the staged text differs from the code the slot held on open.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    /// Removes the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Removes the character under the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clears the editor after a commit.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Renders the editor in `area`, below the keyboard so keys stay clickable.
pub fn render_binding_editor(f: &mut Frame, area: Rect, state: &AppState) {
    let editor = &state.editor;
    let Some(slot) = editor.slot else {
        return;
    };
    let theme = &state.theme;

    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" Edit {slot} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Current code and label
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    let label = state
        .keycode_db
        .get(&editor.original)
        .map_or_else(|| "unknown code".to_string(), |def| def.name.clone());
    let current = Paragraph::new(Line::from(vec![
        Span::styled("Current: ", Style::default().fg(theme.text_muted)),
        Span::styled(
            if editor.original.is_empty() {
                "(blank)"
            } else {
                editor.original.as_str()
            },
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {label}"), Style::default().fg(theme.text_muted)),
    ]));
    f.render_widget(current, chunks[0]);

    let split = editor
        .buffer
        .char_indices()
        .nth(editor.cursor)
        .map_or(editor.buffer.len(), |(i, _)| i);
    let (before, after) = editor.buffer.split_at(split);
    let input = Paragraph::new(format!("{before}█{after}"))
        .style(Style::default().fg(theme.accent))
        .block(
            Block::default()
                .title(" Code ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        );
    f.render_widget(input, chunks[1]);

    let actions = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" Commit  "),
        Span::styled("↑/↓ or click", Style::default().fg(theme.accent)),
        Span::raw(" Switch key"),
    ]))
    .style(Style::default().fg(theme.text));
    f.render_widget(actions, chunks[3]);
}
