//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::shortcuts::ShortcutRegistry;

use super::{AppState, PopupType, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: message line, focus line, help line.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let message_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::styled(error.as_str(), Style::default().fg(theme.text)),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(state.status_color_override.unwrap_or(theme.text)),
            ))
        } else {
            Line::from("")
        };

        let focus_line = Self::focus_line(state, theme);
        let help_line = Self::help_line(state, theme);

        let status = Paragraph::new(vec![message_line, focus_line, help_line])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Which slot has focus (or is being edited) and what it holds.
    fn focus_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let (prefix, slot) = match state.selection.state().slot() {
            Some(slot) => ("Editing ", slot),
            None => ("Focus ", state.focus),
        };
        let code = state.store.code(slot.half, slot.index).to_string();
        let description = state
            .keycode_db
            .get(&code)
            .and_then(|def| def.description.clone().or_else(|| Some(def.name.clone())))
            .unwrap_or_default();

        Line::from(vec![
            Span::styled(prefix, Style::default().fg(theme.primary)),
            Span::styled(
                slot.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                if code.is_empty() { "(blank)".to_string() } else { code },
                Style::default().fg(theme.text),
            ),
            Span::raw("  "),
            Span::styled(description, Style::default().fg(theme.text_muted)),
        ])
    }

    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let entries = if state.active_popup == Some(PopupType::UnsavedChangesPrompt) {
            vec![("s", "Save and quit"), ("q", "Quit"), ("Esc", "Back")]
        } else if state.selection.state().is_editing() {
            vec![("Enter", "Commit"), ("↑/↓", "Switch key"), ("Click", "Switch key")]
        } else {
            ShortcutRegistry::help_entries()
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in entries.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                (*key).to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                (*action).to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }
}
