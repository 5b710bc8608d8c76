//! Live preview of the exported array literals.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::export::array_literal;
use crate::models::Half;

use super::AppState;

/// Output panel widget
pub struct OutputPanel;

impl OutputPanel {
    /// Renders one column per half, each holding that half's array literal.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (half, column) in Half::ALL.into_iter().zip(columns.iter()) {
            let literal = array_literal(&state.config.export.array_name, state.store.map(half));
            let text: Text = literal.lines().map(Line::from).collect();
            let panel = Paragraph::new(text)
                .style(Style::default().fg(theme.text).bg(theme.background))
                .block(
                    Block::default()
                        .title(format!(" {half} output "))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.primary)),
                );
            f.render_widget(panel, *column);
        }
    }
}
