//! Keyboard widget for rendering both halves in the terminal.
//!
//! Layout units are mapped to character cells by [`Viewport`]. A cell is
//! roughly twice as tall as it is wide, so one key unit is a fifth of a column
//! and `3/35` of a line: a 30-unit key on a 35-unit pitch becomes a 6×3 box
//! on a 7-column, 3-line grid.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Half, Slot, SlotGeometry, LAYOUT_HEIGHT, LAYOUT_WIDTH};
use crate::render::{FontTier, KeyShape, Scene};

use super::AppState;

const COLUMNS_PER_UNIT: f32 = 1.0 / 5.0;
const LINES_PER_UNIT: f32 = 3.0 / 35.0;
/// Columns between the two halves at scale 1.0.
const HALF_GAP: f32 = 6.0;
/// Smallest box that still fits a border and one label line.
const MIN_KEY_CELLS: u16 = 3;

/// Direction for focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the screen
    Up,
    /// Towards the bottom of the screen
    Down,
    /// Towards the left of the screen
    Left,
    /// Towards the right of the screen
    Right,
}

/// Maps layout coordinates of both halves onto a terminal area and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    scale: f32,
    left: f32,
}

impl Viewport {
    /// Fits both halves into `area`, shrinking `scale` when they would not fit.
    #[must_use]
    pub fn fit(area: Rect, scale: f32) -> Self {
        let unscaled = Self::total_width_at(1.0);
        let scale = scale.min(f32::from(area.width) / unscaled).max(0.1);
        let spare = (f32::from(area.width) - Self::total_width_at(scale)).max(0.0);
        Self {
            area,
            scale,
            left: f32::from(area.x) + (spare / 2.0).floor(),
        }
    }

    fn total_width_at(scale: f32) -> f32 {
        (LAYOUT_WIDTH * COLUMNS_PER_UNIT).mul_add(2.0, HALF_GAP) * scale
    }

    /// Effective scale after fitting.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    fn columns_per_unit(&self) -> f32 {
        COLUMNS_PER_UNIT * self.scale
    }

    fn lines_per_unit(&self) -> f32 {
        LINES_PER_UNIT * self.scale
    }

    fn half_origin(&self, half: Half) -> f32 {
        match half {
            Half::Primary => self.left,
            Half::Secondary => HALF_GAP.mul_add(
                self.scale,
                LAYOUT_WIDTH.mul_add(self.columns_per_unit(), self.left),
            ),
        }
    }

    /// Lines needed to show a whole half.
    #[must_use]
    pub fn height(&self) -> u16 {
        (LAYOUT_HEIGHT * self.lines_per_unit()).ceil() as u16
    }

    /// Cell rectangle for a key, clipped to the viewport area.
    ///
    /// Keys turned more than 45° from upright swap their width and height.
    #[must_use]
    pub fn key_rect(&self, half: Half, geometry: &SlotGeometry) -> Option<Rect> {
        let (w_units, h_units) = if geometry.is_sideways() {
            (geometry.height(), geometry.width())
        } else {
            (geometry.width(), geometry.height())
        };
        let width = ((w_units * self.columns_per_unit()).round() as u16).max(MIN_KEY_CELLS);
        let height = ((h_units * self.lines_per_unit()).round() as u16).max(MIN_KEY_CELLS);

        let center_x = geometry.x.mul_add(self.columns_per_unit(), self.half_origin(half));
        let center_y = geometry.y.mul_add(self.lines_per_unit(), f32::from(self.area.y));
        let x = (center_x - f32::from(width) / 2.0).round().max(0.0) as u16;
        let y = (center_y - f32::from(height) / 2.0).round().max(0.0) as u16;

        let rect = Rect::new(x, y, width, height).intersection(self.area);
        (!rect.is_empty()).then_some(rect)
    }

    /// Layout point under the centre of terminal cell `(column, row)`.
    #[must_use]
    pub fn to_layout(&self, column: u16, row: u16) -> Option<(Half, f32, f32)> {
        let y = (f32::from(row) + 0.5 - f32::from(self.area.y)) / self.lines_per_unit();
        if !(0.0..=LAYOUT_HEIGHT).contains(&y) {
            return None;
        }
        Half::ALL.into_iter().find_map(|half| {
            let x = (f32::from(column) + 0.5 - self.half_origin(half)) / self.columns_per_unit();
            (0.0..=LAYOUT_WIDTH).contains(&x).then_some((half, x, y))
        })
    }

    /// Slot under a terminal cell.
    ///
    /// The scene's geometric hit test runs first; when the click lands on the
    /// drawn box but outside the rotated shape, the drawn box decides.
    #[must_use]
    pub fn slot_at(&self, scene: &Scene, column: u16, row: u16) -> Option<Slot> {
        if let Some(slot) = self
            .to_layout(column, row)
            .and_then(|(half, x, y)| scene.hit_test(half, x, y))
        {
            return Some(slot);
        }
        Half::ALL.into_iter().find_map(|half| {
            scene
                .keys(half)
                .iter()
                .rev()
                .find(|key| {
                    self.key_rect(half, &key.geometry).is_some_and(|rect| {
                        rect.contains(ratatui::layout::Position::new(column, row))
                    })
                })
                .map(|key| key.slot)
        })
    }
}

/// Nearest key on the same half in `direction`, weighting sideways distance double.
///
/// Anchors are already mirrored for the secondary half, so directions match
/// the screen on both halves.
#[must_use]
pub fn neighbor(scene: &Scene, from: Slot, direction: Direction) -> Option<Slot> {
    let origin = scene.key(from)?;
    let (ox, oy) = (origin.geometry.x, origin.geometry.y);

    scene
        .keys(from.half)
        .iter()
        .filter(|key| key.slot != from)
        .filter_map(|key| {
            let (x, y) = (key.geometry.x, key.geometry.y);
            let (along, across) = match direction {
                Direction::Up => (oy - y, x - ox),
                Direction::Down => (y - oy, x - ox),
                Direction::Left => (ox - x, y - oy),
                Direction::Right => (x - ox, y - oy),
            };
            (along > 1.0).then_some((across.abs().mul_add(2.0, along), key.slot))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, slot)| slot)
}

/// Keyboard widget renders the key boxes of both halves.
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Render the keyboard widget
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let block = Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let scene = state.scene();
        let viewport = state.viewport_for(inner);

        for half in Half::ALL {
            for key in scene.keys(half) {
                let Some(rect) = viewport.key_rect(half, &key.geometry) else {
                    continue;
                };
                Self::render_key(f, rect, key, key.slot == state.focus, state);
            }
        }
    }

    fn render_key(f: &mut Frame, rect: Rect, key: &KeyShape, focused: bool, state: &AppState) {
        let theme = &state.theme;
        let (bg, fg) = if key.selected {
            (theme.selected_bg, theme.selected_fg)
        } else {
            (theme.key_bg, theme.key_fg)
        };

        let border_style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };

        let mut label_style = Style::default().fg(fg).bg(bg);
        label_style = match key.tier {
            FontTier::Large => label_style.add_modifier(Modifier::BOLD),
            FontTier::Medium => label_style,
            FontTier::Small => label_style.add_modifier(Modifier::DIM),
        };

        let inner_width = usize::from(rect.width.saturating_sub(2));
        let label: String = key.label.chars().take(inner_width).collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .style(Style::default().bg(bg));

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(label)
                .style(label_style)
                .alignment(Alignment::Center)
                .block(block),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode_db::RawCodes;
    use crate::models::{BindingStore, LayoutTable, Selection};
    use crate::render::render_scene;

    fn scene() -> Scene {
        render_scene(
            &LayoutTable::new(),
            &BindingStore::default(),
            Selection::Idle,
            &RawCodes,
        )
    }

    #[test]
    fn test_fit_keeps_scale_when_wide_enough() {
        let viewport = Viewport::fit(Rect::new(0, 0, 200, 40), 1.0);
        assert!((viewport.scale() - 1.0).abs() < f32::EPSILON);
        assert_eq!(viewport.height(), 28);
    }

    #[test]
    fn test_fit_shrinks_to_narrow_area() {
        let viewport = Viewport::fit(Rect::new(0, 0, 55, 40), 1.0);
        assert!(viewport.scale() < 1.0);
    }

    #[test]
    fn test_key_rect_regular_key() {
        let viewport = Viewport::fit(Rect::new(0, 0, 110, 40), 1.0);
        let table = LayoutTable::new();
        let geometry = table.geometry(Half::Primary, 7).unwrap();
        let rect = viewport.key_rect(Half::Primary, &geometry).unwrap();
        assert_eq!((rect.width, rect.height), (6, 3));
    }

    #[test]
    fn test_secondary_drawn_right_of_primary() {
        let viewport = Viewport::fit(Rect::new(0, 0, 110, 40), 1.0);
        let table = LayoutTable::new();
        let primary = viewport
            .key_rect(Half::Primary, &table.geometry(Half::Primary, 5).unwrap())
            .unwrap();
        let secondary = viewport
            .key_rect(Half::Secondary, &table.geometry(Half::Secondary, 5).unwrap())
            .unwrap();
        assert!(secondary.x > primary.x + primary.width);
    }

    #[test]
    fn test_slot_at_finds_drawn_key() {
        let viewport = Viewport::fit(Rect::new(0, 0, 110, 40), 1.0);
        let scene = scene();
        for half in Half::ALL {
            for key in scene.keys(half) {
                let rect = viewport.key_rect(half, &key.geometry).unwrap();
                let hit = viewport.slot_at(&scene, rect.x + rect.width / 2, rect.y + rect.height / 2);
                assert_eq!(hit, Some(key.slot), "centre of {}", key.slot);
            }
        }
    }

    #[test]
    fn test_slot_at_gap_is_none() {
        let viewport = Viewport::fit(Rect::new(0, 0, 110, 40), 1.0);
        assert_eq!(viewport.slot_at(&scene(), 0, 0), None);
    }

    #[test]
    fn test_neighbor_moves_within_half() {
        let scene = scene();
        let from = Slot::new(Half::Primary, 7);
        assert_eq!(
            neighbor(&scene, from, Direction::Right),
            Some(Slot::new(Half::Primary, 8))
        );
        assert_eq!(
            neighbor(&scene, from, Direction::Down),
            Some(Slot::new(Half::Primary, 13))
        );
        assert_eq!(
            neighbor(&scene, from, Direction::Up),
            Some(Slot::new(Half::Primary, 1))
        );
    }

    #[test]
    fn test_neighbor_at_edge_is_none() {
        let scene = scene();
        assert_eq!(neighbor(&scene, Slot::new(Half::Primary, 0), Direction::Left), None);
        assert_eq!(neighbor(&scene, Slot::new(Half::Primary, 32), Direction::Down), None);
    }

    #[test]
    fn test_neighbor_follows_mirrored_screen() {
        // Secondary index 1 sits left of index 0 on screen.
        let scene = scene();
        assert_eq!(
            neighbor(&scene, Slot::new(Half::Secondary, 0), Direction::Left),
            Some(Slot::new(Half::Secondary, 1))
        );
    }
}
