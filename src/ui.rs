//! Terminal rendering of the desktop.
//!
//! Window geometry lives in CSS pixels; the terminal shows it at a fixed
//! scale of [`PX_PER_COLUMN`] by [`PX_PER_ROW`]. Windows may hang off any
//! screen edge, so positions are signed and every cell write goes through
//! [`UiFrame`], which clips to the visible area.

use std::ops::Range;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::constants::WINDOW_HEAD_HEIGHT_PX;
use crate::keybindings::KeyBindings;
use crate::protocol::DesktopHost;
use crate::state::{AppState, DragTarget, InputMode};
use crate::window::decorator::{DefaultDecorator, WindowDecorator};
use crate::window::{Window, WindowId};

pub const PX_PER_COLUMN: i32 = 8;
pub const PX_PER_ROW: i32 = 16;

/// Viewport size in pixels for a terminal area.
pub fn viewport_px(area: Rect) -> (i32, i32) {
    (
        area.width as i32 * PX_PER_COLUMN,
        area.height as i32 * PX_PER_ROW,
    )
}

/// A rectangle of terminal cells that may extend past the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    /// Cells covered by `window`, bounded to what a terminal can address.
    pub fn for_window(window: &Window) -> Self {
        let limit = i32::from(u16::MAX);
        Self {
            x: window.resolved_x().div_euclid(PX_PER_COLUMN).clamp(-limit, limit),
            y: window.resolved_y().div_euclid(PX_PER_ROW).clamp(-limit, limit),
            width: (window.width() / PX_PER_COLUMN).clamp(3, limit),
            height: (window.height() / PX_PER_ROW).clamp(3, limit),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= self.x && column <= self.right() && row >= self.y && row <= self.bottom()
    }
}

/// A pointer press on a window: which window, and which part of its frame
/// (None for the content area, which only focuses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub window: WindowId,
    pub target: Option<DragTarget>,
}

/// Front-most open window under a cell.
pub fn hit_test(host: &DesktopHost, column: u16, row: u16) -> Option<Hit> {
    let (column, row) = (column as i32, row as i32);
    host.desktop()
        .windows_by_altitude()
        .into_iter()
        .rev()
        .find_map(|w| {
            let rect = CellRect::for_window(w);
            if !rect.contains(column, row) {
                return None;
            }
            let left = column == rect.x;
            let right = column == rect.right();
            let bottom = row == rect.bottom();
            let target = match (left, right, bottom) {
                (true, _, true) => Some(DragTarget::BottomLeftCorner),
                (_, true, true) => Some(DragTarget::BottomRightCorner),
                (true, _, false) => Some(DragTarget::LeftEdge),
                (_, true, false) => Some(DragTarget::RightEdge),
                (false, false, true) => Some(DragTarget::BottomEdge),
                _ if row < rect.y + WINDOW_HEAD_HEIGHT_PX / PX_PER_ROW => Some(DragTarget::Move),
                _ => None,
            };
            Some(Hit {
                window: w.id().clone(),
                target,
            })
        })
}

/// Wrapper around a ratatui buffer that clips all drawing to the visible
/// area, including writes at negative coordinates.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        let clipped = area.intersection(self.area);
        if clipped.width > 0 && clipped.height > 0 {
            widget.render(clipped, self.buffer);
        }
    }

    fn visible(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let a = self.area;
        let inside = x >= a.x as i32
            && y >= a.y as i32
            && x < a.x as i32 + a.width as i32
            && y < a.y as i32 + a.height as i32;
        inside.then_some((x as u16, y as u16))
    }

    pub fn set_cell(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if let Some(pos) = self.visible(x, y)
            && let Some(cell) = self.buffer.cell_mut(pos)
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Write `text` starting at a possibly off-screen cell, stopping after
    /// `max_width` characters.
    pub fn set_string(&mut self, x: i32, y: i32, text: &str, max_width: i32, style: Style) {
        let mut buf = [0u8; 4];
        for (i, ch) in text.chars().take(max_width.max(0) as usize).enumerate() {
            self.set_cell(x + i as i32, y, ch.encode_utf8(&mut buf), style);
        }
    }

    /// The on-screen part of columns `start..end`.
    pub fn visible_columns(&self, start: i32, end: i32) -> Range<i32> {
        start.max(self.area.x as i32)..end.min(self.area.x as i32 + self.area.width as i32)
    }

    /// The on-screen part of rows `start..end`.
    pub fn visible_rows(&self, start: i32, end: i32) -> Range<i32> {
        start.max(self.area.y as i32)..end.min(self.area.y as i32 + self.area.height as i32)
    }

    pub fn fill(&mut self, rect: CellRect, style: Style) {
        for y in self.visible_rows(rect.y, rect.y + rect.height) {
            for x in self.visible_columns(rect.x, rect.x + rect.width) {
                self.set_cell(x, y, " ", style);
            }
        }
    }
}

/// Draw the whole desktop: menu bar, windows back to front, status letterbox
/// and, when open, the help overlay.
pub fn render_desktop(
    frame: &mut UiFrame<'_>,
    host: &DesktopHost,
    state: &AppState,
    bindings: &KeyBindings,
) {
    let area = frame.area();
    if area.width == 0 || area.height < 3 {
        return;
    }
    let bar_style = Style::default().bg(Color::Gray).fg(Color::Black);
    let desktop_style = Style::default().bg(Color::Black);

    frame.fill(
        CellRect {
            x: area.x as i32,
            y: area.y as i32,
            width: area.width as i32,
            height: area.height as i32,
        },
        desktop_style,
    );

    let decorator = DefaultDecorator;
    let focused = host.desktop().focused_window().map(|w| w.id().clone());
    for window in host.desktop().windows_by_altitude() {
        let editing_url = matches!(
            state.mode(),
            InputMode::EditingUrl { window: id, .. } if id == window.id()
        );
        decorator.render_window(
            frame,
            CellRect::for_window(window),
            window,
            focused.as_ref() == Some(window.id()),
            editing_url,
        );
    }

    // Menu bar drawn last so windows never cover it.
    let menu = format!(
        " Path OS   File   {} window(s)   ? for help",
        host.desktop().open_window_count()
    );
    frame.fill(
        CellRect {
            x: area.x as i32,
            y: area.y as i32,
            width: area.width as i32,
            height: 1,
        },
        bar_style,
    );
    frame.set_string(
        area.x as i32,
        area.y as i32,
        &menu,
        area.width as i32,
        bar_style.add_modifier(Modifier::BOLD),
    );

    let status_y = area.y as i32 + area.height as i32 - 1;
    let status = match state.mode() {
        InputMode::EditingUrl { .. } => "Editing URL: Enter to go, Esc to cancel".to_string(),
        InputMode::Desktop => host.status_text().unwrap_or_default().to_string(),
    };
    let letterbox = Style::default().bg(Color::Black).fg(Color::Gray);
    frame.fill(
        CellRect {
            x: area.x as i32,
            y: status_y,
            width: area.width as i32,
            height: 1,
        },
        letterbox,
    );
    frame.set_string(area.x as i32 + 1, status_y, &status, area.width as i32 - 1, letterbox);

    if state.help_visible() {
        render_help(frame, bindings);
    }
}

fn render_help(frame: &mut UiFrame<'_>, bindings: &KeyBindings) {
    let area = frame.area();
    let lines: Vec<String> = bindings
        .help_entries()
        .into_iter()
        .map(|(action, combos)| format!("{:<24} {}", action.to_string(), combos.join(", ")))
        .collect();
    let width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4)
        .min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines.join("\n")).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .style(Style::default().bg(Color::DarkGray).fg(Color::White)),
        ),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Placement;

    fn host_with_window() -> (DesktopHost, WindowId) {
        let mut host = DesktopHost::default();
        let id = host.desktop_mut().add_window("http://a", Placement::Default);
        // 1024x600 at (60,60) -> cells x 7..134, y 3..40
        (host, id)
    }

    #[test]
    fn cell_rect_scales_resolved_geometry() {
        let (host, id) = host_with_window();
        let rect = CellRect::for_window(host.desktop().window(&id).unwrap());
        assert_eq!(
            rect,
            CellRect {
                x: 7,
                y: 3,
                width: 128,
                height: 37
            }
        );
    }

    #[test]
    fn hit_test_finds_frame_parts() {
        let (host, id) = host_with_window();
        let hit = |c, r| hit_test(&host, c, r).map(|h| h.target);
        assert_eq!(hit(20, 3), Some(Some(DragTarget::Move)));
        assert_eq!(hit(7, 10), Some(Some(DragTarget::LeftEdge)));
        assert_eq!(hit(134, 10), Some(Some(DragTarget::RightEdge)));
        assert_eq!(hit(20, 39), Some(Some(DragTarget::BottomEdge)));
        assert_eq!(hit(7, 39), Some(Some(DragTarget::BottomLeftCorner)));
        assert_eq!(hit(134, 39), Some(Some(DragTarget::BottomRightCorner)));
        assert_eq!(hit(20, 20), Some(None));
        assert_eq!(hit(2, 2), None);
        assert_eq!(hit_test(&host, 20, 20).map(|h| h.window), Some(id));
    }

    #[test]
    fn hit_test_prefers_the_front_window() {
        let (mut host, first) = host_with_window();
        let second = host.desktop_mut().add_window("http://b", Placement::Default);
        // Second window cascades to (81,81) -> cells (10,5); overlaps the first.
        assert_eq!(hit_test(&host, 30, 20).map(|h| h.window), Some(second));
        host.desktop_mut().focus_window(&first);
        assert_eq!(hit_test(&host, 30, 20).map(|h| h.window), Some(first));
    }

    #[test]
    fn set_string_clips_negative_offsets() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.set_string(-1, 0, "abc", 10, Style::default());
        frame.set_string(0, -1, "zzz", 10, Style::default());
        let buf = frame.buffer();
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "b");
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "c");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn renders_without_panicking_on_tiny_areas() {
        let (host, _) = host_with_window();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (200, 60)] {
            let area = Rect {
                x: 0,
                y: 0,
                width: w,
                height: h,
            };
            let mut buffer = Buffer::empty(area);
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            render_desktop(&mut frame, &host, &AppState::new(), &KeyBindings::default());
        }
    }

    #[test]
    fn huge_windows_render_within_terminal_bounds() {
        let (mut host, id) = host_with_window();
        let w = host.desktop_mut().window_mut(&id).unwrap();
        w.move_right_edge(i32::MAX, 0);
        w.move_bottom_edge(0, i32::MAX);
        let rect = CellRect::for_window(host.desktop().window(&id).unwrap());
        assert_eq!((rect.width, rect.height), (65_535, 65_535));
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        render_desktop(&mut frame, &host, &AppState::new(), &KeyBindings::default());
        assert_eq!(hit_test(&host, 39, 11).map(|h| h.window), Some(id));
    }
}
