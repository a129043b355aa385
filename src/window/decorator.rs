use ratatui::style::{Color, Modifier, Style};

use super::Window;
use crate::ui::{CellRect, UiFrame};

/// Draws a window's chrome and contents into a clipped frame.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        window: &Window,
        focused: bool,
        editing_url: bool,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn header_style(focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        }
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        window: &Window,
        focused: bool,
        editing_url: bool,
    ) {
        let border_style = if focused {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default().fg(Color::DarkGray).bg(Color::Black)
        };
        let body_style = Style::default().fg(Color::Gray).bg(Color::Black);
        let header_style = Self::header_style(focused);

        let left = rect.x;
        let right = rect.right();
        let top = rect.y;
        let bottom = rect.bottom();
        let inner_width = rect.width - 2;

        frame.fill(rect, body_style);

        // Corners and edges
        frame.set_cell(left, top, "┌", border_style);
        frame.set_cell(right, top, "┐", border_style);
        frame.set_cell(left, bottom, "└", border_style);
        frame.set_cell(right, bottom, "┘", border_style);
        for x in frame.visible_columns(left + 1, right) {
            frame.set_cell(x, bottom, "─", border_style);
        }
        for y in frame.visible_rows(top + 1, bottom) {
            frame.set_cell(left, y, "│", border_style);
            frame.set_cell(right, y, "│", border_style);
        }

        // Title bar, centered when it fits.
        for x in frame.visible_columns(left + 1, right) {
            frame.set_cell(x, top, " ", header_style);
        }
        let title = window.title().unwrap_or(window.history().current());
        let title_len = title.chars().count() as i32;
        let start = if title_len <= inner_width {
            left + 1 + (inner_width - title_len) / 2
        } else {
            left + 1
        };
        frame.set_string(start, top, title, inner_width, header_style);

        // URL bar
        let url_y = top + 1;
        if url_y < bottom {
            let back_style = if window.history().can_go_back() {
                body_style.fg(Color::White)
            } else {
                body_style.fg(Color::DarkGray)
            };
            frame.set_string(left + 1, url_y, "◀ ", 2, back_style);
            let url_style = if editing_url {
                Style::default().bg(Color::White).fg(Color::Black)
            } else {
                body_style.add_modifier(Modifier::UNDERLINED)
            };
            let mut text = window.url_bar_text().to_string();
            if editing_url {
                text.push('▏');
            }
            frame.set_string(left + 3, url_y, &text, inner_width - 2, url_style);
        }

        let mut lines = Vec::new();
        if let Some(target) = window.navigation_target().value() {
            lines.push(format!("Loaded {target}"));
        }
        lines.push(format!("History: {} page(s)", window.history().len()));
        for (i, line) in lines.iter().enumerate() {
            let y = top + 3 + i as i32;
            if y >= bottom {
                break;
            }
            frame.set_string(left + 2, y, line, inner_width - 2, body_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesktopConfig;
    use crate::sequence::altitude_sequence;
    use crate::window::Point;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn draws_title_and_url_bar() {
        let mut altitudes = altitude_sequence();
        let mut window = Window::new(
            "http://a.test",
            Point::new(0, 0),
            &DesktopConfig::default(),
            altitudes.next(),
        );
        window.notice_title("Hello");
        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let rect = CellRect {
            x: 0,
            y: 0,
            width: 20,
            height: 6,
        };
        DefaultDecorator.render_window(&mut frame, rect, &window, true, false);
        assert!(row(&buffer, 0).contains("Hello"));
        assert!(row(&buffer, 1).contains("◀ http://a.test"));
        assert!(row(&buffer, 5).starts_with('└'));
    }

    #[test]
    fn untitled_window_shows_its_url() {
        let mut altitudes = altitude_sequence();
        let window = Window::new(
            "http://b.test",
            Point::new(0, 0),
            &DesktopConfig::default(),
            altitudes.next(),
        );
        let area = Rect::new(0, 0, 30, 4);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let rect = CellRect {
            x: -5,
            y: 0,
            width: 40,
            height: 4,
        };
        DefaultDecorator.render_window(&mut frame, rect, &window, false, false);
        assert!(row(&buffer, 0).contains("http://b.test"));
    }
}
