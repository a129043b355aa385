use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::actions::Action;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};
use crate::keybindings::KeyBindings;
use crate::protocol::DesktopHost;
use crate::router::Router;
use crate::state::{AppState, Drag, DragTarget, InputMode};
use crate::ui::{PX_PER_COLUMN, PX_PER_ROW, UiFrame, hit_test, render_desktop, viewport_px};
use crate::window::{Placement, WindowId};

/// What the app shows first, picked from a URL-style hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartView {
    Desktop,
    Help,
}

/// `#/` and unknown hashes open the bare desktop; `#/help` opens the key help.
pub fn start_view_router() -> Router<StartView> {
    Router::new(
        StartView::Desktop,
        [("/", StartView::Desktop), ("/help", StartView::Help)],
    )
}

/// Terminal front end for a [`DesktopHost`]: turns keys and pointer events
/// into desktop operations and draws the result.
#[derive(Debug, Default)]
pub struct App {
    host: DesktopHost,
    state: AppState,
    bindings: KeyBindings,
}

impl App {
    pub fn new(host: DesktopHost) -> Self {
        Self {
            host,
            state: AppState::new(),
            bindings: KeyBindings::default(),
        }
    }

    pub fn host(&self) -> &DesktopHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut DesktopHost {
        &mut self.host
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn show(&mut self, view: StartView) {
        if self.state.help_visible() != (view == StartView::Help) {
            self.state.toggle_help_visible();
        }
    }

    /// Open a window on the configured home page and announce it.
    pub fn open_home_window(&mut self, placement: Placement) -> WindowId {
        let home = self.host.desktop().config().home_url.clone();
        let id = self.host.desktop_mut().add_window(home, placement);
        if let Some(request) = self.host.handshake(&id) {
            match request.to_json() {
                Ok(json) => tracing::trace!(window_id = %id, %json, "inject request"),
                Err(err) => tracing::warn!(window_id = %id, %err, "could not encode inject request"),
            }
        }
        id
    }

    /// Advance timers by one frame.
    pub fn tick(&mut self, elapsed: Duration) {
        let ms = i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX);
        self.host.tick(ms);
    }

    pub fn draw(&mut self, frame: &mut ratatui::Frame) {
        let (width, height) = viewport_px(frame.area());
        self.host
            .desktop_mut()
            .notice_screen_dimensions(width, height);
        let mut ui = UiFrame::new(frame);
        render_desktop(&mut ui, &self.host, &self.state, &self.bindings);
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if matches!(self.state.mode(), InputMode::EditingUrl { .. }) {
            self.edit_url(key);
            return ControlFlow::Continue;
        }
        if self.state.help_visible() {
            // Any key closes the overlay.
            self.state.toggle_help_visible();
            return ControlFlow::Continue;
        }
        match self.bindings.action_for_key(key) {
            Some(action) => self.apply(action),
            None => ControlFlow::Continue,
        }
    }

    pub fn apply(&mut self, action: Action) -> ControlFlow {
        use Action::*;
        tracing::trace!(%action, "action");
        let desktop = self.host.desktop_mut();
        match action {
            Quit => return ControlFlow::Quit,
            ToggleHelp => self.state.toggle_help_visible(),
            FocusNext => desktop.focus_next(true),
            FocusPrev => desktop.focus_next(false),
            NewWindow => {
                self.open_home_window(Placement::Default);
            }
            CloseWindow => {
                if let Some(id) = desktop.focused_window().map(|w| w.id().clone()) {
                    desktop.close_window(&id);
                }
            }
            EditUrl => {
                if let Some(w) = desktop.focused_window() {
                    self.state
                        .begin_url_edit(w.id().clone(), w.url_bar_text().to_string());
                }
            }
            GoBack => {
                if let Some(w) = desktop.focused_window_mut() {
                    w.go_back();
                }
            }
            DismissStatus => self.host.dismiss_status(),
            geometry => {
                if let Some(w) = desktop.focused_window_mut() {
                    let (col, row) = (PX_PER_COLUMN, PX_PER_ROW);
                    match geometry {
                        NudgeLeft => w.nudge(-col, 0),
                        NudgeRight => w.nudge(col, 0),
                        NudgeUp => w.nudge(0, -row),
                        NudgeDown => w.nudge(0, row),
                        LeftEdgeOut => w.move_left_edge(-col, 0),
                        LeftEdgeIn => w.move_left_edge(col, 0),
                        RightEdgeOut => w.move_right_edge(col, 0),
                        RightEdgeIn => w.move_right_edge(-col, 0),
                        BottomEdgeOut => w.move_bottom_edge(0, row),
                        BottomEdgeIn => w.move_bottom_edge(0, -row),
                        _ => {}
                    }
                }
            }
        }
        ControlFlow::Continue
    }

    fn edit_url(&mut self, key: &KeyEvent) {
        let InputMode::EditingUrl { window, .. } = self.state.mode() else {
            return;
        };
        let id = window.clone();
        let desktop = self.host.desktop_mut();
        match key.code {
            KeyCode::Enter => {
                self.state.end_url_edit();
                if let Some(w) = desktop.open_window_mut(&id) {
                    w.navigate();
                }
            }
            KeyCode::Esc => {
                if let Some((id, original)) = self.state.end_url_edit()
                    && let Some(w) = desktop.open_window_mut(&id)
                {
                    w.change_url_bar_text(original);
                }
            }
            KeyCode::Backspace => {
                if let Some(w) = desktop.open_window_mut(&id) {
                    let mut text = w.url_bar_text().to_string();
                    text.pop();
                    w.change_url_bar_text(text);
                }
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                if let Some(w) = desktop.open_window_mut(&id) {
                    let mut text = w.url_bar_text().to_string();
                    text.push(c);
                    w.change_url_bar_text(text);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(hit) = hit_test(&self.host, mouse.column, mouse.row) else {
                    return;
                };
                self.host.desktop_mut().focus_window(&hit.window);
                if let Some(target) = hit.target {
                    self.state.begin_drag(Drag {
                        window: hit.window,
                        target,
                        column: mouse.column,
                        row: mouse.row,
                    });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.state.drag().cloned() else {
                    return;
                };
                let Some((cols, rows)) = self.state.update_drag(mouse.column, mouse.row) else {
                    return;
                };
                let (dx, dy) = (cols * PX_PER_COLUMN, rows * PX_PER_ROW);
                let Some(w) = self.host.desktop_mut().open_window_mut(&drag.window) else {
                    self.state.end_drag();
                    return;
                };
                match drag.target {
                    DragTarget::Move => w.nudge(dx, dy),
                    DragTarget::LeftEdge => w.move_left_edge(dx, dy),
                    DragTarget::RightEdge => w.move_right_edge(dx, dy),
                    DragTarget::BottomEdge => w.move_bottom_edge(dx, dy),
                    DragTarget::BottomLeftCorner => w.move_bottom_left_corner(dx, dy),
                    DragTarget::BottomRightCorner => w.move_bottom_right_corner(dx, dy),
                }
            }
            MouseEventKind::Up(_) => {
                self.state.end_drag();
            }
            _ => {}
        }
    }
}

/// Drive `app` until the user quits: one draw per frame, input in between.
pub fn run_app<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    app: &mut App,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    event_loop.run(|_, event| match event {
        LoopEvent::Frame { elapsed } => {
            app.tick(elapsed);
            terminal
                .draw(|frame| app.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Input(event) => Ok(app.handle_event(&event)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;
    use crossterm::event::KeyEventKind;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app_with_home() -> (App, WindowId) {
        let mut app = App::default();
        let id = app.open_home_window(Placement::Default);
        (app, id)
    }

    #[test]
    fn url_edit_navigates_on_enter() {
        let (mut app, id) = app_with_home();
        app.handle_event(&key(KeyCode::Char('e')));
        for _ in 0.."http://example.com".len() {
            app.handle_event(&key(KeyCode::Backspace));
        }
        for c in "b.test".chars() {
            app.handle_event(&key(KeyCode::Char(c)));
        }
        app.handle_event(&key(KeyCode::Enter));
        let w = app.host().desktop().window(&id).unwrap();
        assert_eq!(w.history().current(), "http://b.test");
        assert_eq!(w.navigation_target().value().map(String::as_str), Some("http://b.test"));
        assert_eq!(app.state().mode(), &InputMode::Desktop);
    }

    #[test]
    fn url_edit_cancel_restores_text() {
        let (mut app, id) = app_with_home();
        app.handle_event(&key(KeyCode::Char('e')));
        app.handle_event(&key(KeyCode::Char('x')));
        app.handle_event(&key(KeyCode::Esc));
        let w = app.host().desktop().window(&id).unwrap();
        assert_eq!(w.url_bar_text(), "http://example.com");
        assert_eq!(w.history().len(), 1);
    }

    #[test]
    fn new_and_close_keys_manage_windows() {
        let (mut app, first) = app_with_home();
        app.handle_event(&key(KeyCode::Char('n')));
        assert_eq!(app.host().desktop().open_window_count(), 2);
        app.handle_event(&key(KeyCode::Char('w')));
        assert_eq!(app.host().desktop().open_window_count(), 1);
        assert_eq!(app.host().desktop().focused_window().map(|w| w.id()), Some(&first));
    }

    #[test]
    fn arrows_nudge_by_one_cell() {
        let (mut app, id) = app_with_home();
        app.handle_event(&key(KeyCode::Right));
        app.handle_event(&key(KeyCode::Down));
        let w = app.host().desktop().window(&id).unwrap();
        assert_eq!(w.position().x, 60 + PX_PER_COLUMN);
        assert_eq!(w.position().y, 60 + PX_PER_ROW);
    }

    #[test]
    fn dragging_the_title_bar_moves_the_window() {
        let (mut app, id) = app_with_home();
        // Title bar row of a window at (60,60) is row 3.
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 20, 3));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 22, 4));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 22, 4));
        let w = app.host().desktop().window(&id).unwrap();
        assert_eq!(w.position().x, 60 + 2 * PX_PER_COLUMN);
        assert_eq!(w.position().y, 60 + PX_PER_ROW);
        assert!(app.state().drag().is_none());
    }

    #[test]
    fn dragging_the_right_edge_resizes() {
        let (mut app, id) = app_with_home();
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 134, 10));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 130, 10));
        let w = app.host().desktop().window(&id).unwrap();
        assert_eq!(w.width(), 1024 - 4 * PX_PER_COLUMN);
        assert_eq!(w.position().x, 60);
    }

    #[test]
    fn help_overlay_swallows_the_next_key() {
        let (mut app, _) = app_with_home();
        app.handle_event(&key(KeyCode::Char('?')));
        assert!(app.state().help_visible());
        assert!(matches!(
            app.handle_event(&key(KeyCode::Char('q'))),
            ControlFlow::Continue
        ));
        assert!(!app.state().help_visible());
    }

    #[test]
    fn run_app_draws_and_quits() {
        let (mut app, _) = app_with_home();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        q.kind = KeyEventKind::Press;
        let driver = ScriptedDriver::new(vec![Event::Key(q)]);
        run_app(&mut terminal, driver, &mut app, Duration::from_millis(0)).unwrap();
        let w = app.host().desktop().focused_window().unwrap();
        assert_eq!(w.screen_size(), (80 * PX_PER_COLUMN, 24 * PX_PER_ROW));
    }
}
