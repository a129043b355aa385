use super::{Point, Window, WindowId};
use crate::config::DesktopConfig;
use crate::sequence::{Sequence, altitude_sequence, cascade_sequence};

/// Where a new window should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Next slot of the desktop's diagonal cascade.
    Default,
    /// One cascade step down and right of the given point, wrapping back to
    /// the cascade origin when that leaves the safe region.
    OffsetFrom(Point),
}

/// Owns every window ever opened and hands out their altitudes.
///
/// Altitudes come from a single increasing sequence, so the open window with
/// the highest altitude is always the unique focused window.
#[derive(Debug)]
pub struct Desktop {
    windows: Vec<Window>,
    altitudes: Sequence<u64>,
    placements: Sequence<Point>,
    config: DesktopConfig,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl Desktop {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            windows: Vec::new(),
            altitudes: altitude_sequence(),
            placements: cascade_sequence(config.cascade),
            config,
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Open a window on `url` and put it in front of every other window.
    pub fn add_window(&mut self, url: impl Into<String>, placement: Placement) -> WindowId {
        let position = match placement {
            Placement::Default => self.placements.next(),
            Placement::OffsetFrom(from) => self.config.cascade.after(from),
        };
        let altitude = self.altitudes.next();
        let window = Window::new(url, position, &self.config, altitude);
        let id = window.id().clone();
        tracing::debug!(
            window_id = %id,
            x = position.x,
            y = position.y,
            altitude,
            url = %window.history().current(),
            "opened window"
        );
        self.windows.push(window);
        id
    }

    /// Open windows in the order they were created.
    pub fn open_windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(|w| !w.is_closed())
    }

    pub fn open_window_count(&self) -> usize {
        self.open_windows().count()
    }

    /// Open windows from back to front.
    pub fn windows_by_altitude(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.open_windows().collect();
        windows.sort_by_key(|w| w.altitude());
        windows
    }

    pub fn focused_window(&self) -> Option<&Window> {
        self.open_windows().max_by_key(|w| w.altitude())
    }

    pub fn focused_window_mut(&mut self) -> Option<&mut Window> {
        self.windows
            .iter_mut()
            .filter(|w| !w.is_closed())
            .max_by_key(|w| w.altitude())
    }

    /// Look up a window by id, open or closed.
    pub fn window(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: &WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// Look up a window by id only if it is still open.
    pub fn open_window_mut(&mut self, id: &WindowId) -> Option<&mut Window> {
        self.windows
            .iter_mut()
            .find(|w| w.id() == id && !w.is_closed())
    }

    /// Raise the window with `id`. Returns false when it is missing or closed.
    pub fn focus_window(&mut self, id: &WindowId) -> bool {
        let Some(window) = self
            .windows
            .iter_mut()
            .find(|w| w.id() == id && !w.is_closed())
        else {
            return false;
        };
        window.focus(&mut self.altitudes);
        true
    }

    pub fn close_window(&mut self, id: &WindowId) -> bool {
        match self.open_window_mut(id) {
            Some(window) => {
                window.close();
                true
            }
            None => false,
        }
    }

    /// Move focus to the next open window in creation order, wrapping around.
    pub fn focus_next(&mut self, forward: bool) {
        let open: Vec<WindowId> = self.open_windows().map(|w| w.id().clone()).collect();
        if open.is_empty() {
            return;
        }
        let idx = self
            .focused_window()
            .and_then(|f| open.iter().position(|id| id == f.id()))
            .unwrap_or(0);
        let step = if forward { 1isize } else { -1isize };
        let next = (idx as isize + step).rem_euclid(open.len() as isize) as usize;
        self.focus_window(&open[next]);
    }

    /// Forward a viewport measurement to every window.
    pub fn notice_screen_dimensions(&mut self, width: i32, height: i32) {
        for window in &mut self.windows {
            window.notice_screen_dimensions(width, height);
        }
    }
}
