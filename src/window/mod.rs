pub mod decorator;

mod desktop;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DesktopConfig;
use crate::constants::{
    BOTTOM_LETTERBOX_HEIGHT_PX, MENU_BAR_HEIGHT_PX, MIN_VISIBLE_MARGIN_PX, WINDOW_ID_BYTES,
};
use crate::history::History;
use crate::sequence::Sequence;
use crate::signal::Signal;
use crate::url::normalize_url;

pub use desktop::{Desktop, Placement};

/// Top-left corner of a window, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque window identity: random hex, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn random() -> Self {
        let bytes: [u8; WINDOW_ID_BYTES] = rand::random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WindowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One emulated browser window.
///
/// A window is never removed from its desktop. Closing flips a one-way flag
/// and every mutating operation on a closed window is a silent no-op, so
/// stale references held by in-flight messages stay harmless.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    screen_width: i32,
    screen_height: i32,
    altitude: u64,
    closed: bool,
    url_bar: String,
    title: Option<String>,
    history: History,
    navigation_target: Signal<String>,
}

impl Window {
    pub(crate) fn new(
        initial_url: impl Into<String>,
        position: Point,
        config: &DesktopConfig,
        altitude: u64,
    ) -> Self {
        let initial_url = initial_url.into();
        Self {
            id: WindowId::random(),
            x: position.x,
            y: position.y,
            width: config.window_width,
            height: config.window_height,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            altitude,
            closed: false,
            url_bar: initial_url.clone(),
            title: None,
            history: History::new(initial_url.clone()),
            navigation_target: Signal::of(initial_url),
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    /// Stored position, before clamping.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Horizontal position clamped so at least a sliver of the window stays
    /// on screen.
    pub fn resolved_x(&self) -> i32 {
        let min_x = MIN_VISIBLE_MARGIN_PX.saturating_sub(self.width);
        let max_x = self.screen_width.saturating_sub(MIN_VISIBLE_MARGIN_PX);
        if self.x < min_x {
            return min_x;
        }
        if self.x > max_x {
            return max_x;
        }
        self.x
    }

    /// Vertical position clamped below the menu bar and above the letterbox.
    pub fn resolved_y(&self) -> i32 {
        if self.y <= MENU_BAR_HEIGHT_PX {
            return MENU_BAR_HEIGHT_PX;
        }
        let max_y = self
            .screen_height
            .saturating_sub(BOTTOM_LETTERBOX_HEIGHT_PX + MIN_VISIBLE_MARGIN_PX);
        if self.y > max_y {
            return max_y;
        }
        self.y
    }

    pub fn resolved_position(&self) -> Point {
        Point::new(self.resolved_x(), self.resolved_y())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    pub fn altitude(&self) -> u64 {
        self.altitude
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn url_bar_text(&self) -> &str {
        &self.url_bar
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The latest "load this URL" instruction for the embedded document.
    pub fn navigation_target(&self) -> &Signal<String> {
        &self.navigation_target
    }

    pub fn nudge(&mut self, dx: i32, dy: i32) {
        if self.closed {
            return;
        }
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn move_left_edge(&mut self, dx: i32, _dy: i32) {
        if self.closed {
            return;
        }
        self.x = self.x.saturating_add(dx);
        self.width = self.width.saturating_sub(dx);
    }

    pub fn move_right_edge(&mut self, dx: i32, _dy: i32) {
        if self.closed {
            return;
        }
        self.width = self.width.saturating_add(dx);
    }

    pub fn move_bottom_edge(&mut self, _dx: i32, dy: i32) {
        if self.closed {
            return;
        }
        self.height = self.height.saturating_add(dy);
    }

    pub fn move_bottom_left_corner(&mut self, dx: i32, dy: i32) {
        self.move_left_edge(dx, dy);
        self.move_bottom_edge(dx, dy);
    }

    pub fn move_bottom_right_corner(&mut self, dx: i32, dy: i32) {
        self.move_right_edge(dx, dy);
        self.move_bottom_edge(dx, dy);
    }

    /// Record the latest viewport size; used by the resolved position getters.
    pub fn notice_screen_dimensions(&mut self, width: i32, height: i32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Raise this window above every other window allocated from `altitudes`.
    pub fn focus(&mut self, altitudes: &mut Sequence<u64>) {
        if self.closed {
            return;
        }
        self.altitude = altitudes.next();
        tracing::trace!(window_id = %self.id, altitude = self.altitude, "focused window");
    }

    pub fn change_url_bar_text(&mut self, text: impl Into<String>) {
        if self.closed {
            return;
        }
        self.url_bar = text.into();
    }

    /// Commit the URL bar: trim and normalize it, record it and tell the
    /// embedded document to load it. Blank text is ignored. The bar itself
    /// keeps what was typed.
    pub fn navigate(&mut self) {
        if self.closed || self.url_bar.trim().is_empty() {
            return;
        }
        let url = normalize_url(self.url_bar.trim());
        tracing::debug!(window_id = %self.id, %url, "navigate");
        self.history.add(url.clone());
        self.navigation_target = Signal::of(url);
    }

    /// Step back one history entry and redirect the embedded document there.
    /// Does nothing at the first entry.
    pub fn go_back(&mut self) {
        if self.closed || !self.history.can_go_back() {
            return;
        }
        let url = self.history.go_back().to_string();
        tracing::debug!(window_id = %self.id, %url, "history back");
        self.url_bar = url.clone();
        self.navigation_target = Signal::of(url);
    }

    /// The embedded document reports where it actually is. Updates the URL bar
    /// and history but does not publish a navigation target: the document is
    /// already there and re-publishing would reload it.
    pub fn notice_new_url(&mut self, url: impl Into<String>) {
        if self.closed {
            return;
        }
        let url = url.into();
        self.url_bar = url.clone();
        self.history.add(url);
    }

    pub fn notice_title(&mut self, title: impl Into<String>) {
        if self.closed {
            return;
        }
        let title = title.into();
        self.title = (!title.is_empty()).then_some(title);
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        tracing::debug!(window_id = %self.id, "closed window");
    }
}
