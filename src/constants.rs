//! Shared crate-wide constants.

/// Height of the menu bar across the top of the desktop. Windows can never be
/// dragged above it.
pub const MENU_BAR_HEIGHT_PX: i32 = 21;

/// Height of the black strip at the bottom of the screen that hides the
/// browser's own link-preview tooltip.
pub const BOTTOM_LETTERBOX_HEIGHT_PX: i32 = 22;

/// Height of a window's title bar (drag handle, buttons and URL bar).
pub const WINDOW_HEAD_HEIGHT_PX: i32 = 48;

/// Pixels of a window that must stay reachable inside the screen so the user
/// can grab it again.
pub const MIN_VISIBLE_MARGIN_PX: i32 = 20;

pub const DEFAULT_WINDOW_WIDTH: i32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;

pub const DEFAULT_SCREEN_WIDTH: i32 = 1024;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 768;

pub const HOME_URL: &str = "http://example.com";

/// Random bytes in a window id; rendered as twice as many hex digits.
pub const WINDOW_ID_BYTES: usize = 20;

/// How many ancestors the injected script walks up from a hovered element
/// looking for an anchor.
pub const HOVER_LINK_MAX_DEPTH: u32 = 20;

/// Milliseconds a transient status message stays up.
pub const TRANSIENT_MESSAGE_MS: i64 = 3000;

/// Origins the injected content script accepts `inject` messages from.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:1234", "http://localhost:8080"];
