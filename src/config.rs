//! Desktop configuration.
//!
//! Plain values with sensible defaults. The binary builds one from its
//! command line and calls [`DesktopConfig::validate`] before use.

use crate::constants::{
    DEFAULT_ALLOWED_ORIGINS, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, HOME_URL, HOVER_LINK_MAX_DEPTH, TRANSIENT_MESSAGE_MS,
};
use crate::error::ConfigError;
use crate::sequence::Cascade;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub window_width: i32,
    pub window_height: i32,
    /// Screen size assumed until the viewport is first measured.
    pub screen_width: i32,
    pub screen_height: i32,
    pub cascade: Cascade,
    pub home_url: String,
    pub allowed_origins: Vec<String>,
    pub hover_link_max_depth: u32,
    pub transient_message_ms: i64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            cascade: Cascade::default(),
            home_url: HOME_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hover_link_max_depth: HOVER_LINK_MAX_DEPTH,
            transient_message_ms: TRANSIENT_MESSAGE_MS,
        }
    }
}

impl DesktopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        let c = self.cascade;
        if c.step <= 0 {
            return Err(ConfigError::CascadeStep(c.step));
        }
        if c.origin.x > c.safe_width || c.origin.y > c.safe_height {
            return Err(ConfigError::CascadeOrigin {
                x: c.origin.x,
                y: c.origin.y,
                width: c.safe_width,
                height: c.safe_height,
            });
        }
        if self.allowed_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(ConfigError::EmptyOrigin);
        }
        Ok(())
    }
}
