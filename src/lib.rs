//! A desktop of emulated browser windows: stacking by altitude, cascaded
//! placement, per-window history, and the message protocol spoken with the
//! documents embedded in each window.

pub mod actions;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod history;
pub mod keybindings;
pub mod protocol;
pub mod router;
pub mod runner;
pub mod sequence;
pub mod signal;
pub mod state;
pub mod tracing_sub;
pub mod transient;
pub mod ui;
pub mod url;
pub mod window;
