//! Error types for the fallible edges of the crate.
//!
//! Desktop and window operations themselves cannot fail. Errors only come
//! from decoding cross-frame traffic and from validating configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message is missing a \"type\" tag")]
    MissingType,
    #[error("unknown message type {0:?}")]
    UnknownType(String),
    #[error("failed to read script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {source}")]
    ScriptLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<ProtocolError>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window size must be positive, got {width}x{height}")]
    WindowSize { width: i32, height: i32 },
    #[error("screen size must be positive, got {width}x{height}")]
    ScreenSize { width: i32, height: i32 },
    #[error("cascade step must be positive, got {0}")]
    CascadeStep(i32),
    #[error("cascade origin ({x}, {y}) lies outside the {width}x{height} safe region")]
    CascadeOrigin {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("allowed origin must not be empty")]
    EmptyOrigin,
}
