//! Wire format for traffic between the desktop host and embedded documents.
//!
//! Every message is a JSON object tagged by its `"type"` field. Documents
//! address the host by echoing their window id in `re`; the host uses it to
//! find the window a message is about. Everything here is best effort: a
//! message that cannot be decoded or addressed is dropped, never surfaced.

pub mod host;
pub mod injected;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::window::WindowId;

pub use host::{DesktopHost, DropReason, Routed};
pub use injected::{InjectRequest, is_allowed_origin};

pub const INBOUND_TYPES: [&str; 5] = [
    "document-metadata",
    "hover-link",
    "activate-link",
    "beforeunload",
    "path-os-open-window",
];

/// Messages the host receives, from embedded documents or from the browser
/// extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// Sent once per load with the document's real title and location.
    #[serde(rename = "document-metadata")]
    DocumentMetadata {
        re: WindowId,
        #[serde(default)]
        title: String,
        url: String,
    },
    /// The pointer is over a link inside the document.
    #[serde(rename = "hover-link")]
    HoverLink {
        re: WindowId,
        #[serde(default)]
        href: String,
    },
    /// The user clicked a link inside the document.
    #[serde(rename = "activate-link")]
    ActivateLink {
        re: WindowId,
        #[serde(default)]
        href: String,
    },
    /// The document is about to unload. The content script's own handler
    /// sends this without `re`.
    #[serde(rename = "beforeunload")]
    BeforeUnload {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        re: Option<WindowId>,
    },
    /// The extension intercepted a new tab; open it as a window instead.
    #[serde(rename = "path-os-open-window")]
    OpenWindow { url: String },
}

impl InboundMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::DocumentMetadata { .. } => "document-metadata",
            InboundMessage::HoverLink { .. } => "hover-link",
            InboundMessage::ActivateLink { .. } => "activate-link",
            InboundMessage::BeforeUnload { .. } => "beforeunload",
            InboundMessage::OpenWindow { .. } => "path-os-open-window",
        }
    }

    /// The window this message is about, if it names one.
    pub fn re(&self) -> Option<&WindowId> {
        match self {
            InboundMessage::DocumentMetadata { re, .. }
            | InboundMessage::HoverLink { re, .. }
            | InboundMessage::ActivateLink { re, .. } => Some(re),
            InboundMessage::BeforeUnload { re } => re.as_ref(),
            InboundMessage::OpenWindow { .. } => None,
        }
    }
}

/// Messages the host sends into an embedded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "inject")]
    Inject(InjectRequest),
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode one inbound message, telling apart bad JSON, a missing tag and a
/// tag this host does not handle.
pub fn decode_inbound(raw: &str) -> Result<InboundMessage, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(ProtocolError::MissingType)?;
    if !INBOUND_TYPES.contains(&kind) {
        return Err(ProtocolError::UnknownType(kind.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read a JSON-lines file of inbound messages. Blank lines and lines starting
/// with `#` are skipped.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<InboundMessage>, ProtocolError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProtocolError::Script {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(path, &text)
}

fn parse_script(path: &Path, text: &str) -> Result<Vec<InboundMessage>, ProtocolError> {
    let mut messages = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let msg = decode_inbound(line).map_err(|e| ProtocolError::ScriptLine {
            path: path.to_path_buf(),
            line: idx + 1,
            source: Box::new(e),
        })?;
        messages.push(msg);
    }
    Ok(messages)
}
