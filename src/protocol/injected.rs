//! The script the host injects into each embedded document.
//!
//! A content script in every iframe listens for `inject` messages, evaluates
//! `code` and calls the resulting function with a handle to the host
//! (`{window, origin}`) followed by `extraArgs`. The script below reports the
//! document's metadata and link activity back to the host, tagging each
//! message with the window id it was given.
//!
//! This is NOT a security boundary. The content script runs arbitrary code
//! from any origin on its allow-list and the allow-list check is nominal. It
//! exists so the injected behavior can live with the host's code instead of in
//! the browser extension.

use indoc::indoc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::window::WindowId;

/// Evaluated inside the embedded document. Called as
/// `(hostFrame, {replyTo, maxDepth})`.
pub const INJECTED_SCRIPT: &str = indoc! {r#"
    (function (hostFrame, {replyTo, maxDepth}) {
      const {window: hostWindow, origin: hostOrigin} = hostFrame

      function postMessageToHost(msg) {
        hostWindow.postMessage(msg, hostOrigin)
      }

      function nearestAnchor(el) {
        for (let i = 0; i < maxDepth && el; i++) {
          if (el.tagName === "A") return el
          el = el.parentElement
        }
        return null
      }

      postMessageToHost({
        type: "document-metadata",
        re: replyTo,
        title: document.title,
        url: window.location.href,
      })

      window.addEventListener("beforeunload", () => {
        postMessageToHost({type: "beforeunload", re: replyTo})
      })

      if (document.body) {
        document.body.addEventListener("mousemove", e => {
          const anchor = nearestAnchor(e.target)
          if (anchor) {
            postMessageToHost({type: "hover-link", re: replyTo, href: anchor.href})
          }
        })
        document.body.addEventListener("click", e => {
          const anchor = nearestAnchor(e.target)
          if (anchor) {
            postMessageToHost({type: "activate-link", re: replyTo, href: anchor.href})
          }
        })
      }
    })
"#};

/// Body of an `inject` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectRequest {
    pub code: String,
    pub extra_args: Vec<serde_json::Value>,
}

impl InjectRequest {
    /// The request that wires a freshly loaded document up to `window`.
    pub fn for_window(window: &WindowId, max_depth: u32) -> Self {
        Self {
            code: INJECTED_SCRIPT.to_string(),
            extra_args: vec![json!({ "replyTo": window, "maxDepth": max_depth })],
        }
    }
}

/// Whether the content script should accept `inject` messages from `origin`.
pub fn is_allowed_origin(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|o| o == origin)
}
