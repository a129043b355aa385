use super::{InboundMessage, InjectRequest, OutboundMessage, decode_inbound, is_allowed_origin};
use crate::signal::Signal;
use crate::transient::TransientMessageBox;
use crate::window::{Desktop, Placement, Window, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Not valid JSON, untagged, or a type the host does not handle.
    Malformed,
    /// `re` names no open window (never existed, or already closed).
    Unaddressed,
    /// Sent from an origin outside the configured allow-list.
    ForeignOrigin,
}

/// What the host did with an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Metadata(WindowId),
    Status(WindowId),
    Unloading(Option<WindowId>),
    Opened(WindowId),
    Dropped(DropReason),
}

/// The desktop plus everything the host keeps about cross-frame traffic.
///
/// All embedded documents share one message channel, so every message is
/// matched against an open window's id before it touches any state.
#[derive(Debug, Default)]
pub struct DesktopHost {
    desktop: Desktop,
    status: TransientMessageBox,
}

impl DesktopHost {
    pub fn new(desktop: Desktop) -> Self {
        let status = TransientMessageBox::new(desktop.config().transient_message_ms);
        Self { desktop, status }
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    /// Current status line (hovered or activated link), if still showing.
    pub fn status_text(&self) -> Option<&str> {
        self.status.text()
    }

    pub fn tick(&mut self, elapsed_ms: i64) {
        self.status.tick(elapsed_ms);
    }

    pub fn dismiss_status(&mut self) {
        self.status.dismiss();
    }

    /// The `inject` message to post into `window`'s document once it loads.
    /// None if the window is not open.
    pub fn handshake(&self, window: &WindowId) -> Option<OutboundMessage> {
        self.desktop
            .window(window)
            .filter(|w| !w.is_closed())
            .map(|w| {
                OutboundMessage::Inject(InjectRequest::for_window(
                    w.id(),
                    self.desktop.config().hover_link_max_depth,
                ))
            })
    }

    /// Whether messages from `origin` may touch the desktop.
    pub fn accepts_origin(&self, origin: &str) -> bool {
        is_allowed_origin(origin, &self.desktop.config().allowed_origins)
    }

    /// Route `msg` only if `origin` is on the allow-list.
    pub fn receive_from(&mut self, origin: &str, msg: InboundMessage) -> Routed {
        if !self.accepts_origin(origin) {
            tracing::debug!(origin, kind = msg.kind(), "dropped message from foreign origin");
            return Routed::Dropped(DropReason::ForeignOrigin);
        }
        self.receive(msg)
    }

    /// Decode and route a raw message from the transport.
    pub fn receive_raw(&mut self, raw: &str) -> Routed {
        match decode_inbound(raw) {
            Ok(msg) => self.receive(msg),
            Err(err) => {
                tracing::debug!(error = %err, "dropped cross-frame message");
                Routed::Dropped(DropReason::Malformed)
            }
        }
    }

    pub fn receive(&mut self, msg: InboundMessage) -> Routed {
        let kind = msg.kind();
        let routed = match msg {
            InboundMessage::DocumentMetadata { re, title, url } => {
                match self.desktop.open_window_mut(&re) {
                    Some(window) => {
                        window.notice_title(title);
                        window.notice_new_url(url);
                        Routed::Metadata(re)
                    }
                    None => Routed::Dropped(DropReason::Unaddressed),
                }
            }
            InboundMessage::HoverLink { re, href } | InboundMessage::ActivateLink { re, href } => {
                if self.desktop.open_window_mut(&re).is_none() {
                    Routed::Dropped(DropReason::Unaddressed)
                } else {
                    if href.is_empty() {
                        self.status.dismiss();
                    } else {
                        self.status.receive(&Signal::of(href));
                    }
                    Routed::Status(re)
                }
            }
            InboundMessage::BeforeUnload { re: None } => Routed::Unloading(None),
            InboundMessage::BeforeUnload { re: Some(re) } => {
                if self.desktop.open_window_mut(&re).is_some() {
                    Routed::Unloading(Some(re))
                } else {
                    Routed::Dropped(DropReason::Unaddressed)
                }
            }
            InboundMessage::OpenWindow { url } => {
                let placement = self
                    .desktop
                    .focused_window()
                    .map(Window::resolved_position)
                    .map_or(Placement::Default, Placement::OffsetFrom);
                Routed::Opened(self.desktop.add_window(url, placement))
            }
        };
        match &routed {
            Routed::Dropped(reason) => {
                tracing::debug!(kind, ?reason, "dropped cross-frame message")
            }
            other => tracing::trace!(kind, routed = ?other, "routed cross-frame message"),
        }
        routed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Point;

    fn host_with_window() -> (DesktopHost, WindowId) {
        let mut host = DesktopHost::default();
        let id = host
            .desktop_mut()
            .add_window("http://example.com", Placement::Default);
        (host, id)
    }

    #[test]
    fn metadata_updates_url_bar_and_title() {
        let (mut host, id) = host_with_window();
        let routed = host.receive(InboundMessage::DocumentMetadata {
            re: id.clone(),
            title: "Example Domain".into(),
            url: "http://example.com/next".into(),
        });
        assert_eq!(routed, Routed::Metadata(id.clone()));
        let w = host.desktop().window(&id).unwrap();
        assert_eq!(w.url_bar_text(), "http://example.com/next");
        assert_eq!(w.title(), Some("Example Domain"));
        assert_eq!(w.history().len(), 2);
    }

    #[test]
    fn hover_link_shows_status() {
        let (mut host, id) = host_with_window();
        host.receive(InboundMessage::HoverLink {
            re: id,
            href: "http://example.com/a".into(),
        });
        assert_eq!(host.status_text(), Some("http://example.com/a"));
        host.tick(3000);
        assert_eq!(host.status_text(), None);
    }

    #[test]
    fn unaddressed_status_is_dropped() {
        let (mut host, _) = host_with_window();
        let routed = host.receive(InboundMessage::HoverLink {
            re: WindowId::from("nobody"),
            href: "http://x".into(),
        });
        assert_eq!(routed, Routed::Dropped(DropReason::Unaddressed));
        assert_eq!(host.status_text(), None);
    }

    #[test]
    fn open_window_offsets_from_focused_window() {
        let (mut host, _) = host_with_window();
        let Routed::Opened(id) = host.receive(InboundMessage::OpenWindow {
            url: "https://rust-lang.org".into(),
        }) else {
            panic!("expected a new window");
        };
        let w = host.desktop().window(&id).unwrap();
        assert_eq!(w.position(), Point::new(81, 81));
        assert_eq!(host.desktop().focused_window().map(Window::id), Some(&id));
    }

    #[test]
    fn open_window_on_empty_desktop_uses_cascade() {
        let mut host = DesktopHost::default();
        let Routed::Opened(id) = host.receive(InboundMessage::OpenWindow {
            url: "https://rust-lang.org".into(),
        }) else {
            panic!("expected a new window");
        };
        assert_eq!(
            host.desktop().window(&id).map(Window::position),
            Some(Point::new(60, 60))
        );
    }

    #[test]
    fn malformed_raw_messages_are_dropped() {
        let (mut host, _) = host_with_window();
        assert_eq!(
            host.receive_raw("{\"type\":\"mystery\"}"),
            Routed::Dropped(DropReason::Malformed)
        );
        assert_eq!(host.receive_raw("]"), Routed::Dropped(DropReason::Malformed));
    }

    #[test]
    fn handshake_only_for_open_windows() {
        let (mut host, id) = host_with_window();
        assert!(host.handshake(&id).is_some());
        host.desktop_mut().close_window(&id);
        assert!(host.handshake(&id).is_none());
    }

    #[test]
    fn foreign_origins_cannot_open_windows() {
        let (mut host, _) = host_with_window();
        let open = || InboundMessage::OpenWindow {
            url: "http://b.test".into(),
        };
        assert_eq!(
            host.receive_from("http://evil.test", open()),
            Routed::Dropped(DropReason::ForeignOrigin)
        );
        assert_eq!(host.desktop().open_window_count(), 1);
        assert!(matches!(
            host.receive_from("http://localhost:8080", open()),
            Routed::Opened(_)
        ));
        assert_eq!(host.desktop().open_window_count(), 2);
    }
}
