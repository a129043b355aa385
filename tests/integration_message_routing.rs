use path_os::protocol::{DesktopHost, DropReason, InboundMessage, Routed};
use path_os::window::{Placement, WindowId};

fn snapshot(host: &DesktopHost, id: &WindowId) -> (String, Option<String>, usize) {
    let w = host.desktop().window(id).unwrap();
    (
        w.url_bar_text().to_string(),
        w.title().map(str::to_string),
        w.history().len(),
    )
}

#[test]
fn metadata_for_closed_or_unknown_windows_changes_nothing() {
    let mut host = DesktopHost::default();
    let open = host.desktop_mut().add_window("http://open.test", Placement::Default);
    let closed = host
        .desktop_mut()
        .add_window("http://closed.test", Placement::Default);
    host.desktop_mut().close_window(&closed);

    let before = (snapshot(&host, &open), snapshot(&host, &closed));

    for re in [closed.clone(), WindowId::from("no-such-window")] {
        let routed = host.receive(InboundMessage::DocumentMetadata {
            re,
            title: "Spoofed".into(),
            url: "http://evil.test".into(),
        });
        assert_eq!(routed, Routed::Dropped(DropReason::Unaddressed));
    }

    assert_eq!((snapshot(&host, &open), snapshot(&host, &closed)), before);
}

#[test]
fn raw_messages_are_decoded_and_routed() {
    let mut host = DesktopHost::default();
    let id = host.desktop_mut().add_window("http://a.test", Placement::Default);

    let raw = format!(
        r#"{{"type":"document-metadata","re":"{id}","title":"A","url":"http://a.test/page"}}"#
    );
    assert_eq!(host.receive_raw(&raw), Routed::Metadata(id.clone()));
    assert_eq!(snapshot(&host, &id), ("http://a.test/page".into(), Some("A".into()), 2));

    let hover = format!(r#"{{"type":"hover-link","re":"{id}","href":"http://a.test/b"}}"#);
    assert_eq!(host.receive_raw(&hover), Routed::Status(id.clone()));
    assert_eq!(host.status_text(), Some("http://a.test/b"));

    let clear = format!(r#"{{"type":"hover-link","re":"{id}","href":""}}"#);
    host.receive_raw(&clear);
    assert_eq!(host.status_text(), None);

    for junk in ["not json", r#"{"re":"x"}"#, r#"{"type":"resize"}"#] {
        assert_eq!(host.receive_raw(junk), Routed::Dropped(DropReason::Malformed));
    }
}

#[test]
fn open_window_requests_cascade_from_the_focused_window() {
    let mut host = DesktopHost::default();
    host.desktop_mut().add_window("http://a.test", Placement::Default);

    let first = host.receive_raw(r#"{"type":"path-os-open-window","url":"http://b.test"}"#);
    let second = host.receive_raw(r#"{"type":"path-os-open-window","url":"http://c.test"}"#);
    let (Routed::Opened(first), Routed::Opened(second)) = (first, second) else {
        panic!("expected two new windows");
    };

    let pos = |id: &WindowId| host.desktop().window(id).unwrap().position();
    assert_eq!((pos(&first).x, pos(&first).y), (81, 81));
    assert_eq!((pos(&second).x, pos(&second).y), (102, 102));
    assert_eq!(host.desktop().focused_window().map(|w| w.id()), Some(&second));
    assert_eq!(host.desktop().open_window_count(), 3);
}

#[test]
fn handshake_only_for_open_windows() {
    let mut host = DesktopHost::default();
    let id = host.desktop_mut().add_window("http://a.test", Placement::Default);
    let json = host.handshake(&id).unwrap().to_json().unwrap();
    assert!(json.contains(r#""type":"inject""#));
    assert!(json.contains(id.as_str()));

    host.desktop_mut().close_window(&id);
    assert!(host.handshake(&id).is_none());
}
