use path_os::runner::{App, StartView, start_view_router};

#[test]
fn hashes_pick_the_start_view() {
    let router = start_view_router();
    assert_eq!(router.route("#/"), StartView::Desktop);
    assert_eq!(router.route(""), StartView::Desktop);
    assert_eq!(router.route("#/help"), StartView::Help);
    assert_eq!(router.route("#/nowhere"), StartView::Desktop);
}

#[test]
fn showing_a_view_is_idempotent() {
    let mut app = App::default();
    app.show(StartView::Help);
    app.show(StartView::Help);
    assert!(app.state().help_visible());
    app.show(StartView::Desktop);
    assert!(!app.state().help_visible());
}
