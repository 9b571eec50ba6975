use super::*;

#[test]
fn notices_replace_rather_than_stack() {
    let mut ui = UiState::default();
    ui.notify("joined room");
    ui.notify_error("connection lost");

    let notice = ui.notice.as_ref().expect("notice");
    assert_eq!(notice.message, "connection lost");
    assert!(notice.is_error);
}

#[test]
fn dismiss_clears_the_banner() {
    let mut ui = UiState::default();
    ui.notify("joined room");
    ui.dismiss_notice();
    assert!(ui.notice.is_none());
}

#[test]
fn dark_mode_defaults_off() {
    assert!(!UiState::default().dark_mode);
}
