use super::*;

#[test]
fn display_uses_backend_message_for_rejections() {
    let err = ClientError::ActionRejected("room is full".to_owned());
    assert_eq!(err.to_string(), "room is full");
}

#[test]
fn rejected_falls_back_to_generic_message() {
    assert_eq!(
        ClientError::rejected(None),
        ClientError::ActionRejected("request failed".to_owned())
    );
    assert_eq!(
        ClientError::rejected(Some("nope".to_owned())),
        ClientError::ActionRejected("nope".to_owned())
    );
}

#[test]
fn connection_errors_have_stable_messages() {
    assert_eq!(ClientError::NotConnected.to_string(), "not connected");
    assert_eq!(ClientError::ConnectTimeout.to_string(), "connection timed out");
    assert_eq!(
        ClientError::MaxReconnectAttempts.to_string(),
        "reconnect attempts exhausted"
    );
}
