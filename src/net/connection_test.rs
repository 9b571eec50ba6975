use super::*;

// =============================================================
// begin_connect
// =============================================================

#[test]
fn connect_from_disconnected_starts_a_transport() {
    assert_eq!(
        begin_connect(ConnectionStatus::Disconnected),
        ConnectDecision::StartTransport
    );
}

#[test]
fn concurrent_connect_shares_the_in_flight_outcome() {
    // First caller transitions Disconnected -> Connecting; the second caller
    // must join rather than open a duplicate socket.
    assert_eq!(
        begin_connect(ConnectionStatus::Connecting),
        ConnectDecision::JoinInFlight
    );
}

#[test]
fn connect_while_connected_is_a_noop() {
    assert_eq!(
        begin_connect(ConnectionStatus::Connected),
        ConnectDecision::AlreadyConnected
    );
}

#[test]
fn status_defaults_to_disconnected() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}

// =============================================================
// finish_handshake
// =============================================================

#[test]
fn disconnect_during_the_handshake_discards_the_session() {
    // CONNECTED arriving after an explicit disconnect must not install the
    // transport or publish Connected.
    assert_eq!(finish_handshake(true), HandshakeDecision::Discard);
}

#[test]
fn undisturbed_handshake_installs_the_session() {
    assert_eq!(finish_handshake(false), HandshakeDecision::Install);
}

// =============================================================
// RetryPolicy / ReconnectState
// =============================================================

#[test]
fn retry_delays_grow_linearly() {
    let policy = RetryPolicy { base_ms: 1000, max_attempts: 3 };
    assert_eq!(policy.delay_ms(1), Some(1000));
    assert_eq!(policy.delay_ms(2), Some(2000));
    assert_eq!(policy.delay_ms(3), Some(3000));
}

#[test]
fn retry_policy_rejects_attempts_past_the_budget() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_ms(0), None);
    assert_eq!(policy.delay_ms(4), None);
}

#[test]
fn three_failures_produce_strictly_increasing_delays() {
    let policy = RetryPolicy::default();
    let mut state = ReconnectState::default();

    let d1 = state.next_delay(&policy).expect("first retry");
    let d2 = state.next_delay(&policy).expect("second retry");
    let d3 = state.next_delay(&policy).expect("third retry");
    assert!(d1 < d2 && d2 < d3);
}

#[test]
fn fourth_failure_surfaces_max_reconnect_attempts() {
    let policy = RetryPolicy::default();
    let mut state = ReconnectState::default();
    for _ in 0..3 {
        state.next_delay(&policy).expect("within budget");
    }

    let err = state.next_delay(&policy).expect_err("budget exhausted");
    assert_eq!(err, ClientError::MaxReconnectAttempts);
}

#[test]
fn reset_restores_the_full_attempt_budget() {
    let policy = RetryPolicy::default();
    let mut state = ReconnectState::default();
    for _ in 0..3 {
        state.next_delay(&policy).expect("within budget");
    }

    state.reset();
    assert_eq!(state.attempts(), 0);
    assert_eq!(state.next_delay(&policy).expect("budget restored"), 1000);
}

#[test]
fn connect_timeout_is_fifteen_seconds() {
    assert_eq!(CONNECT_TIMEOUT_MS, 15_000);
}
