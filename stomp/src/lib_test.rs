use super::*;

fn send_frame() -> Frame {
    Frame::new(Command::Send)
        .with_header("destination", "/app/answer")
        .with_header("receipt", "r-1")
        .with_body(r#"{"questionId":7}"#)
}

#[test]
fn command_wire_spellings_are_uppercase() {
    assert_eq!(Command::Connect.as_str(), "CONNECT");
    assert_eq!(Command::Subscribe.as_str(), "SUBSCRIBE");
    assert_eq!(Command::Message.as_str(), "MESSAGE");
    assert_eq!(Command::Disconnect.as_str(), "DISCONNECT");
}

#[test]
fn encode_terminates_with_nul_and_blank_line() {
    let text = encode_frame(&send_frame());
    assert!(text.starts_with("SEND\n"));
    assert!(text.ends_with('\0'));
    assert!(text.contains("\n\n"));
}

#[test]
fn encode_appends_content_length_for_non_empty_body() {
    let text = encode_frame(&send_frame());
    let expected = format!("content-length:{}", r#"{"questionId":7}"#.len());
    assert!(text.contains(&expected));
}

#[test]
fn encode_respects_caller_provided_content_length() {
    let frame = Frame::new(Command::Send)
        .with_header("content-length", "4")
        .with_body("body");
    let text = encode_frame(&frame);
    assert_eq!(text.matches("content-length").count(), 1);
}

#[test]
fn decode_round_trips_command_headers_and_body() {
    let text = encode_frame(&send_frame());
    let decoded = decode_frame(&text).expect("decode should succeed");
    assert_eq!(decoded.command, Command::Send);
    assert_eq!(decoded.header("destination"), Some("/app/answer"));
    assert_eq!(decoded.header("receipt"), Some("r-1"));
    assert_eq!(decoded.body, r#"{"questionId":7}"#);
}

#[test]
fn decode_skips_leading_heart_beat_newlines() {
    let text = format!("\n\n{}", encode_frame(&send_frame()));
    let decoded = decode_frame(&text).expect("decode should succeed");
    assert_eq!(decoded.command, Command::Send);
}

#[test]
fn decode_tolerates_crlf_line_endings() {
    let text = "CONNECTED\r\nversion:1.2\r\nheart-beat:10000,10000\r\n\r\n\0";
    let decoded = decode_frame(text).expect("decode should succeed");
    assert_eq!(decoded.command, Command::Connected);
    assert_eq!(decoded.header("version"), Some("1.2"));
}

#[test]
fn decode_rejects_empty_input() {
    assert!(matches!(decode_frame(""), Err(CodecError::Empty)));
    assert!(matches!(decode_frame("\n\n\n"), Err(CodecError::Empty)));
}

#[test]
fn decode_rejects_unknown_command() {
    let err = decode_frame("PUBLISH\ndestination:/x\n\n\0").expect_err("command should fail");
    assert!(matches!(err, CodecError::UnknownCommand(c) if c == "PUBLISH"));
}

#[test]
fn decode_rejects_header_without_separator() {
    let err = decode_frame("SEND\nnocolonhere\n\n\0").expect_err("header should fail");
    assert!(matches!(err, CodecError::MalformedHeader(_)));
}

#[test]
fn header_returns_first_occurrence() {
    let frame = Frame::new(Command::Message)
        .with_header("subscription", "sub-0")
        .with_header("subscription", "sub-1");
    assert_eq!(frame.header("subscription"), Some("sub-0"));
}

#[test]
fn header_escaping_round_trips_reserved_characters() {
    let frame = Frame::new(Command::Send).with_header("reply-to", "queue:results\nline2\\end");
    let text = encode_frame(&frame);
    assert!(text.contains("queue\\cresults\\nline2\\\\end"));
    let decoded = decode_frame(&text).expect("decode should succeed");
    assert_eq!(decoded.header("reply-to"), Some("queue:results\nline2\\end"));
}

#[test]
fn connect_frames_do_not_escape_headers() {
    let frame = Frame::new(Command::Connect).with_header("host", "broker:61613");
    let text = encode_frame(&frame);
    assert!(text.contains("host:broker:61613"));
}

#[test]
fn decode_rejects_invalid_escape_sequence() {
    let err = decode_frame("SEND\nkey:bad\\tescape\n\n\0").expect_err("escape should fail");
    assert!(matches!(err, CodecError::InvalidEscape(_)));
}

#[test]
fn body_with_content_length_may_contain_newlines() {
    let body = "line1\n\nline2";
    let frame = Frame::new(Command::Message)
        .with_header("content-length", &body.len().to_string())
        .with_body(body);
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode should succeed");
    assert_eq!(decoded.body, body);
}

#[test]
fn body_without_content_length_stops_at_nul() {
    let decoded = decode_frame("MESSAGE\ndestination:/topic/rooms\n\npayload\0").expect("decode");
    assert_eq!(decoded.body, "payload");
}

#[test]
fn parse_heart_beat_reads_two_intervals() {
    assert_eq!(parse_heart_beat("10000,10000"), Some((10_000, 10_000)));
    assert_eq!(parse_heart_beat("0, 5000"), Some((0, 5000)));
    assert_eq!(parse_heart_beat("10000"), None);
    assert_eq!(parse_heart_beat("a,b"), None);
    assert_eq!(parse_heart_beat(""), None);
}

#[test]
fn keep_alive_is_a_single_newline() {
    assert_eq!(KEEP_ALIVE, "\n");
}
