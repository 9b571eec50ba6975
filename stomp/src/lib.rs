//! STOMP 1.2 frame model and text codec for the realtime WS transport.
//!
//! This crate owns the wire representation used by the client's connection
//! manager and subscription registry. It deliberately covers only the subset
//! of STOMP the quiz backend speaks: the nine commands below, header
//! escaping, `content-length`, and heart-beat negotiation headers.

use std::fmt;

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input was empty or contained only end-of-line noise.
    #[error("empty frame")]
    Empty,
    /// The command line does not name a known STOMP command.
    #[error("unknown STOMP command: {0}")]
    UnknownCommand(String),
    /// A header line is missing the `name:value` separator.
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
    /// A header contains an undefined escape sequence (STOMP 1.2 §Value Encoding).
    #[error("invalid header escape in: {0}")]
    InvalidEscape(String),
    /// The frame has no blank line separating headers from the body.
    #[error("missing header/body separator")]
    MissingSeparator,
}

/// STOMP command, client- and server-originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Message,
    Receipt,
    Error,
    Disconnect,
}

impl Command {
    /// Wire spelling of the command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Send => "SEND",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
            Self::Disconnect => "DISCONNECT",
        }
    }

    fn parse(line: &str) -> Result<Self, CodecError> {
        match line {
            "CONNECT" | "STOMP" => Ok(Self::Connect),
            "CONNECTED" => Ok(Self::Connected),
            "SEND" => Ok(Self::Send),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "UNSUBSCRIBE" => Ok(Self::Unsubscribe),
            "MESSAGE" => Ok(Self::Message),
            "RECEIPT" => Ok(Self::Receipt),
            "ERROR" => Ok(Self::Error),
            "DISCONNECT" => Ok(Self::Disconnect),
            other => Err(CodecError::UnknownCommand(other.to_owned())),
        }
    }

    /// CONNECT and CONNECTED frames exchange headers verbatim; every other
    /// frame applies the STOMP 1.2 escape sequences.
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single STOMP frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: Command,
    /// Headers in wire order. Repeated names are preserved; [`Frame::header`]
    /// returns the first occurrence, as STOMP requires.
    pub headers: Vec<(String, String)>,
    /// UTF-8 body. Empty for most control frames.
    pub body: String,
}

impl Frame {
    /// New frame with no headers and an empty body.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self { command, headers: Vec::new(), body: String::new() }
    }

    /// Builder-style header append.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Builder-style body assignment.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value for `name`, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The single-byte keep-alive frame exchanged on heart-beat intervals.
pub const KEEP_ALIVE: &str = "\n";

/// Parse a `heart-beat` header value (`"sx,sy"`, milliseconds).
///
/// Returns `None` for anything that is not two comma-separated unsigned
/// integers.
#[must_use]
pub fn parse_heart_beat(value: &str) -> Option<(u32, u32)> {
    let (sx, sy) = value.split_once(',')?;
    Some((sx.trim().parse().ok()?, sy.trim().parse().ok()?))
}

/// Encode a frame into its wire text, NUL terminator included.
///
/// A `content-length` header is appended automatically when the body is
/// non-empty and the caller did not set one.
#[must_use]
pub fn encode_frame(frame: &Frame) -> String {
    let escape = frame.command.escapes_headers();
    let mut out = String::with_capacity(frame.body.len() + 64);
    out.push_str(frame.command.as_str());
    out.push('\n');
    for (name, value) in &frame.headers {
        if escape {
            push_escaped(&mut out, name);
            out.push(':');
            push_escaped(&mut out, value);
        } else {
            out.push_str(name);
            out.push(':');
            out.push_str(value);
        }
        out.push('\n');
    }
    if !frame.body.is_empty() && frame.header("content-length").is_none() {
        out.push_str("content-length:");
        out.push_str(&frame.body.len().to_string());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&frame.body);
    out.push('\0');
    out
}

/// Decode wire text into a frame.
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first structural problem found.
pub fn decode_frame(text: &str) -> Result<Frame, CodecError> {
    // Skip leading end-of-lines left over from preceding frames/heart-beats.
    let text = text.trim_start_matches(['\r', '\n']);
    if text.is_empty() {
        return Err(CodecError::Empty);
    }

    let (head, rest) = split_head(text)?;
    let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let command_line = lines.next().ok_or(CodecError::Empty)?;
    let command = Command::parse(command_line)?;
    let unescape_headers = command.escapes_headers();

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| CodecError::MalformedHeader(line.to_owned()))?;
        if unescape_headers {
            headers.push((unescape(name)?, unescape(value)?));
        } else {
            headers.push((name.to_owned(), value.to_owned()));
        }
    }

    let frame = Frame { command, headers, body: String::new() };
    let body = match frame
        .header("content-length")
        .and_then(|v| v.parse::<usize>().ok())
    {
        Some(len) if len <= rest.len() && rest.is_char_boundary(len) => &rest[..len],
        _ => rest.split('\0').next().unwrap_or(""),
    };

    Ok(Frame { body: body.to_owned(), ..frame })
}

fn split_head(text: &str) -> Result<(&str, &str), CodecError> {
    // Header block ends at the first blank line; tolerate CRLF line endings.
    if let Some(idx) = text.find("\n\n") {
        return Ok((&text[..idx], &text[idx + 2..]));
    }
    if let Some(idx) = text.find("\r\n\r\n") {
        return Ok((&text[..idx], &text[idx + 4..]));
    }
    Err(CodecError::MissingSeparator)
}

fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
}

fn unescape(raw: &str) -> Result<String, CodecError> {
    if !raw.contains('\\') {
        return Ok(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            _ => return Err(CodecError::InvalidEscape(raw.to_owned())),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
