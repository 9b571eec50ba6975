//! WebSocket/STOMP connection manager.
//!
//! The `SocketClient` owns the single transport: connect with an
//! authenticated STOMP handshake, heart-beats, bounded linear-backoff
//! reconnect, and teardown. It knows nothing about rooms or games; other
//! components reach the wire through the [`SubscriptionRegistry`] it carries.
//!
//! All transport logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment. The connect/retry state machine itself is
//! plain Rust and natively tested.
//!
//! ERROR HANDLING
//! ==============
//! Handshake failures (auth, timeout, transport) reject the in-flight connect
//! exactly once and stop; only an abnormal close after a successful handshake
//! triggers automatic reconnection, and only up to the attempt budget.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use crate::net::error::ClientError;

/// Upper bound on the STOMP handshake, milliseconds.
pub const CONNECT_TIMEOUT_MS: u32 = 15_000;

/// Heart-beat intervals offered to the broker (`sx,sy`), milliseconds.
pub const HEART_BEAT_MS: u32 = 10_000;

/// Transport lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Socket closed or never opened.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// CONNECTED received; frames flow.
    Connected,
}

/// What a `connect` call should do given the current status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectDecision {
    /// No transport exists; open one.
    StartTransport,
    /// A handshake is already in flight; share its outcome.
    JoinInFlight,
    /// Already connected; succeed immediately.
    AlreadyConnected,
}

/// Guarantees at most one live transport per manager.
#[must_use]
pub fn begin_connect(status: ConnectionStatus) -> ConnectDecision {
    match status {
        ConnectionStatus::Disconnected => ConnectDecision::StartTransport,
        ConnectionStatus::Connecting => ConnectDecision::JoinInFlight,
        ConnectionStatus::Connected => ConnectDecision::AlreadyConnected,
    }
}

/// What to do with a transport whose handshake just succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeDecision {
    /// Install the session and publish `Connected`.
    Install,
    /// A disconnect raced the handshake; drop the transport unused.
    Discard,
}

/// An explicit disconnect issued mid-handshake wins over a late CONNECTED.
#[must_use]
pub fn finish_handshake(disconnect_requested: bool) -> HandshakeDecision {
    if disconnect_requested {
        HandshakeDecision::Discard
    } else {
        HandshakeDecision::Install
    }
}

/// Linear backoff policy: attempt N waits N × `base_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_ms: u32,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { base_ms: 1000, max_attempts: 3 }
    }
}

impl RetryPolicy {
    /// Delay before the Nth attempt (1-based), or `None` past the budget.
    #[must_use]
    pub fn delay_ms(&self, attempt: u32) -> Option<u32> {
        (attempt >= 1 && attempt <= self.max_attempts).then(|| attempt * self.base_ms)
    }
}

/// Per-connection retry bookkeeping. Reset on success and on explicit
/// disconnect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconnectState {
    attempts: u32,
}

impl ReconnectState {
    /// Record one more failure and return the delay before the next attempt.
    ///
    /// # Errors
    ///
    /// `MaxReconnectAttempts` once the policy's budget is exhausted.
    pub fn next_delay(&mut self, policy: &RetryPolicy) -> Result<u32, ClientError> {
        self.attempts += 1;
        policy
            .delay_ms(self.attempts)
            .ok_or(ClientError::MaxReconnectAttempts)
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(feature = "hydrate")]
pub use live::SocketClient;

#[cfg(not(feature = "hydrate"))]
pub use stub::SocketClient;

#[cfg(not(feature = "hydrate"))]
mod stub {
    use leptos::prelude::RwSignal;

    use crate::net::error::ClientError;
    use crate::net::registry::TopicMessage;
    use crate::state::room::RoomStore;

    /// Server-side placeholder; the transport only exists in the browser.
    #[derive(Clone)]
    pub struct SocketClient;

    impl SocketClient {
        #[must_use]
        pub fn new(_room: RwSignal<RoomStore>) -> Self {
            Self
        }

        /// Always fails on the server.
        ///
        /// # Errors
        ///
        /// `NotConnected`, unconditionally.
        pub async fn connect(&self, _token: &str) -> Result<(), ClientError> {
            Err(ClientError::NotConnected)
        }

        pub fn disconnect(&self) {}

        /// # Errors
        ///
        /// `NotConnected`, unconditionally.
        pub fn send(&self, _frame: &stomp::Frame) -> Result<(), ClientError> {
            Err(ClientError::NotConnected)
        }

        /// # Errors
        ///
        /// `NotConnected`, unconditionally.
        pub fn subscribe(
            &self,
            _topic: &str,
            _handler: impl FnMut(TopicMessage) + 'static,
        ) -> Result<(), ClientError> {
            Err(ClientError::NotConnected)
        }

        pub fn unsubscribe(&self, _topic: &str) {}
    }
}

#[cfg(feature = "hydrate")]
mod live {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::StreamExt;
    use futures::channel::{mpsc, oneshot};
    use leptos::prelude::{GetUntracked, RwSignal, Update};

    use super::{
        CONNECT_TIMEOUT_MS, ConnectDecision, ConnectionStatus, HEART_BEAT_MS, ReconnectState,
        RetryPolicy, begin_connect,
    };
    use crate::net::error::ClientError;
    use crate::net::registry::{SubscriptionRegistry, TopicMessage};
    use crate::state::room::RoomStore;

    /// How one transport session ended.
    enum SessionEnd {
        /// Caller asked for the close; never retry.
        Intentional,
        /// Handshake-phase failure; reject the connect call once, no retry.
        Fatal(ClientError),
        /// Close after a successful handshake; candidate for reconnect.
        Abnormal(String),
    }

    #[derive(Default)]
    struct SocketInner {
        tx: Option<mpsc::UnboundedSender<String>>,
        waiters: Vec<oneshot::Sender<Result<(), ClientError>>>,
        token: Option<String>,
        intentional: bool,
        reconnect: ReconnectState,
        policy: RetryPolicy,
    }

    /// The process-wide transport handle. Cheap to clone; clones share one
    /// socket.
    pub struct SocketClient {
        room: RwSignal<RoomStore>,
        registry: Rc<RefCell<SubscriptionRegistry>>,
        inner: Rc<RefCell<SocketInner>>,
    }

    impl Clone for SocketClient {
        fn clone(&self) -> Self {
            Self {
                room: self.room,
                registry: self.registry.clone(),
                inner: self.inner.clone(),
            }
        }
    }

    impl SocketClient {
        #[must_use]
        pub fn new(room: RwSignal<RoomStore>) -> Self {
            Self {
                room,
                registry: Rc::new(RefCell::new(SubscriptionRegistry::default())),
                inner: Rc::new(RefCell::new(SocketInner::default())),
            }
        }

        /// Open the transport and complete the authenticated handshake.
        ///
        /// A second call while connecting/connected never opens a duplicate
        /// socket: it joins the in-flight outcome or returns immediately.
        ///
        /// # Errors
        ///
        /// `Authentication`, `ConnectTimeout`, or `Transport` — each rejects
        /// exactly once; the manager then stays disconnected until the next
        /// explicit `connect`.
        pub async fn connect(&self, token: &str) -> Result<(), ClientError> {
            match begin_connect(self.room.get_untracked().connection) {
                ConnectDecision::AlreadyConnected => Ok(()),
                ConnectDecision::JoinInFlight => self.await_outcome().await,
                ConnectDecision::StartTransport => {
                    {
                        let mut inner = self.inner.borrow_mut();
                        inner.token = Some(token.to_owned());
                        inner.intentional = false;
                        inner.reconnect.reset();
                    }
                    self.room.update(|r| {
                        r.connection = ConnectionStatus::Connecting;
                        r.connection_error = None;
                    });
                    let this = self.clone();
                    leptos::task::spawn_local(async move { this.run_loop().await });
                    self.await_outcome().await
                }
            }
        }

        /// Tear down the transport, clear all subscriptions, and reset retry
        /// counters. Safe to call when already disconnected.
        pub fn disconnect(&self) {
            let tx = {
                let mut inner = self.inner.borrow_mut();
                inner.intentional = true;
                inner.token = None;
                inner.reconnect.reset();
                inner.tx.take()
            };
            if let Some(tx) = tx {
                let goodbye = stomp::Frame::new(stomp::Command::Disconnect);
                let _ = tx.unbounded_send(stomp::encode_frame(&goodbye));
                tx.close_channel();
            }
            self.registry.borrow_mut().clear();
            self.settle_waiters(Err(ClientError::NotConnected));
            self.room.update(|r| r.connection = ConnectionStatus::Disconnected);
        }

        /// Enqueue a frame for transmission.
        ///
        /// # Errors
        ///
        /// `NotConnected` when no live transport exists.
        pub fn send(&self, frame: &stomp::Frame) -> Result<(), ClientError> {
            let inner = self.inner.borrow();
            let tx = inner.tx.as_ref().ok_or(ClientError::NotConnected)?;
            tx.unbounded_send(stomp::encode_frame(frame))
                .map_err(|_| ClientError::NotConnected)
        }

        /// Register a handler and transmit the SUBSCRIBE frame.
        ///
        /// # Errors
        ///
        /// `NotConnected` without a live transport.
        pub fn subscribe(
            &self,
            topic: &str,
            handler: impl FnMut(TopicMessage) + 'static,
        ) -> Result<(), ClientError> {
            let frame = self.registry.borrow_mut().subscribe(topic, handler)?;
            self.send(&frame)
        }

        /// Drop the subscription for `topic`, if any, and tell the broker.
        pub fn unsubscribe(&self, topic: &str) {
            let frame = self.registry.borrow_mut().unsubscribe(topic);
            if let Some(frame) = frame {
                let _ = self.send(&frame);
            }
        }

        async fn await_outcome(&self) -> Result<(), ClientError> {
            let (tx, rx) = oneshot::channel();
            self.inner.borrow_mut().waiters.push(tx);
            rx.await.unwrap_or(Err(ClientError::NotConnected))
        }

        fn settle_waiters(&self, outcome: Result<(), ClientError>) {
            let waiters = std::mem::take(&mut self.inner.borrow_mut().waiters);
            for waiter in waiters {
                let _ = waiter.send(outcome.clone());
            }
        }

        /// Connection loop: one session per iteration, linear backoff between
        /// abnormal closures, terminal stop on fatal errors or exhaustion.
        async fn run_loop(self) {
            loop {
                let token = self.inner.borrow().token.clone().unwrap_or_default();
                let end = self.connect_and_run(&token).await;

                self.inner.borrow_mut().tx = None;
                self.registry.borrow_mut().set_connected(false);

                match end {
                    SessionEnd::Intentional => {
                        self.room
                            .update(|r| r.connection = ConnectionStatus::Disconnected);
                        break;
                    }
                    SessionEnd::Fatal(err) => {
                        leptos::logging::warn!("socket handshake failed: {err}");
                        self.settle_waiters(Err(err.clone()));
                        self.room.update(|r| {
                            r.connection = ConnectionStatus::Disconnected;
                            r.connection_error = Some(err);
                        });
                        break;
                    }
                    SessionEnd::Abnormal(reason) => {
                        leptos::logging::warn!("socket closed: {reason}");
                        self.room
                            .update(|r| r.connection = ConnectionStatus::Disconnected);

                        let delay = {
                            let mut inner = self.inner.borrow_mut();
                            let policy = inner.policy;
                            inner.reconnect.next_delay(&policy)
                        };
                        match delay {
                            Ok(ms) => {
                                gloo_timers::future::sleep(std::time::Duration::from_millis(
                                    u64::from(ms),
                                ))
                                .await;
                                if self.inner.borrow().intentional {
                                    break;
                                }
                                self.room
                                    .update(|r| r.connection = ConnectionStatus::Connecting);
                            }
                            Err(err) => {
                                self.settle_waiters(Err(err.clone()));
                                self.room.update(|r| r.connection_error = Some(err));
                                break;
                            }
                        }
                    }
                }
            }
        }

        /// Open the socket, run the handshake, then pump frames until the
        /// session ends.
        async fn connect_and_run(&self, token: &str) -> SessionEnd {
            use futures::SinkExt;
            use futures::future::{Either, select};
            use gloo_net::websocket::Message;
            use gloo_net::websocket::futures::WebSocket;

            let (url, host) = socket_endpoint();
            let ws = match WebSocket::open(&url) {
                Ok(ws) => ws,
                Err(e) => return SessionEnd::Fatal(ClientError::Transport(e.to_string())),
            };
            let (mut ws_write, mut ws_read) = ws.split();

            let heart_beat = format!("{HEART_BEAT_MS},{HEART_BEAT_MS}");
            let connect = stomp::Frame::new(stomp::Command::Connect)
                .with_header("accept-version", "1.2")
                .with_header("host", &host)
                .with_header("heart-beat", &heart_beat)
                .with_header("Authorization", &format!("Bearer {token}"));
            if ws_write
                .send(Message::Text(stomp::encode_frame(&connect)))
                .await
                .is_err()
            {
                return SessionEnd::Fatal(ClientError::Transport(
                    "handshake send failed".to_owned(),
                ));
            }

            let handshake = async {
                while let Some(msg) = ws_read.next().await {
                    match msg {
                        Ok(Message::Text(text)) => match stomp::decode_frame(&text) {
                            Ok(frame) if frame.command == stomp::Command::Connected => {
                                return Ok(frame);
                            }
                            Ok(frame) if frame.command == stomp::Command::Error => {
                                return Err(ClientError::Authentication);
                            }
                            _ => {}
                        },
                        Ok(Message::Bytes(_)) => {}
                        Err(e) => return Err(ClientError::Transport(e.to_string())),
                    }
                }
                Err(ClientError::Transport("closed during handshake".to_owned()))
            };
            let timeout = gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
                CONNECT_TIMEOUT_MS,
            )));
            let connected = match select(Box::pin(handshake), Box::pin(timeout)).await {
                Either::Left((Ok(frame), _)) => frame,
                Either::Left((Err(err), _)) => return SessionEnd::Fatal(err),
                Either::Right(_) => return SessionEnd::Fatal(ClientError::ConnectTimeout),
            };

            // A disconnect may have raced the handshake; never install a
            // session the caller already tore down.
            let requested = self.inner.borrow().intentional;
            if super::finish_handshake(requested) == super::HandshakeDecision::Discard {
                return SessionEnd::Intentional;
            }

            let (tx, mut rx) = mpsc::unbounded::<String>();
            {
                let mut inner = self.inner.borrow_mut();
                inner.tx = Some(tx.clone());
                inner.reconnect.reset();
            }
            self.registry.borrow_mut().set_connected(true);

            // Replay the last-known subscription set; a no-op on first connect.
            for frame in self.registry.borrow().replay_frames() {
                let _ = tx.unbounded_send(stomp::encode_frame(&frame));
            }

            self.room.update(|r| {
                r.connection = ConnectionStatus::Connected;
                r.connection_error = None;
            });
            self.settle_waiters(Ok(()));

            // Outgoing heart-beats at the negotiated interval.
            let server_wants = connected
                .header("heart-beat")
                .and_then(stomp::parse_heart_beat)
                .map_or(0, |(_, sy)| sy);
            if server_wants > 0 {
                let beat_ms = server_wants.max(HEART_BEAT_MS);
                let beat_tx = tx.clone();
                leptos::task::spawn_local(async move {
                    loop {
                        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
                            beat_ms,
                        )))
                        .await;
                        if beat_tx.unbounded_send(stomp::KEEP_ALIVE.to_owned()).is_err() {
                            break;
                        }
                    }
                });
            }

            let send_task = async {
                while let Some(text) = rx.next().await {
                    if ws_write.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
            };

            let recv_task = async {
                while let Some(msg) = ws_read.next().await {
                    match msg {
                        Ok(Message::Text(text)) => self.handle_incoming(&text),
                        Ok(Message::Bytes(_)) => {}
                        Err(e) => return SessionEnd::Abnormal(e.to_string()),
                    }
                }
                if self.inner.borrow().intentional {
                    SessionEnd::Intentional
                } else {
                    SessionEnd::Abnormal("connection closed".to_owned())
                }
            };

            match select(Box::pin(send_task), Box::pin(recv_task)).await {
                Either::Left(((), _)) => {
                    if self.inner.borrow().intentional {
                        SessionEnd::Intentional
                    } else {
                        SessionEnd::Abnormal("send channel closed".to_owned())
                    }
                }
                Either::Right((end, _)) => end,
            }
        }

        /// Route one inbound wire frame. Decode failures are logged and
        /// dropped; handler dispatch never throws.
        fn handle_incoming(&self, text: &str) {
            match stomp::decode_frame(text) {
                Ok(frame) => match frame.command {
                    stomp::Command::Message => {
                        let selector = frame
                            .header("subscription")
                            .or_else(|| frame.header("destination"))
                            .map(str::to_owned);
                        if let Some(selector) = selector {
                            // Invariant: topic handlers must not re-enter the
                            // registry (it is borrowed for the dispatch).
                            let delivered =
                                self.registry.borrow_mut().dispatch(&selector, &frame.body);
                            if !delivered {
                                leptos::logging::log!("frame for inactive topic: {selector}");
                            }
                        }
                    }
                    stomp::Command::Error => {
                        leptos::logging::warn!(
                            "broker error: {}",
                            frame.header("message").unwrap_or("(no message)")
                        );
                    }
                    _ => {}
                },
                // Bare end-of-line: the broker's heart-beat.
                Err(stomp::CodecError::Empty) => {}
                Err(e) => leptos::logging::warn!("undecodable frame: {e}"),
            }
        }
    }

    fn socket_endpoint() -> (String, String) {
        let location = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let proto = if location.starts_with("https") { "wss" } else { "ws" };
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        (format!("{proto}://{host}/ws"), host)
    }
}
