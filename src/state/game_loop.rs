//! Async shell around the game reducer.
//!
//! DESIGN
//! ======
//! The reducer in `state::game` is pure; this module feeds it. A single
//! consumer task drains one input queue, so no two inputs are ever processed
//! concurrently, and it executes the effects the reducer hands back: answer
//! frames go to the socket, reveal timers are armed with their epoch and
//! delivered back into the same queue.
//!
//! On the server there is no transport and no timer wheel; the stub applies
//! inputs synchronously and drops effects.

#[cfg(test)]
#[path = "game_loop_test.rs"]
mod game_loop_test;

use crate::net::events::GameEvent;
use crate::state::game::{GameInput, RosterFlag};
use crate::state::room::RoomStore;

/// Translate a decoded wire event into a reducer input.
///
/// Room-membership events return `None`; those are the room store's concern.
/// Game-start snapshots the roster from the current room.
#[must_use]
pub fn input_from_event(event: GameEvent, room: &RoomStore) -> Option<GameInput> {
    match event {
        GameEvent::GameStarted { question } => {
            let room_id = room.current.as_ref()?.id;
            let roster = room
                .roster
                .iter()
                .map(|p| RosterFlag {
                    user_id: p.user_id,
                    display_name: p.display_name.clone(),
                    has_answered: false,
                })
                .collect();
            Some(GameInput::Started { room_id, question, roster })
        }
        GameEvent::NextQuestion(question) => Some(GameInput::Question(question)),
        GameEvent::AnswerResult(result) => Some(GameInput::PersonalResult(result)),
        GameEvent::PlayerAnswered { user_id } => Some(GameInput::PeerAnswered { user_id }),
        GameEvent::GameEnded { rankings } => Some(GameInput::Ended { rankings }),
        GameEvent::RoomCreated(_)
        | GameEvent::RoomDeleted { .. }
        | GameEvent::RoomUpdated(_)
        | GameEvent::PlayerJoined(_)
        | GameEvent::PlayerLeft { .. }
        | GameEvent::PlayerKicked { .. }
        | GameEvent::HostChanged { .. } => None,
    }
}

#[cfg(feature = "hydrate")]
pub use live::GameController;

#[cfg(feature = "hydrate")]
mod live {
    use futures::StreamExt;
    use futures::channel::mpsc;
    use leptos::prelude::{GetUntracked, RwSignal, Update};

    use super::input_from_event;
    use crate::net::commands;
    use crate::net::connection::SocketClient;
    use crate::net::events::GameEvent;
    use crate::state::game::{GameEffect, GameInput, GamePhase, GameState};
    use crate::state::room::RoomStore;

    /// Handle for feeding the serialized game reducer. Cheap to clone.
    #[derive(Clone)]
    pub struct GameController {
        state: RwSignal<GameState>,
        room: RwSignal<RoomStore>,
        tx: mpsc::UnboundedSender<GameInput>,
    }

    impl GameController {
        /// Spawn the consumer task and the one-second countdown ticker.
        #[must_use]
        pub fn new(
            state: RwSignal<GameState>,
            room: RwSignal<RoomStore>,
            socket: SocketClient,
        ) -> Self {
            let (tx, rx) = mpsc::unbounded();

            leptos::task::spawn_local(pump(state, socket, rx, tx.clone()));

            // Countdown ticks only matter while a question is live; the
            // reducer ignores the rest.
            let tick_tx = tx.clone();
            leptos::task::spawn_local(async move {
                loop {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                    if state.get_untracked().phase == GamePhase::QuestionActive
                        && tick_tx.unbounded_send(GameInput::Tick).is_err()
                    {
                        break;
                    }
                }
            });

            Self { state, room, tx }
        }

        /// Queue one input for the reducer.
        pub fn dispatch(&self, input: GameInput) {
            let _ = self.tx.unbounded_send(input);
        }

        /// Route a decoded wire event into the reducer, if it is game-scoped.
        pub fn handle_event(&self, event: GameEvent) {
            if let Some(input) = input_from_event(event, &self.room.get_untracked()) {
                self.dispatch(input);
            }
        }
    }

    /// The single consumer: apply each input, then run its effects.
    async fn pump(
        state: RwSignal<GameState>,
        socket: SocketClient,
        mut rx: mpsc::UnboundedReceiver<GameInput>,
        tx: mpsc::UnboundedSender<GameInput>,
    ) {
        while let Some(input) = rx.next().await {
            let effects = state.try_update(|g| g.apply(input)).unwrap_or_default();
            for effect in effects {
                match effect {
                    GameEffect::Send(submission) => {
                        if let Some(room_id) = state.get_untracked().room_id
                            && let Err(e) =
                                socket.send(&commands::submit_answer(room_id, &submission))
                        {
                            leptos::logging::warn!("answer send failed: {e}");
                        }
                    }
                    GameEffect::ScheduleReveal { epoch, delay_ms } => {
                        let reveal_tx = tx.clone();
                        leptos::task::spawn_local(async move {
                            gloo_timers::future::sleep(std::time::Duration::from_millis(
                                u64::from(delay_ms),
                            ))
                            .await;
                            let _ = reveal_tx.unbounded_send(GameInput::RevealElapsed { epoch });
                        });
                    }
                }
            }
        }
    }
}

#[cfg(not(feature = "hydrate"))]
pub use stub::GameController;

#[cfg(not(feature = "hydrate"))]
mod stub {
    use leptos::prelude::{GetUntracked, RwSignal, Update};

    use super::input_from_event;
    use crate::net::connection::SocketClient;
    use crate::net::events::GameEvent;
    use crate::state::game::{GameInput, GameState};
    use crate::state::room::RoomStore;

    /// Server-side placeholder: applies inputs synchronously, drops effects.
    #[derive(Clone)]
    pub struct GameController {
        state: RwSignal<GameState>,
        room: RwSignal<RoomStore>,
    }

    impl GameController {
        #[must_use]
        pub fn new(
            state: RwSignal<GameState>,
            room: RwSignal<RoomStore>,
            _socket: SocketClient,
        ) -> Self {
            Self { state, room }
        }

        pub fn dispatch(&self, input: GameInput) {
            self.state.update(|g| {
                let _ = g.apply(input);
            });
        }

        pub fn handle_event(&self, event: GameEvent) {
            if let Some(input) = input_from_event(event, &self.room.get_untracked()) {
                self.dispatch(input);
            }
        }
    }
}
