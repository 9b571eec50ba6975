//! Room-session state: which room am I in and who else is in it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth reconciling three inputs — REST responses,
//! room-scoped events, and the connection manager's status — under
//! last-write-wins per room field. The roster is a keyed set (by user id)
//! with explicit add/remove/update, never wholesale replacement, so partial
//! updates arriving out of order cannot make players flicker.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use crate::net::connection::ConnectionStatus;
use crate::net::error::ClientError;
use crate::net::events::GameEvent;
use crate::net::types::{Player, Room};

/// Fallback notice when a kick event carries no reason.
pub const KICKED_NOTICE: &str = "You were removed from the room by the host";

/// Notice shown when the current room is deleted out from under us.
pub const ROOM_CLOSED_NOTICE: &str = "The room was closed";

/// Room-level state: current room, roster, action guard, connectivity.
#[derive(Clone, Debug, Default)]
pub struct RoomStore {
    /// The joined room, if any.
    pub current: Option<Room>,
    /// Roster keyed by `user_id`, insertion order preserved.
    pub roster: Vec<Player>,
    /// The local user's id, set at login.
    pub self_user_id: Option<i64>,
    /// Re-entrancy guard: true while a REST-backed action is in flight.
    pub is_loading: bool,
    /// Inline error from the most recent action, for the page to render.
    pub last_error: Option<String>,
    /// User-visible reason after a kick or room closure.
    pub kick_notice: Option<String>,
    /// Transport lifecycle, mirrored here for the UI.
    pub connection: ConnectionStatus,
    /// Terminal connection failure (reconnect exhaustion, handshake reject).
    pub connection_error: Option<ClientError>,
}

impl RoomStore {
    /// Whether the local user holds host privileges in the current room.
    #[must_use]
    pub fn is_host(&self) -> bool {
        match (&self.current, self.self_user_id) {
            (Some(room), Some(user_id)) => room.owner_id == user_id,
            _ => false,
        }
    }

    /// Roster entry for the local user.
    #[must_use]
    pub fn self_player(&self) -> Option<&Player> {
        let user_id = self.self_user_id?;
        self.roster.iter().find(|p| p.user_id == user_id)
    }

    /// Claim the action guard. Returns `false` when another action is still
    /// in flight (the duplicate must be rejected, not queued).
    pub fn begin_action(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        self.last_error = None;
        true
    }

    /// Release the action guard, recording an inline error if any.
    pub fn finish_action(&mut self, error: Option<String>) {
        self.is_loading = false;
        self.last_error = error;
    }

    /// Install a freshly created/joined room and its initial roster.
    pub fn enter_room(&mut self, room: Room, roster: Vec<Player>) {
        self.current = Some(room);
        self.roster = roster;
        self.kick_notice = None;
    }

    /// Drop all room-scoped state. Shared by leave, kick, and navigation.
    pub fn clear_room(&mut self) {
        self.current = None;
        self.roster.clear();
    }

    /// Keyed roster merge: update in place when the id is present, append
    /// otherwise. Never produces duplicates.
    pub fn upsert_player(&mut self, player: Player) {
        if let Some(existing) = self.roster.iter_mut().find(|p| p.user_id == player.user_id) {
            *existing = player;
        } else {
            if let Some(room) = &mut self.current {
                room.current_players = room.current_players.saturating_add(1);
            }
            self.roster.push(player);
        }
    }

    /// Remove one roster entry; unknown ids are a no-op.
    pub fn remove_player(&mut self, user_id: i64) {
        let before = self.roster.len();
        self.roster.retain(|p| p.user_id != user_id);
        if self.roster.len() < before
            && let Some(room) = &mut self.current
        {
            room.current_players = room.current_players.saturating_sub(1);
        }
    }

    /// Apply one realtime event to the room slice of state.
    ///
    /// Exhaustive over [`GameEvent`]; events owned by other stores (room
    /// list, game controller) are explicit no-ops here. Never panics — a
    /// malformed or irrelevant event leaves prior state intact.
    pub fn apply_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerJoined(player) => self.upsert_player(player.clone()),
            GameEvent::PlayerLeft { user_id } => self.remove_player(*user_id),
            GameEvent::RoomUpdated(room) => {
                // Last-write-wins for room fields; the roster is managed by
                // its own keyed operations and is deliberately untouched.
                if self.current.as_ref().is_some_and(|c| c.id == room.id) {
                    self.current = Some(room.clone());
                }
            }
            GameEvent::HostChanged { new_host_id } => {
                if let Some(room) = &mut self.current {
                    room.owner_id = *new_host_id;
                }
                for player in &mut self.roster {
                    player.is_host = player.user_id == *new_host_id;
                }
            }
            GameEvent::PlayerKicked { user_id, reason } => {
                if self.self_user_id == Some(*user_id) {
                    self.clear_room();
                    self.kick_notice =
                        Some(reason.clone().unwrap_or_else(|| KICKED_NOTICE.to_owned()));
                } else {
                    self.remove_player(*user_id);
                }
            }
            GameEvent::RoomDeleted { room_id } => {
                if self.current.as_ref().is_some_and(|c| c.id == *room_id) {
                    self.clear_room();
                    self.kick_notice = Some(ROOM_CLOSED_NOTICE.to_owned());
                }
            }
            GameEvent::GameStarted { .. } => {
                if let Some(room) = &mut self.current {
                    room.status = crate::net::types::RoomStatus::Playing;
                }
            }
            GameEvent::GameEnded { .. } => {
                if let Some(room) = &mut self.current {
                    room.status = crate::net::types::RoomStatus::Finished;
                }
            }
            // Room-list and personal-queue events belong to other stores.
            GameEvent::RoomCreated(_)
            | GameEvent::NextQuestion(_)
            | GameEvent::AnswerResult(_)
            | GameEvent::PlayerAnswered { .. } => {}
        }
    }
}
