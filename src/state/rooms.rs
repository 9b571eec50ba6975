//! Public room listing: paging, search, and live list updates.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use crate::net::events::GameEvent;
use crate::net::types::{Paged, Room};

/// Default page size for the lobby listing.
pub const PAGE_SIZE: u32 = 20;

/// Lobby-wide room listing, refreshed over REST and patched by broadcasts.
#[derive(Clone, Debug, Default)]
pub struct RoomsState {
    pub items: Vec<Room>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub search: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RoomsState {
    /// Replace the listing with a freshly fetched page.
    pub fn set_page(&mut self, page: Paged<Room>) {
        self.items = page.items;
        self.page = page.page;
        self.total_pages = page.total_pages;
        self.total_items = page.total_items;
        self.is_loading = false;
        self.error = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Patch the listing from a lobby broadcast without a refetch.
    ///
    /// Creations prepend (private rooms stay hidden), updates are keyed by
    /// room id, deletions remove. All other events are list-irrelevant.
    pub fn apply_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoomCreated(room) => {
                if !room.is_private && !self.items.iter().any(|r| r.id == room.id) {
                    self.items.insert(0, room.clone());
                    self.total_items = self.total_items.saturating_add(1);
                }
            }
            GameEvent::RoomUpdated(room) => {
                if let Some(existing) = self.items.iter_mut().find(|r| r.id == room.id) {
                    *existing = room.clone();
                }
            }
            GameEvent::RoomDeleted { room_id } => {
                let before = self.items.len();
                self.items.retain(|r| r.id != *room_id);
                if self.items.len() < before {
                    self.total_items = self.total_items.saturating_sub(1);
                }
            }
            _ => {}
        }
    }
}
