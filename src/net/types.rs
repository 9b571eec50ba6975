//! Wire DTOs for the REST and websocket boundary.
//!
//! DESIGN
//! ======
//! One canonical representation per domain object. Loose server payloads
//! (aliased field names, numbers-as-floats) are normalized into these types
//! exactly once at the boundary — REST responses through serde here, websocket
//! events through the parse helpers in `net::events`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::net::error::ClientError;

/// Standard REST response envelope.
///
/// The backend omits `success` on most happy paths; only an explicit
/// `success: false` marks a failure.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Collapse the envelope into a uniform result.
    ///
    /// # Errors
    ///
    /// `ActionRejected` when the backend set `success: false`; `Decode` when
    /// a successful envelope is missing its payload.
    pub fn into_result(self) -> Result<T, ClientError> {
        if self.success == Some(false) {
            return Err(ClientError::rejected(self.message));
        }
        self.data
            .ok_or_else(|| ClientError::Decode("envelope missing data".to_owned()))
    }

    /// Like [`ApiEnvelope::into_result`] for endpoints whose payload the
    /// caller does not need.
    ///
    /// # Errors
    ///
    /// `ActionRejected` when the backend set `success: false`.
    pub fn into_ack(self) -> Result<(), ClientError> {
        if self.success == Some(false) {
            return Err(ClientError::rejected(self.message));
        }
        Ok(())
    }
}

/// Room lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomStatus {
    #[default]
    #[serde(alias = "waiting")]
    Waiting,
    #[serde(alias = "playing")]
    Playing,
    #[serde(alias = "finished")]
    Finished,
}

/// A joinable quiz lobby.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    /// Human-shareable join code.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub topic_id: Option<i64>,
    pub owner_id: i64,
    pub max_players: u32,
    #[serde(default)]
    pub current_players: u32,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub question_count: u32,
    /// Per-question countdown in seconds.
    #[serde(default, alias = "countdownTime")]
    pub countdown_seconds: u32,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Room-creation request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfig {
    pub name: String,
    pub topic_id: Option<i64>,
    pub max_players: u32,
    pub is_private: bool,
    pub question_count: u32,
    #[serde(rename = "countdownTime")]
    pub countdown_seconds: u32,
    pub mode: Option<String>,
}

/// Roster entry for one room member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: i64,
    #[serde(alias = "username", alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub has_answered: bool,
    #[serde(default)]
    pub score: i64,
}

/// One selectable answer option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: i64,
    #[serde(alias = "answerText")]
    pub text: String,
}

/// The question currently in flight. Replaced wholesale on advance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(alias = "questionText")]
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(alias = "answers")]
    pub options: Vec<QuestionOption>,
    #[serde(alias = "timeLimit")]
    pub time_limit_seconds: u32,
    #[serde(default, alias = "questionNumber")]
    pub sequence_number: u32,
    #[serde(default)]
    pub total_questions: u32,
}

/// Outbound answer for the active question. Sent at most once per question.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub selected_option_index: Option<u32>,
    /// Free-text echo of the chosen option, empty for timeouts.
    pub answer_text: String,
    pub elapsed_ms: u64,
}

impl AnswerSubmission {
    /// Empty submission synthesized when the countdown expires unanswered.
    #[must_use]
    pub fn timed_out(question_id: i64, elapsed_ms: u64) -> Self {
        Self {
            question_id,
            selected_option_id: None,
            selected_option_index: None,
            answer_text: String::new(),
            elapsed_ms,
        }
    }
}

/// Personal per-question result delivered on the user queue.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    #[serde(alias = "correct")]
    pub is_correct: bool,
    #[serde(default)]
    pub points_awarded: i64,
    #[serde(default)]
    pub streak_count: u32,
    #[serde(default = "default_multiplier")]
    pub streak_multiplier: f64,
    #[serde(default)]
    pub has_next_question: bool,
    #[serde(default)]
    pub next_question: Option<Question>,
    /// True once this player has exhausted every question.
    #[serde(default)]
    pub completed: bool,
}

fn default_multiplier() -> f64 {
    1.0
}

/// Final standing row, pre-sorted by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub user_id: i64,
    #[serde(alias = "username", alias = "name")]
    pub display_name: String,
    pub score: i64,
    #[serde(default)]
    pub rank: u32,
}

/// Quiz topic (content-authoring boundary).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Authenticated user as returned by the profile endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(alias = "username", alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// AI-generated question draft (authoring boundary).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(alias = "questionText")]
    pub text: String,
    #[serde(alias = "answers")]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: u32,
}

/// One page of a paginated listing (Spring-style field names tolerated).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(alias = "content")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, alias = "totalElements")]
    pub total_items: u64,
}
