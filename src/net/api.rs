//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<_, ClientError>`; backend envelope failures
//! become `ActionRejected` with the backend's message, HTTP 404 becomes
//! `RoomNotFound` (the only endpoints that 404 are room lookups), and nothing
//! here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::error::ClientError;
use crate::net::types::{
    Paged, Player, QuestionDraft, Room, RoomConfig, Topic, User,
};

#[cfg(any(test, feature = "hydrate"))]
fn room_endpoint(room_id: i64) -> String {
    format!("/api/rooms/{room_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn room_action_endpoint(room_id: i64, action: &str) -> String {
    format!("/api/rooms/{room_id}/{action}")
}

#[cfg(any(test, feature = "hydrate"))]
fn room_by_code_endpoint(code: &str) -> String {
    format!("/api/rooms/code/{code}")
}

#[cfg(any(test, feature = "hydrate"))]
fn rooms_list_endpoint(page: u32, size: u32, search: &str) -> String {
    let mut url = format!("/api/rooms?page={page}&size={size}");
    if !search.is_empty() {
        url.push_str("&search=");
        // Join codes and names are short; escape only the separator set.
        for ch in search.chars() {
            match ch {
                '&' | '=' | '#' | '?' | '%' | '+' => {
                    url.push('%');
                    url.push_str(&format!("{:02X}", ch as u32));
                }
                ' ' => url.push('+'),
                other => url.push(other),
            }
        }
    }
    url
}

#[cfg(feature = "hydrate")]
fn transport(err: impl std::fmt::Display) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn envelope_from<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ClientError> {
    use crate::net::types::ApiEnvelope;

    if resp.status() == 404 {
        return Err(ClientError::RoomNotFound);
    }
    if !resp.ok() {
        let message = resp
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|env| env.message);
        return Err(ClientError::rejected(
            message.or_else(|| Some(format!("request failed: {}", resp.status()))),
        ));
    }
    resp.json::<ApiEnvelope<T>>()
        .await
        .map_err(transport)?
        .into_result()
}

#[cfg(feature = "hydrate")]
async fn ack_from(resp: gloo_net::http::Response) -> Result<(), ClientError> {
    use crate::net::types::ApiEnvelope;

    if resp.status() == 404 {
        return Err(ClientError::RoomNotFound);
    }
    if !resp.ok() {
        let message = resp
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|env| env.message);
        return Err(ClientError::rejected(
            message.or_else(|| Some(format!("request failed: {}", resp.status()))),
        ));
    }
    resp.json::<ApiEnvelope<serde_json::Value>>()
        .await
        .map_or(Ok(()), ApiEnvelope::into_ack)
}

#[cfg(feature = "hydrate")]
async fn get_enveloped<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ClientError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(transport)?;
    envelope_from(resp).await
}

#[cfg(feature = "hydrate")]
async fn post_enveloped<T: serde::de::DeserializeOwned>(
    url: &str,
    body: &serde_json::Value,
) -> Result<T, ClientError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    envelope_from(resp).await
}

#[cfg(feature = "hydrate")]
async fn post_ack(url: &str, body: &serde_json::Value) -> Result<(), ClientError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    ack_from(resp).await
}

#[cfg(not(feature = "hydrate"))]
fn server_stub<T>() -> Result<T, ClientError> {
    Err(ClientError::Transport("not available on server".to_owned()))
}

// =============================================================
// Auth / profile
// =============================================================

/// Log in with credentials; the session cookie rides on the response.
///
/// # Errors
///
/// `ActionRejected` with the backend message on bad credentials.
pub async fn login(username: &str, password: &str) -> Result<User, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "username": username, "password": password });
        post_enveloped("/api/auth/login", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        server_stub()
    }
}

/// Fetch the currently authenticated user. `None` when unauthenticated or on
/// the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        get_enveloped::<User>("/api/auth/me").await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current session (best-effort).
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

/// Short-lived token for the websocket CONNECT handshake.
///
/// # Errors
///
/// `Authentication` when no session exists.
pub async fn create_ws_token() -> Result<String, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        #[derive(serde::Deserialize)]
        struct TokenPayload {
            token: String,
        }
        let payload: TokenPayload = post_enveloped("/api/auth/ws-token", &serde_json::json!({}))
            .await
            .map_err(|_| ClientError::Authentication)?;
        Ok(payload.token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_stub()
    }
}

/// Update display name / avatar on the profile.
///
/// # Errors
///
/// `ActionRejected` with the backend's validation message.
pub async fn update_profile(
    display_name: &str,
    avatar_url: Option<&str>,
) -> Result<User, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "displayName": display_name, "avatarUrl": avatar_url });
        post_enveloped("/api/users/me/profile", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (display_name, avatar_url);
        server_stub()
    }
}

/// Change the account password.
///
/// # Errors
///
/// `ActionRejected` when the current password does not match.
pub async fn change_password(current: &str, next: &str) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "currentPassword": current, "newPassword": next });
        post_ack("/api/users/me/password", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (current, next);
        server_stub()
    }
}

/// Upload a pre-cropped avatar image as a data URL.
///
/// # Errors
///
/// `ActionRejected` when the image is rejected (size/format).
pub async fn upload_avatar(data_url: &str) -> Result<User, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "image": data_url });
        post_enveloped("/api/users/me/avatar", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = data_url;
        server_stub()
    }
}

// =============================================================
// Content authoring boundary
// =============================================================

/// All quiz topics available for room creation.
///
/// # Errors
///
/// `Transport`/`ActionRejected` on request failure.
pub async fn list_topics() -> Result<Vec<Topic>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_enveloped("/api/topics").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_stub()
    }
}

/// Ask the AI backend for question drafts on a topic.
///
/// # Errors
///
/// `ActionRejected` when generation fails or is rate-limited.
pub async fn generate_questions(
    topic_id: i64,
    count: u32,
    prompt: &str,
) -> Result<Vec<QuestionDraft>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "topicId": topic_id, "count": count, "prompt": prompt });
        post_enveloped("/api/questions/generate", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (topic_id, count, prompt);
        server_stub()
    }
}

// =============================================================
// Rooms
// =============================================================

/// Create a room owned by the current user.
///
/// # Errors
///
/// `ActionRejected` with the backend's validation message.
pub async fn create_room(config: &RoomConfig) -> Result<Room, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::to_value(config)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        post_enveloped("/api/rooms", &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        server_stub()
    }
}

/// Fetch one room by id.
///
/// # Errors
///
/// `RoomNotFound` when the room no longer exists.
pub async fn get_room(room_id: i64) -> Result<Room, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_enveloped(&room_endpoint(room_id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        server_stub()
    }
}

/// Current roster for a room.
///
/// # Errors
///
/// `RoomNotFound` when the room no longer exists.
pub async fn room_players(room_id: i64) -> Result<Vec<Player>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_enveloped(&room_action_endpoint(room_id, "players")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        server_stub()
    }
}

/// Browse public rooms with pagination and an optional search string.
///
/// # Errors
///
/// `Transport`/`ActionRejected` on request failure.
pub async fn list_rooms(page: u32, size: u32, search: &str) -> Result<Paged<Room>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_enveloped(&rooms_list_endpoint(page, size, search)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (page, size, search);
        server_stub()
    }
}

/// Join a room by its human-shareable code.
///
/// # Errors
///
/// `RoomNotFound` when the backend reports no match for the code.
pub async fn join_by_code(code: &str) -> Result<Room, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        post_enveloped(&format!("{}/join", room_by_code_endpoint(code)), &serde_json::json!({}))
            .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = code;
        server_stub()
    }
}

/// Join a browsable room directly by id.
///
/// # Errors
///
/// `ActionRejected` when the room is full or already playing.
pub async fn join_room(room_id: i64) -> Result<Room, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        post_enveloped(&room_action_endpoint(room_id, "join"), &serde_json::json!({})).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        server_stub()
    }
}

/// Leave the current room.
///
/// # Errors
///
/// `Transport` on network failure; callers treat this as best-effort.
pub async fn leave_room(room_id: i64) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        post_ack(&room_action_endpoint(room_id, "leave"), &serde_json::json!({})).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        server_stub()
    }
}

/// Host-only: remove a player from the room.
///
/// # Errors
///
/// `ActionRejected` when the caller is not the host.
pub async fn kick_player(room_id: i64, user_id: i64) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "userId": user_id });
        post_ack(&room_action_endpoint(room_id, "kick"), &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (room_id, user_id);
        server_stub()
    }
}

/// Host-only: hand host privileges to another member.
///
/// # Errors
///
/// `ActionRejected` when the caller is not the host.
pub async fn transfer_host(room_id: i64, user_id: i64) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "userId": user_id });
        post_ack(&room_action_endpoint(room_id, "transfer-host"), &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (room_id, user_id);
        server_stub()
    }
}

/// Host-only: start the game.
///
/// # Errors
///
/// `ActionRejected` when the caller is not the host or the room is empty.
pub async fn start_game(room_id: i64) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        post_ack(&room_action_endpoint(room_id, "start"), &serde_json::json!({})).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        server_stub()
    }
}
