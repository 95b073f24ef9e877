//! HTTP routes for the vote session.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::protocol::{ActionAck, ErrorBody, SessionState};

use super::state::{SessionStore, VoteError};

/// Shared server state wrapped in Arc<Mutex> for async access.
pub type SharedStore = Arc<Mutex<SessionStore>>;

impl IntoResponse for VoteError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

/// Build the `/api` router over a shared store.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/register", post(register))
        .route("/api/vote", post(vote))
        .route("/api/reveal", post(reveal))
        .route("/api/reset", post(reset))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(store)
}

async fn get_state(State(store): State<SharedStore>) -> Json<SessionState> {
    let store = store.lock().await;
    Json(store.public_state())
}

async fn register(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<Json<ActionAck>, VoteError> {
    let body = json_object(&body);
    let first_name = string_field(&body, "firstName").unwrap_or_default();

    let mut store = store.lock().await;
    match store.register(first_name) {
        Ok(state) => {
            tracing::info!(
                name = first_name.trim(),
                participants = state.total_participants,
                "participant registered"
            );
            Ok(Json(ActionAck::new(state)))
        }
        Err(e) => {
            tracing::warn!(reason = %e, "registration rejected");
            Err(e)
        }
    }
}

async fn vote(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<Json<ActionAck>, VoteError> {
    let body = json_object(&body);
    let first_name = string_field(&body, "firstName").unwrap_or_default();
    let vote = string_field(&body, "vote").unwrap_or_default();

    let mut store = store.lock().await;
    let was_revealed = store.is_revealed();
    match store.vote(first_name, vote) {
        Ok(state) => {
            tracing::info!(
                name = first_name.trim(),
                votes = state.votes_submitted,
                participants = state.total_participants,
                "vote recorded"
            );
            if state.revealed && !was_revealed {
                tracing::info!("everyone has voted, results revealed");
            }
            Ok(Json(ActionAck::new(state)))
        }
        Err(e) => {
            tracing::warn!(reason = %e, "vote rejected");
            Err(e)
        }
    }
}

async fn reveal(State(store): State<SharedStore>) -> Json<ActionAck> {
    let mut store = store.lock().await;
    let state = store.reveal();
    tracing::info!(votes = state.votes_submitted, "results revealed");
    Json(ActionAck::new(state))
}

async fn reset(State(store): State<SharedStore>) -> Json<ActionAck> {
    let mut store = store.lock().await;
    let state = store.reset();
    tracing::info!("session reset");
    Json(ActionAck::new(state))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found".to_string())
}

/// Bodies that are empty, malformed or not a JSON object count as `{}`.
fn json_object(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn string_field<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}
