//! Request and response payloads for the `/api/*` endpoints.
//!
//! Field names are camelCase on the wire.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::votes::compare_votes;

/// Vote progress of a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatus {
    pub first_name: String,
    pub has_voted: bool,
}

/// Public snapshot of the session, as returned by `GET /api/state`.
///
/// `distribution` and `average` are only meaningful once `revealed` is set;
/// the server leaves them out while votes are hidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub revealed: bool,
    pub total_participants: usize,
    pub votes_submitted: usize,
    pub participants_status: Vec<ParticipantStatus>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_in_card_order"
    )]
    pub distribution: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

/// Writes the distribution keys in card order (`"2"` before `"13"`, `"?"` last).
fn serialize_in_card_order<S: Serializer>(
    distribution: &Option<BTreeMap<String, usize>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let Some(distribution) = distribution else {
        return serializer.serialize_none();
    };

    let mut entries: Vec<_> = distribution.iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_votes(a, b));

    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (vote, count) in entries {
        map.serialize_entry(vote, count)?;
    }
    map.end()
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
}

/// Body of `POST /api/vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub first_name: String,
    pub vote: String,
}

/// Successful answer to every mutating endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionAck {
    pub ok: bool,
    pub state: SessionState,
}

impl ActionAck {
    pub fn new(state: SessionState) -> Self {
        Self { ok: true, state }
    }
}

/// Error payload sent with any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Transport-level failure talking to the server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
