//! Wire protocol shared by the vote server and the terminal client.
//!
//! All payloads are JSON over HTTP.

mod messages;
mod votes;

pub use messages::{
    ActionAck, ApiError, ErrorBody, ParticipantStatus, RegisterRequest, SessionState, VoteRequest,
};
pub use votes::{
    ALLOWED_VOTES, NAME_MAX_LENGTH, NAME_MIN_LENGTH, compare_votes, is_allowed_vote,
    sanitize_name, validate_first_name,
};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address for the server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Interval between two passive state refreshes on the client.
pub const POLL_INTERVAL_MS: u64 = 3000;
