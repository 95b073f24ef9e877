//! In-memory [`VoteApi`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::protocol::{ApiError, RegisterRequest, SessionState, VoteRequest};

use super::api::{Reply, VoteApi};

/// Records every call and answers with canned values.
pub struct FakeApi {
    state: Option<SessionState>,
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Some(state),
            reply: Reply::Accepted,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the server were unreachable.
    pub fn offline() -> Self {
        Self {
            state: None,
            reply: Reply::Accepted,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(message: Option<&str>) -> Self {
        Self {
            state: Some(SessionState::default()),
            reply: Reply::Rejected(message.map(str::to_string)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.state.is_none() {
            return Err(transport_error());
        }
        Ok(())
    }
}

fn transport_error() -> ApiError {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    ApiError::Decode(err)
}

#[async_trait]
impl VoteApi for FakeApi {
    async fn fetch_state(&self) -> Result<SessionState, ApiError> {
        self.record("state".to_string())?;
        Ok(self.state.clone().unwrap_or_default())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Reply, ApiError> {
        self.record(format!("register {}", request.first_name))?;
        Ok(self.reply.clone())
    }

    async fn vote(&self, request: &VoteRequest) -> Result<Reply, ApiError> {
        self.record(format!("vote {} {}", request.first_name, request.vote))?;
        Ok(self.reply.clone())
    }

    async fn reveal(&self) -> Result<Reply, ApiError> {
        self.record("reveal".to_string())?;
        Ok(self.reply.clone())
    }

    async fn reset(&self) -> Result<Reply, ApiError> {
        self.record("reset".to_string())?;
        Ok(self.reply.clone())
    }
}
