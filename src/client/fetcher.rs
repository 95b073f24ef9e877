//! Session state polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::protocol::{ApiError, SessionState};

use super::api::VoteApi;

/// Outcome of one refresh, tagged with the order it was issued in.
#[derive(Debug)]
pub struct Snapshot {
    pub seq: u64,
    pub result: Result<SessionState, ApiError>,
}

/// Fetches session state and numbers each request.
pub struct StateFetcher {
    api: Arc<dyn VoteApi>,
    issued: AtomicU64,
}

impl StateFetcher {
    pub fn new(api: Arc<dyn VoteApi>) -> Self {
        Self {
            api,
            issued: AtomicU64::new(0),
        }
    }

    pub async fn fetch_state(&self) -> Result<SessionState, ApiError> {
        self.api.fetch_state().await
    }

    /// Fetch the state once. The sequence number is drawn before the
    /// request goes out, so it reflects issue order, not arrival order.
    pub async fn refresh_state(&self) -> Snapshot {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.fetch_state().await;
        if let Err(e) = &result {
            tracing::debug!(seq, error = %e, "state refresh failed");
        }
        Snapshot { seq, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeApi;

    #[tokio::test]
    async fn test_refresh_numbers_requests_in_issue_order() {
        let api = Arc::new(FakeApi::with_state(SessionState::default()));
        let fetcher = StateFetcher::new(api.clone());

        let first = fetcher.refresh_state().await;
        let second = fetcher.refresh_state().await;

        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert!(second.result.is_ok());
        assert_eq!(api.calls(), vec!["state", "state"]);
    }

    #[tokio::test]
    async fn test_refresh_carries_failures() {
        let api = Arc::new(FakeApi::offline());
        let fetcher = StateFetcher::new(api);

        let snapshot = fetcher.refresh_state().await;
        assert!(matches!(snapshot.result, Err(ApiError::Decode(_))));
    }
}
