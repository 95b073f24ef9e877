//! HTTP access to the vote server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;

use crate::protocol::{ApiError, ErrorBody, RegisterRequest, SessionState, VoteRequest};

/// How the server answered a mutating request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 2xx status.
    Accepted,
    /// Non-2xx status, with the server's `error` message if it sent one.
    Rejected(Option<String>),
}

/// Operations the client needs from the server.
#[async_trait]
pub trait VoteApi: Send + Sync {
    async fn fetch_state(&self) -> Result<SessionState, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<Reply, ApiError>;
    async fn vote(&self, request: &VoteRequest) -> Result<Reply, ApiError>;
    async fn reveal(&self) -> Result<Reply, ApiError>;
    async fn reset(&self) -> Result<Reply, ApiError>;
}

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
struct Endpoints {
    state: Url,
    register: Url,
    vote: Url,
    reveal: Url,
    reset: Url,
}

/// [`VoteApi`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpVoteApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpVoteApi {
    /// Create a client for the server at `base` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base: &str, timeout: Duration) -> crate::Result<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| crate::Error::Config(format!("invalid server URL {}: {}", base, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(crate::Error::Config(format!(
                "server URL must use http or https, got {}",
                base.scheme()
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = |path: &str| {
            base.join(path)
                .map_err(|e| crate::Error::Config(format!("invalid endpoint {}: {}", path, e)))
        };
        let endpoints = Endpoints {
            state: endpoint("api/state")?,
            register: endpoint("api/register")?,
            vote: endpoint("api/vote")?,
            reveal: endpoint("api/reveal")?,
            reset: endpoint("api/reset")?,
        };

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    async fn post<T: Serialize + Sync>(&self, url: &Url, body: Option<&T>) -> Result<Reply, ApiError> {
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        read_reply(response).await
    }
}

async fn read_reply(response: Response) -> Result<Reply, ApiError> {
    if response.status().is_success() {
        return Ok(Reply::Accepted);
    }

    let bytes = response.bytes().await?;
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty());
    Ok(Reply::Rejected(message))
}

#[async_trait]
impl VoteApi for HttpVoteApi {
    async fn fetch_state(&self) -> Result<SessionState, ApiError> {
        let response = self
            .client
            .get(self.endpoints.state.clone())
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Reply, ApiError> {
        self.post(&self.endpoints.register, Some(request)).await
    }

    async fn vote(&self, request: &VoteRequest) -> Result<Reply, ApiError> {
        self.post(&self.endpoints.vote, Some(request)).await
    }

    async fn reveal(&self) -> Result<Reply, ApiError> {
        self.post::<()>(&self.endpoints.reveal, None).await
    }

    async fn reset(&self) -> Result<Reply, ApiError> {
        self.post::<()>(&self.endpoints.reset, None).await
    }
}
