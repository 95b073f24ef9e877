//! # scrum-vote
//!
//! Planning poker over HTTP: a small session server and a terminal client
//! that polls it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use scrum_vote::client::{self, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> scrum_vote::Result<()> {
//!     client::run(ClientConfig {
//!         server: "http://127.0.0.1:8000".to_string(),
//!         name: Some("Alice".to_string()),
//!         timeout: Duration::from_secs(10),
//!     })
//!     .await
//! }
//! ```

pub mod client;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod terminal;

use std::io;

/// Error type for the server and client runtimes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or socket failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid settings.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
