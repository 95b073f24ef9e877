//! Vote server module.
//!
//! Hosts the shared planning poker session over HTTP/JSON.

mod api;
mod server;
mod state;

pub use api::{SharedStore, router};
pub use server::run;
pub use state::{SessionStore, VoteError};
