//! Vote client module.
//!
//! Terminal client that polls the vote server and sends user actions.

mod api;
mod client;
mod dispatcher;
mod fetcher;
mod render;
mod state;
#[cfg(test)]
mod testing;
mod ui;

pub use api::{HttpVoteApi, Reply, VoteApi};
pub use client::{ClientConfig, run};
pub use dispatcher::{Action, ActionDispatcher, ActionError};
pub use fetcher::{Snapshot, StateFetcher};
pub use render::{
    ParticipantLine, ParticipantsView, ResultBar, ResultsView, SessionView, format_average,
    percent, render_state,
};
pub use state::{ClientApp, Focus};
