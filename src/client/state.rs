//! Client state management.

use crate::protocol::{ALLOWED_VOTES, NAME_MAX_LENGTH};

use super::fetcher::Snapshot;
use super::render::{SessionView, render_state};

pub const NETWORK_ERROR: &str = "Erreur reseau.";

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing the first name.
    #[default]
    Name,
    /// Picking a card.
    Cards,
}

/// Client application state.
pub struct ClientApp {
    /// Server base URL (for display).
    pub server: String,
    /// Current focus.
    pub focus: Focus,
    /// Whether the client should quit.
    pub should_quit: bool,
    name_input: String,
    cards: Vec<String>,
    selected_card: usize,
    view: Option<SessionView>,
    status: String,
    notice: Option<String>,
    last_applied_seq: u64,
}

impl ClientApp {
    /// Create a new client app. The vote cards are fixed for its lifetime.
    pub fn new(server: String, name: Option<String>) -> Self {
        let mut app = Self {
            status: format!("Connexion a {}...", server),
            server,
            focus: Focus::Name,
            should_quit: false,
            name_input: String::new(),
            cards: ALLOWED_VOTES.iter().map(|v| v.to_string()).collect(),
            selected_card: 0,
            view: None,
            notice: None,
            last_applied_seq: 0,
        };
        for c in name.unwrap_or_default().chars() {
            app.name_input_push(c);
        }
        app
    }

    /// Apply a refresh result unless a newer one was already applied.
    ///
    /// On failure the status line reports a network error and the last
    /// rendered session stays on screen. Returns false if discarded.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> bool {
        if snapshot.seq <= self.last_applied_seq {
            tracing::trace!(
                seq = snapshot.seq,
                applied = self.last_applied_seq,
                "discarding stale snapshot"
            );
            return false;
        }
        self.last_applied_seq = snapshot.seq;

        match snapshot.result {
            Ok(state) => {
                let view = render_state(&state);
                self.status = view.status.clone();
                self.view = Some(view);
            }
            Err(_) => {
                self.status = NETWORK_ERROR.to_string();
            }
        }
        true
    }

    pub fn view(&self) -> Option<&SessionView> {
        self.view.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, message: String) {
        self.notice = Some(message);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Name => Focus::Cards,
            Focus::Cards => Focus::Name,
        };
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn selected_card(&self) -> usize {
        self.selected_card
    }

    /// Label of the highlighted card.
    pub fn selected_vote(&self) -> &str {
        &self.cards[self.selected_card]
    }

    pub fn select_next_card(&mut self) {
        self.selected_card = (self.selected_card + 1) % self.cards.len();
    }

    pub fn select_previous_card(&mut self) {
        self.selected_card = (self.selected_card + self.cards.len() - 1) % self.cards.len();
    }

    /// Add a character to name input.
    pub fn name_input_push(&mut self, c: char) {
        if self.name_input.chars().count() < NAME_MAX_LENGTH {
            self.name_input.push(c);
        }
    }

    /// Remove a character from name input.
    pub fn name_input_pop(&mut self) {
        self.name_input.pop();
    }

    /// Get name input value.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }
}
