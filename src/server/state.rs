//! Server state management.
//!
//! The session store is the single source of truth for participants,
//! their votes and whether results are revealed.

use std::collections::{BTreeMap, HashMap};

use crate::protocol::{
    ALLOWED_VOTES, NAME_MIN_LENGTH, ParticipantStatus, SessionState, is_allowed_vote,
    sanitize_name,
};

/// Reasons a mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("Le prenom est requis (2 caracteres min).")]
    InvalidName,

    #[error("Vote invalide.")]
    InvalidVote,
}

/// Main server state.
#[derive(Debug, Default)]
pub struct SessionStore {
    /// Whether votes are visible to everyone.
    revealed: bool,
    /// Display name by participant key.
    participants: HashMap<String, String>,
    /// Vote label by participant key.
    votes: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[cfg(test)]
    fn participant_count(&self) -> usize {
        self.participants.len()
    }

    #[cfg(test)]
    fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Register (or rename) a participant.
    ///
    /// A participant who joins without a vote hides the results again.
    pub fn register(&mut self, raw_name: &str) -> Result<SessionState, VoteError> {
        let name = checked_name(raw_name)?;
        let key = participant_key(&name);

        if !self.votes.contains_key(&key) {
            self.revealed = false;
        }
        self.participants.insert(key, name);

        Ok(self.public_state())
    }

    /// Record or replace a vote, registering the voter if needed.
    ///
    /// Results reveal themselves once every participant has voted.
    pub fn vote(&mut self, raw_name: &str, vote: &str) -> Result<SessionState, VoteError> {
        let name = checked_name(raw_name)?;
        if !is_allowed_vote(vote) {
            return Err(VoteError::InvalidVote);
        }

        let key = participant_key(&name);
        self.participants.insert(key.clone(), name);
        self.votes.insert(key, vote.to_string());

        if self.all_participants_voted() {
            self.revealed = true;
        }

        Ok(self.public_state())
    }

    pub fn reveal(&mut self) -> SessionState {
        self.revealed = true;
        self.public_state()
    }

    /// Start a new round: forget everyone and hide results.
    pub fn reset(&mut self) -> SessionState {
        self.revealed = false;
        self.participants.clear();
        self.votes.clear();
        self.public_state()
    }

    fn all_participants_voted(&self) -> bool {
        !self.participants.is_empty()
            && self.participants.keys().all(|key| self.votes.contains_key(key))
    }

    /// Project the store into the snapshot clients see.
    pub fn public_state(&self) -> SessionState {
        let mut participants: Vec<_> = self.participants.iter().collect();
        participants.sort_by_key(|(_, name)| name.to_lowercase());

        let participants_status: Vec<ParticipantStatus> = participants
            .into_iter()
            .map(|(key, name)| ParticipantStatus {
                first_name: name.clone(),
                has_voted: self.votes.contains_key(key),
            })
            .collect();

        let mut state = SessionState {
            revealed: self.revealed,
            total_participants: participants_status.len(),
            votes_submitted: self.votes.len(),
            participants_status,
            distribution: None,
            average: None,
        };

        if self.revealed {
            state.distribution = Some(self.distribution());
            state.average = self.average();
        }

        state
    }

    fn distribution(&self) -> BTreeMap<String, usize> {
        ALLOWED_VOTES
            .iter()
            .map(|label| {
                let count = self.votes.values().filter(|v| v == label).count();
                (label.to_string(), count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Mean of the numeric votes, rounded to two decimals (ties to even).
    fn average(&self) -> Option<f64> {
        let numeric: Vec<u32> = self
            .votes
            .values()
            .filter_map(|v| v.parse::<u32>().ok())
            .collect();

        if numeric.is_empty() {
            return None;
        }

        let mean = numeric.iter().map(|&v| f64::from(v)).sum::<f64>() / numeric.len() as f64;
        Some((mean * 100.0).round_ties_even() / 100.0)
    }
}

fn checked_name(raw_name: &str) -> Result<String, VoteError> {
    let name = sanitize_name(raw_name);
    if name.chars().count() < NAME_MIN_LENGTH {
        return Err(VoteError::InvalidName);
    }
    Ok(name)
}

/// Participants are identified case-insensitively.
fn participant_key(name: &str) -> String {
    name.to_lowercase()
}
