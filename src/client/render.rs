//! Turns a session snapshot into display text.
//!
//! Rendering is a pure function of the snapshot: the same state always
//! yields the same [`SessionView`].

use crate::protocol::{SessionState, compare_votes};

pub const NO_PARTICIPANTS: &str = "Aucun participant pour le moment.";
pub const RESULTS_HIDDEN: &str = "Les votes sont caches jusqu'au reveal.";
pub const NO_VOTES: &str = "Aucun vote a afficher.";
pub const AVERAGE_UNAVAILABLE: &str = "Moyenne: non calculable (seulement des votes \"?\").";

/// Everything the client shows about the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub status: String,
    pub participants: ParticipantsView,
    pub results: ResultsView,
    /// Empty while votes are hidden.
    pub average: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantsView {
    Empty,
    List(Vec<ParticipantLine>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantLine {
    pub first_name: String,
    pub has_voted: bool,
}

impl ParticipantLine {
    pub fn text(&self) -> String {
        let marker = if self.has_voted {
            "a vote"
        } else {
            "pas encore vote"
        };
        format!("{}: {}", self.first_name, marker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Hidden,
    NoVotes,
    Distribution(Vec<ResultBar>),
}

impl ResultsView {
    /// Text shown instead of bars, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Hidden => Some(RESULTS_HIDDEN),
            Self::NoVotes => Some(NO_VOTES),
            Self::Distribution(_) => None,
        }
    }
}

/// One card of the revealed distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBar {
    pub vote: String,
    pub count: usize,
    pub percent: u32,
}

impl ResultBar {
    pub fn count_text(&self) -> String {
        format!("{} vote(s)", self.count)
    }

    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Share of `count` among submitted votes, rounded to the nearest percent.
pub fn percent(count: usize, votes_submitted: usize) -> u32 {
    if votes_submitted == 0 {
        return 0;
    }
    (count as f64 / votes_submitted as f64 * 100.0).round() as u32
}

/// The server already rounds the average; it is printed as received.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("Moyenne: {}", value),
        None => AVERAGE_UNAVAILABLE.to_string(),
    }
}

pub fn render_state(state: &SessionState) -> SessionView {
    let participants = if state.participants_status.is_empty() {
        ParticipantsView::Empty
    } else {
        ParticipantsView::List(
            state
                .participants_status
                .iter()
                .map(|p| ParticipantLine {
                    first_name: p.first_name.clone(),
                    has_voted: p.has_voted,
                })
                .collect(),
        )
    };

    let counts = format!(
        "{}/{} participant(s) ont vote.",
        state.votes_submitted, state.total_participants
    );

    if !state.revealed {
        return SessionView {
            status: format!("Vote en cours. {}", counts),
            participants,
            results: ResultsView::Hidden,
            average: String::new(),
        };
    }

    let mut entries: Vec<(&String, &usize)> = state.distribution.iter().flatten().collect();
    entries.sort_by(|(a, _), (b, _)| compare_votes(a, b));

    let results = if entries.is_empty() {
        ResultsView::NoVotes
    } else {
        ResultsView::Distribution(
            entries
                .into_iter()
                .map(|(vote, &count)| ResultBar {
                    vote: vote.clone(),
                    count,
                    percent: percent(count, state.votes_submitted),
                })
                .collect(),
        )
    };

    SessionView {
        status: format!("Resultats reveles automatiquement. {}", counts),
        participants,
        results,
        average: format_average(state.average),
    }
}
