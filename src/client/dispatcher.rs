//! User actions sent to the server.

use std::sync::Arc;

use crate::protocol::{ApiError, RegisterRequest, VoteRequest, validate_first_name};

use super::api::{Reply, VoteApi};

const REGISTER_FAILED: &str = "Erreur pendant l'inscription.";
const VOTE_FAILED: &str = "Erreur pendant le vote.";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register,
    Vote(String),
    Reveal,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Vote(_) => "vote",
            Self::Reveal => "reveal",
            Self::Reset => "reset",
        }
    }

    /// Whether the session should be refreshed once the action completes.
    ///
    /// Reveal and reset always refresh; register and vote only on success.
    pub fn refresh_after(&self, result: &Result<(), ActionError>) -> bool {
        result.is_ok() || matches!(self, Self::Reveal | Self::Reset)
    }
}

/// Why an action did not go through. Displays as a user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Entrez votre prenom (2 caracteres min).")]
    InvalidName,

    #[error("{0}")]
    Rejected(String),

    #[error("Erreur reseau.")]
    Transport(#[from] ApiError),
}

/// Sends actions to the server through a [`VoteApi`].
pub struct ActionDispatcher {
    api: Arc<dyn VoteApi>,
}

impl ActionDispatcher {
    pub fn new(api: Arc<dyn VoteApi>) -> Self {
        Self { api }
    }

    pub async fn dispatch(&self, first_name: &str, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Register => self.register_participant(first_name).await,
            Action::Vote(vote) => self.submit_vote(first_name, vote).await,
            Action::Reveal => self.reveal_votes().await,
            Action::Reset => self.reset_votes().await,
        }
    }

    pub async fn register_participant(&self, first_name: &str) -> Result<(), ActionError> {
        let first_name = validate_first_name(first_name).map_err(|_| ActionError::InvalidName)?;
        let request = RegisterRequest {
            first_name: first_name.to_string(),
        };

        let reply = self.api.register(&request).await?;
        accepted_or(reply, REGISTER_FAILED)
    }

    pub async fn submit_vote(&self, first_name: &str, vote: &str) -> Result<(), ActionError> {
        let first_name = validate_first_name(first_name).map_err(|_| ActionError::InvalidName)?;
        let request = VoteRequest {
            first_name: first_name.to_string(),
            vote: vote.to_string(),
        };

        let reply = self.api.vote(&request).await?;
        accepted_or(reply, VOTE_FAILED)
    }

    /// The server's status is ignored; only transport failures are errors.
    pub async fn reveal_votes(&self) -> Result<(), ActionError> {
        self.api.reveal().await?;
        Ok(())
    }

    /// The server's status is ignored; only transport failures are errors.
    pub async fn reset_votes(&self) -> Result<(), ActionError> {
        self.api.reset().await?;
        Ok(())
    }
}

fn accepted_or(reply: Reply, fallback: &str) -> Result<(), ActionError> {
    match reply {
        Reply::Accepted => Ok(()),
        Reply::Rejected(message) => Err(ActionError::Rejected(
            message.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeApi;
    use crate::protocol::SessionState;

    fn dispatcher(api: &Arc<FakeApi>) -> ActionDispatcher {
        ActionDispatcher::new(api.clone())
    }

    #[tokio::test]
    async fn test_short_names_never_reach_the_server() {
        let api = Arc::new(FakeApi::with_state(SessionState::default()));
        let dispatcher = dispatcher(&api);

        for name in ["", "A", "  B  "] {
            let result = dispatcher.register_participant(name).await;
            assert!(matches!(result, Err(ActionError::InvalidName)));

            let result = dispatcher.submit_vote(name, "5").await;
            assert!(matches!(result, Err(ActionError::InvalidName)));
        }

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_and_vote_send_trimmed_name() {
        let api = Arc::new(FakeApi::with_state(SessionState::default()));
        let dispatcher = dispatcher(&api);

        dispatcher.register_participant("  Alice ").await.unwrap();
        dispatcher.submit_vote("Alice", "13").await.unwrap();

        assert_eq!(api.calls(), vec!["register Alice", "vote Alice 13"]);
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let api = Arc::new(FakeApi::rejecting(Some("Vote invalide.")));
        let err = dispatcher(&api).submit_vote("Alice", "4").await.unwrap_err();
        assert_eq!(err.to_string(), "Vote invalide.");
    }

    #[tokio::test]
    async fn test_fallback_messages() {
        let api = Arc::new(FakeApi::rejecting(None));
        let dispatcher = dispatcher(&api);

        let err = dispatcher.register_participant("Alice").await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur pendant l'inscription.");

        let err = dispatcher.submit_vote("Alice", "3").await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur pendant le vote.");
    }

    #[tokio::test]
    async fn test_reveal_and_reset_ignore_rejections() {
        let api = Arc::new(FakeApi::rejecting(Some("nope")));
        let dispatcher = dispatcher(&api);

        assert!(dispatcher.reveal_votes().await.is_ok());
        assert!(dispatcher.reset_votes().await.is_ok());
        assert_eq!(api.calls(), vec!["reveal", "reset"]);
    }

    #[tokio::test]
    async fn test_reveal_transport_failure_is_reported() {
        let api = Arc::new(FakeApi::offline());
        let err = dispatcher(&api).dispatch("", &Action::Reveal).await.unwrap_err();
        assert!(matches!(err, ActionError::Transport(_)));
        assert_eq!(err.to_string(), "Erreur reseau.");
    }

    #[test]
    fn test_refresh_policy() {
        let ok: Result<(), ActionError> = Ok(());
        let rejected: Result<(), ActionError> = Err(ActionError::Rejected("x".to_string()));

        assert!(Action::Register.refresh_after(&ok));
        assert!(Action::Vote("5".to_string()).refresh_after(&ok));
        assert!(!Action::Register.refresh_after(&rejected));
        assert!(!Action::Vote("5".to_string()).refresh_after(&rejected));
        assert!(Action::Reveal.refresh_after(&rejected));
        assert!(Action::Reset.refresh_after(&rejected));
    }
}
