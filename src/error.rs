// src/error.rs
use thiserror::Error;

use crate::models::SessionId;

pub type VotingResult<T> = Result<T, VotingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("session title must not be empty")]
    EmptyTitle,
    #[error("at least 2 voting options are required, got {0}")]
    TooFewOptions(usize),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("option {option_id} not found in session {session_id}")]
    OptionNotFound { session_id: SessionId, option_id: u32 },
    #[error("already voted in session {0}")]
    AlreadyVoted(SessionId),
    #[error("results for session {0} have not been revealed")]
    ResultsHidden(SessionId),
}

impl VotingError {
    /// Short machine-readable code, used in shell responses.
    pub fn code(&self) -> &'static str {
        match self {
            VotingError::EmptyTitle | VotingError::TooFewOptions(_) => "validation",
            VotingError::SessionNotFound(_) | VotingError::OptionNotFound { .. } => "not_found",
            VotingError::AlreadyVoted(_) => "already_voted",
            VotingError::ResultsHidden(_) => "results_hidden",
        }
    }
}
