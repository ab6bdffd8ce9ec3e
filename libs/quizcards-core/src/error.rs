//! Error types for quizcards-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised by the quiz session state machine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    #[error("deck has no cards to quiz")]
    EmptyDeck,

    #[error("no question is currently being presented")]
    NotPresenting,

    #[error("no answer has been revealed yet")]
    NotRevealed,

    #[error("quiz has not completed")]
    NotCompleted,
}
