//! Core library for the quizcards study application.
//!
//! Provides:
//! - Shared types (Deck, Card, Category)
//! - Metrics engine: pure derivations over the (decks, cards) collections
//! - Answer grading for typed quiz answers
//! - Quiz session state machine (present -> reveal -> advance -> complete)

pub mod error;
pub mod grading;
pub mod metrics;
pub mod quiz;
pub mod types;

pub use error::{QuizError, Result};
pub use grading::grade_answer;
pub use metrics::{compute_accuracy, compute_most_reviewed_deck, compute_progress, NO_DECK_FOUND};
pub use quiz::{Advance, GradedCard, QuizSession, QuizState};
pub use types::{Card, Category, CategoryTag, Deck};
