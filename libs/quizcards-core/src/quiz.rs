//! Quiz session state machine.
//!
//! A session walks the caller through a fixed deck's cards, one question
//! at a time: `Presenting` -> `submit_answer` -> `Revealed` -> `advance`,
//! ending in `Completed` after the last card. The card order is whatever
//! order the caller supplies (the cache's fetched order); it is never
//! re-sorted.

use uuid::Uuid;

use crate::error::{QuizError, Result};
use crate::grading::grade_answer;
use crate::types::Card;

/// State of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// A question is on screen, awaiting an answer.
    Presenting { index: usize },
    /// The answer has been graded and revealed.
    Revealed { index: usize, was_correct: bool },
    /// All cards have been answered.
    Completed { score: usize, total: usize },
}

/// Grading outcome for one card, to be applied to the cache as a local
/// patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedCard {
    pub card_id: Uuid,
    pub is_correct: bool,
}

/// Result of advancing past a revealed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished { score: usize, total: usize },
}

/// A quiz over one deck's cards.
#[derive(Debug, Clone)]
pub struct QuizSession {
    deck_id: Uuid,
    cards: Vec<Card>,
    state: QuizState,
    score: usize,
}

impl QuizSession {
    /// Start a quiz over the given cards. An empty deck has no valid
    /// presenting state and is rejected up front.
    pub fn new(deck_id: Uuid, cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(QuizError::EmptyDeck);
        }
        Ok(Self {
            deck_id,
            cards,
            state: QuizState::Presenting { index: 0 },
            score: 0,
        })
    }

    pub fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// The card currently presented or revealed, if any.
    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            QuizState::Presenting { index } | QuizState::Revealed { index, .. } => {
                self.cards.get(index)
            }
            QuizState::Completed { .. } => None,
        }
    }

    /// Grade the typed answer for the current question.
    ///
    /// Valid only while presenting. A correct answer increments the
    /// running score. The returned grade identifies the card so the
    /// caller can patch its cached `is_correct` flag.
    pub fn submit_answer(&mut self, raw_input: &str) -> Result<GradedCard> {
        let index = match self.state {
            QuizState::Presenting { index } => index,
            _ => return Err(QuizError::NotPresenting),
        };

        let card = &self.cards[index];
        let is_correct = grade_answer(raw_input, &card.answer);
        if is_correct {
            self.score += 1;
        }
        self.state = QuizState::Revealed {
            index,
            was_correct: is_correct,
        };

        Ok(GradedCard {
            card_id: card.id,
            is_correct,
        })
    }

    /// Move past a revealed answer: to the next question, or to
    /// completion after the last card.
    pub fn advance(&mut self) -> Result<Advance> {
        let index = match self.state {
            QuizState::Revealed { index, .. } => index,
            _ => return Err(QuizError::NotRevealed),
        };

        if index + 1 < self.cards.len() {
            self.state = QuizState::Presenting { index: index + 1 };
            Ok(Advance::Next { index: index + 1 })
        } else {
            let total = self.cards.len();
            self.state = QuizState::Completed {
                score: self.score,
                total,
            };
            Ok(Advance::Finished {
                score: self.score,
                total,
            })
        }
    }

    /// Final `(score, total)` pair, available once completed.
    pub fn result(&self) -> Result<(usize, usize)> {
        match self.state {
            QuizState::Completed { score, total } => Ok((score, total)),
            _ => Err(QuizError::NotCompleted),
        }
    }
}
