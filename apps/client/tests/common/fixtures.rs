//! Factory functions for test data.

use chrono::Utc;
use uuid::Uuid;

use quizcards_core::types::{Card, Category, CategoryTag, Deck};

/// Create a deck owned by the given user.
pub fn deck(owner_id: Uuid, name: &str) -> Deck {
    Deck {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: Category::Preset(CategoryTag::Language),
        owner_id,
        created_at: Utc::now(),
    }
}

/// Create a card in the given deck.
pub fn card(deck_id: Uuid, question: &str, answer: &str) -> Card {
    Card {
        id: Uuid::new_v4(),
        deck_id,
        question: question.to_string(),
        answer: answer.to_string(),
        is_correct: None,
    }
}

/// Create a card with a recorded quiz outcome.
pub fn graded_card(deck_id: Uuid, question: &str, answer: &str, is_correct: bool) -> Card {
    Card {
        is_correct: Some(is_correct),
        ..card(deck_id, question, answer)
    }
}
