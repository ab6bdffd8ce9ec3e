//! Metrics engine: pure derivations over the current deck and card
//! collections.
//!
//! These functions are the only source of the derived statistics. They are
//! recomputed wholesale whenever the collections change; nothing patches
//! their results incrementally.

use std::collections::HashMap;

use uuid::Uuid;

use crate::types::{Card, Deck};

/// Sentinel returned when no deck can be named as most reviewed.
pub const NO_DECK_FOUND: &str = "No Deck Found";

/// Overall accuracy: percentage of cards answered correctly on their most
/// recent quiz attempt, rounded to two decimal places. Zero for an empty
/// collection.
pub fn compute_accuracy(cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }

    let correct = cards
        .iter()
        .filter(|card| card.is_correct == Some(true))
        .count();
    let percentage = correct as f64 / cards.len() as f64 * 100.0;

    (percentage * 100.0).round() / 100.0
}

/// Name of the deck with the most cards.
///
/// Ties resolve to the deck id first encountered while scanning cards in
/// their fetched order. Returns the sentinel when there are no cards, or
/// when the winning id no longer matches a deck (orphaned cards).
pub fn compute_most_reviewed_deck(decks: &[Deck], cards: &[Card]) -> String {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    let mut seen_order: Vec<Uuid> = Vec::new();

    for card in cards {
        let count = counts.entry(card.deck_id).or_insert(0);
        if *count == 0 {
            seen_order.push(card.deck_id);
        }
        *count += 1;
    }

    let mut winner: Option<(Uuid, usize)> = None;
    for deck_id in &seen_order {
        let count = counts[deck_id];
        // Strictly greater, so the first-seen id wins ties.
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((*deck_id, count));
        }
    }

    match winner {
        Some((deck_id, _)) => decks
            .iter()
            .find(|deck| deck.id == deck_id)
            .map(|deck| deck.name.clone())
            .unwrap_or_else(|| NO_DECK_FOUND.to_string()),
        None => NO_DECK_FOUND.to_string(),
    }
}

/// Per-deck progress: percentage of the deck's cards answered correctly,
/// unrounded. Zero for a deck with no cards.
pub fn compute_progress(cards: &[Card], deck_id: Uuid) -> f64 {
    let total = cards.iter().filter(|card| card.deck_id == deck_id).count();
    if total == 0 {
        return 0.0;
    }

    let completed = cards
        .iter()
        .filter(|card| card.deck_id == deck_id && card.is_correct == Some(true))
        .count();

    completed as f64 / total as f64 * 100.0
}
