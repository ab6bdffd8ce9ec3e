//! Session & collection cache.
//!
//! One `Session` per signed-in user. It owns the cached deck and card
//! collections plus the derived statistics, writes every mutation through
//! to the remote store before patching the cache, and drives quiz
//! sessions over the cached cards.
//!
//! The session is single-threaded by design: operations suspend only at
//! remote calls, and local mutation plus metric recomputation run to
//! completion in between. Two overlapping calls on the same entity race
//! at the remote store; whichever resolves last wins locally.

use chrono::Utc;
use uuid::Uuid;

use quizcards_core::error::Result as QuizResult;
use quizcards_core::metrics::{compute_accuracy, compute_most_reviewed_deck, compute_progress};
use quizcards_core::quiz::{GradedCard, QuizSession};
use quizcards_core::types::{Card, Category, Deck};

use crate::error::{Result, SessionError};
use crate::store::{NewCard, NewDeck, RemoteStore};

/// Display name for cards whose deck no longer exists.
pub const UNKNOWN_DECK: &str = "Unknown Deck";

/// Final outcome of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub accuracy: f64,
    pub progress: f64,
}

/// Cached view of one user's decks and cards, backed by a remote store.
pub struct Session<R: RemoteStore> {
    store: R,
    user_id: Option<Uuid>,
    decks: Vec<Deck>,
    cards: Vec<Card>,
    accuracy: f64,
    most_reviewed_deck: String,
}

impl<R: RemoteStore> Session<R> {
    pub fn new(store: R) -> Self {
        Self {
            store,
            user_id: None,
            decks: Vec::new(),
            cards: Vec::new(),
            accuracy: 0.0,
            most_reviewed_deck: String::new(),
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn most_reviewed_deck(&self) -> &str {
        &self.most_reviewed_deck
    }

    /// Per-deck progress, computed on demand from the cached cards.
    pub fn progress(&self, deck_id: Uuid) -> f64 {
        compute_progress(&self.cards, deck_id)
    }

    /// Deck name for display; orphaned cards resolve to [`UNKNOWN_DECK`].
    pub fn deck_name(&self, deck_id: Uuid) -> &str {
        self.decks
            .iter()
            .find(|deck| deck.id == deck_id)
            .map(|deck| deck.name.as_str())
            .unwrap_or(UNKNOWN_DECK)
    }

    // === Authentication ===

    /// Sign in and load the user's collections.
    ///
    /// Auth failure leaves the identity unset. If the follow-up reload
    /// fails the identity stays set and the read error is surfaced; the
    /// caller can retry `reload`.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Uuid> {
        let user_id = self
            .store
            .auth_sign_in(email, password)
            .await
            .map_err(SessionError::Auth)?;
        tracing::info!("signed in as {}", user_id);

        self.user_id = Some(user_id);
        self.reload().await?;
        Ok(user_id)
    }

    /// Register an auth record and its profile row, then load collections.
    ///
    /// If the profile upsert fails after the auth record was created, the
    /// auth side-effect is not rolled back; the session stays signed out
    /// and the write error is surfaced.
    pub async fn sign_up(&mut self, email: &str, username: &str, password: &str) -> Result<Uuid> {
        let user_id = self
            .store
            .auth_sign_up(email, password)
            .await
            .map_err(SessionError::Auth)?;

        self.store
            .upsert_user_profile(user_id, email, username)
            .await
            .map_err(SessionError::Write)?;
        tracing::info!("registered {}", user_id);

        self.user_id = Some(user_id);
        self.reload().await?;
        Ok(user_id)
    }

    /// Clear the identity and all cached state. Idempotent; a failed
    /// remote sign-out is logged and does not keep the session alive.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.store.auth_sign_out().await {
            tracing::warn!("remote sign-out failed: {}", e);
        }
        self.user_id = None;
        self.decks.clear();
        self.cards.clear();
        self.accuracy = 0.0;
        self.most_reviewed_deck.clear();
    }

    // === Collections ===

    /// Replace the cached collections with a fresh fetch.
    ///
    /// A user with no decks gets empty collections and zeroed metrics;
    /// the zeroed values are local-only and not written back upstream.
    /// On a read failure the previous cache contents are kept, so a
    /// transient error never flashes an empty state.
    pub async fn reload(&mut self) -> Result<()> {
        let user_id = self.user_id.ok_or(SessionError::NotSignedIn)?;

        let decks = self
            .store
            .list_decks(user_id)
            .await
            .map_err(SessionError::Read)?;

        if decks.is_empty() {
            self.decks.clear();
            self.cards.clear();
            self.accuracy = 0.0;
            self.most_reviewed_deck.clear();
            return Ok(());
        }

        let deck_ids: Vec<Uuid> = decks.iter().map(|deck| deck.id).collect();
        let cards = self
            .store
            .list_cards(&deck_ids)
            .await
            .map_err(SessionError::Read)?;

        self.decks = decks;
        self.cards = cards;
        self.recompute_metrics();
        self.persist_metrics().await;
        Ok(())
    }

    pub async fn add_deck(&mut self, name: &str, category: Category) -> Result<Uuid> {
        let owner_id = self.user_id.ok_or(SessionError::NotSignedIn)?;
        let new_deck = NewDeck {
            name: name.to_string(),
            category,
            owner_id,
            created_at: Utc::now(),
        };

        let deck = self
            .store
            .insert_deck(&new_deck)
            .await
            .map_err(SessionError::Write)?;
        let deck_id = deck.id;
        self.decks.push(deck);
        self.recompute_metrics();
        Ok(deck_id)
    }

    pub async fn rename_deck(
        &mut self,
        deck_id: Uuid,
        name: &str,
        category: Category,
    ) -> Result<()> {
        self.store
            .update_deck(deck_id, name, &category)
            .await
            .map_err(SessionError::Write)?;

        if let Some(deck) = self.decks.iter_mut().find(|deck| deck.id == deck_id) {
            deck.name = name.to_string();
            deck.category = category;
        }
        self.recompute_metrics();
        Ok(())
    }

    /// Delete a deck. Cards referencing it are deliberately left in the
    /// cache; downstream views render them under [`UNKNOWN_DECK`].
    pub async fn remove_deck(&mut self, deck_id: Uuid) -> Result<()> {
        self.store
            .delete_deck(deck_id)
            .await
            .map_err(SessionError::Write)?;

        self.decks.retain(|deck| deck.id != deck_id);
        self.recompute_metrics();
        Ok(())
    }

    pub async fn add_card(&mut self, deck_id: Uuid, question: &str, answer: &str) -> Result<Uuid> {
        let new_card = NewCard {
            deck_id,
            question: question.to_string(),
            answer: answer.to_string(),
        };

        let card = self
            .store
            .insert_card(&new_card)
            .await
            .map_err(SessionError::Write)?;
        let card_id = card.id;
        self.cards.push(card);
        self.recompute_metrics();
        Ok(card_id)
    }

    pub async fn update_card(
        &mut self,
        card_id: Uuid,
        deck_id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        self.store
            .update_card(card_id, deck_id, question, answer)
            .await
            .map_err(SessionError::Write)?;

        if let Some(card) = self.cards.iter_mut().find(|card| card.id == card_id) {
            card.deck_id = deck_id;
            card.question = question.to_string();
            card.answer = answer.to_string();
        }
        self.recompute_metrics();
        Ok(())
    }

    pub async fn remove_card(&mut self, card_id: Uuid) -> Result<()> {
        self.store
            .delete_card(card_id)
            .await
            .map_err(SessionError::Write)?;

        self.cards.retain(|card| card.id != card_id);
        self.recompute_metrics();
        Ok(())
    }

    // === Quiz ===

    /// Start a quiz over a deck's cards in their cached order.
    pub fn start_quiz(&self, deck_id: Uuid) -> QuizResult<QuizSession> {
        let cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| card.deck_id == deck_id)
            .cloned()
            .collect();
        QuizSession::new(deck_id, cards)
    }

    /// Patch a grading outcome into the cached card collection. This is a
    /// local patch only; correctness flags are never written remotely.
    pub fn apply_grade(&mut self, grade: &GradedCard) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == grade.card_id) {
            card.is_correct = Some(grade.is_correct);
        }
        self.recompute_metrics();
    }

    /// Finish a completed quiz: recompute metrics over the full card
    /// collection, append accuracy and progress snapshots, and hand back
    /// the final score. Snapshot failures are logged, never surfaced;
    /// the caller always gets the result.
    pub async fn complete_quiz(&mut self, quiz: &QuizSession) -> QuizResult<QuizOutcome> {
        let (score, total) = quiz.result()?;

        self.recompute_metrics();
        let progress = compute_progress(&self.cards, quiz.deck_id());

        if let Some(user_id) = self.user_id {
            if let Err(e) = self
                .store
                .append_accuracy_snapshot(user_id, self.accuracy)
                .await
            {
                tracing::warn!("failed to append accuracy snapshot: {}", e);
            }
            if let Err(e) = self
                .store
                .append_progress_snapshot(user_id, quiz.deck_id(), progress)
                .await
            {
                tracing::warn!("failed to append progress snapshot: {}", e);
            }
        }

        Ok(QuizOutcome {
            score,
            total,
            accuracy: self.accuracy,
            progress,
        })
    }

    // === Derived metrics ===

    /// Recompute derived statistics from the current collections. Runs
    /// after every change to the cache; the results are never patched
    /// incrementally.
    fn recompute_metrics(&mut self) {
        self.accuracy = compute_accuracy(&self.cards);
        self.most_reviewed_deck = compute_most_reviewed_deck(&self.decks, &self.cards);
    }

    /// Best-effort snapshot upserts after a reload. Failures are logged
    /// only; the in-memory values already reflect the cache.
    async fn persist_metrics(&self) {
        let Some(user_id) = self.user_id else {
            return;
        };

        if let Err(e) = self.store.save_accuracy(user_id, self.accuracy).await {
            tracing::warn!("failed to save accuracy: {}", e);
        }
        if let Err(e) = self
            .store
            .save_most_reviewed_deck(user_id, &self.most_reviewed_deck)
            .await
        {
            tracing::warn!("failed to save most reviewed deck: {}", e);
        }
    }
}
