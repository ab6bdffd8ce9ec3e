//! Remote store contract consumed by the session cache.
//!
//! The remote service is the source of truth; every call crosses the
//! network and may fail or be delayed. The session never mutates its
//! local collections until the corresponding remote call has succeeded.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use quizcards_core::types::{Card, Category, Deck};

use crate::error::StoreError;

/// Fields for inserting a new deck. The id is assigned remotely.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeck {
    pub name: String,
    pub category: Category,
    #[serde(rename = "user_id")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new card. The id is assigned remotely.
#[derive(Debug, Clone, Serialize)]
pub struct NewCard {
    #[serde(rename = "deckId")]
    pub deck_id: Uuid,
    pub question: String,
    pub answer: String,
}

/// Request/response boundary to the remote persistence service.
///
/// `save_accuracy` and `save_most_reviewed_deck` upsert a single row per
/// user and are refreshed after metric recomputation; the snapshot
/// appends add a new row per quiz completion.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn auth_sign_up(&self, email: &str, password: &str) -> Result<Uuid, StoreError>;
    async fn auth_sign_in(&self, email: &str, password: &str) -> Result<Uuid, StoreError>;
    async fn auth_sign_out(&self) -> Result<(), StoreError>;

    async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
    ) -> Result<(), StoreError>;

    /// All decks owned by the user, in creation order.
    async fn list_decks(&self, user_id: Uuid) -> Result<Vec<Deck>, StoreError>;

    /// All cards whose deck id is in the given set, in fetched order.
    async fn list_cards(&self, deck_ids: &[Uuid]) -> Result<Vec<Card>, StoreError>;

    async fn insert_deck(&self, deck: &NewDeck) -> Result<Deck, StoreError>;
    async fn update_deck(
        &self,
        deck_id: Uuid,
        name: &str,
        category: &Category,
    ) -> Result<(), StoreError>;
    async fn delete_deck(&self, deck_id: Uuid) -> Result<(), StoreError>;

    async fn insert_card(&self, card: &NewCard) -> Result<Card, StoreError>;
    async fn update_card(
        &self,
        card_id: Uuid,
        deck_id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<(), StoreError>;
    async fn delete_card(&self, card_id: Uuid) -> Result<(), StoreError>;

    async fn save_accuracy(&self, user_id: Uuid, accuracy: f64) -> Result<(), StoreError>;
    async fn save_most_reviewed_deck(
        &self,
        user_id: Uuid,
        deck_name: &str,
    ) -> Result<(), StoreError>;

    async fn append_accuracy_snapshot(
        &self,
        user_id: Uuid,
        accuracy: f64,
    ) -> Result<(), StoreError>;
    async fn append_progress_snapshot(
        &self,
        user_id: Uuid,
        deck_id: Uuid,
        progress: f64,
    ) -> Result<(), StoreError>;
}
