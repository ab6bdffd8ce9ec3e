//! Shared test context: an in-memory remote store.

// Each test binary compiles its own copy; not every helper is used in both.
#![allow(dead_code)]

pub mod fixtures;

use std::sync::Mutex;

use uuid::Uuid;

use quizcards_client::error::StoreError;
use quizcards_client::store::{NewCard, NewDeck, RemoteStore};
use quizcards_core::types::{Card, Category, Deck};

/// One registered auth account.
#[derive(Debug, Clone)]
pub struct AuthRecord {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub confirmed: bool,
}

/// Observable state of the mock remote store.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    pub auth_users: Vec<AuthRecord>,
    pub profiles: Vec<(Uuid, String, String)>,
    pub decks: Vec<Deck>,
    pub cards: Vec<Card>,
    pub saved_accuracy: Vec<f64>,
    pub saved_most_reviewed: Vec<String>,
    pub accuracy_snapshots: Vec<f64>,
    pub progress_snapshots: Vec<(Uuid, f64)>,
    pub sign_outs: usize,
    // Failure injection
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_profile_upsert: bool,
    pub fail_snapshots: bool,
    pub fail_sign_out: bool,
}

/// In-memory `RemoteStore` for tests.
#[derive(Debug, Default)]
pub struct MockStore {
    state: Mutex<MockState>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account, returning its id.
    pub fn with_user(&self, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.mutate(|state| {
            state.auth_users.push(AuthRecord {
                id,
                email: email.to_string(),
                password: password.to_string(),
                confirmed: true,
            });
        });
        id
    }

    pub fn mutate<F: FnOnce(&mut MockState)>(&self, f: F) {
        f(&mut self.state.lock().expect("mock state lock"));
    }

    pub fn snapshot(&self) -> MockState {
        self.state.lock().expect("mock state lock").clone()
    }

    fn injected() -> StoreError {
        StoreError::Network("injected failure".to_string())
    }
}

impl RemoteStore for MockStore {
    async fn auth_sign_up(&self, email: &str, password: &str) -> Result<Uuid, StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.auth_users.iter().any(|u| u.email == email) {
            return Err(StoreError::AlreadyRegistered(email.to_string()));
        }
        let id = Uuid::new_v4();
        state.auth_users.push(AuthRecord {
            id,
            email: email.to_string(),
            password: password.to_string(),
            confirmed: true,
        });
        Ok(id)
    }

    async fn auth_sign_in(&self, email: &str, password: &str) -> Result<Uuid, StoreError> {
        let state = self.state.lock().expect("mock state lock");
        match state
            .auth_users
            .iter()
            .find(|u| u.email == email && u.password == password)
        {
            Some(user) if !user.confirmed => Err(StoreError::EmailNotConfirmed),
            Some(user) => Ok(user.id),
            None => Err(StoreError::InvalidCredentials),
        }
    }

    async fn auth_sign_out(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_sign_out {
            return Err(Self::injected());
        }
        state.sign_outs += 1;
        Ok(())
    }

    async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_profile_upsert {
            return Err(Self::injected());
        }
        state.profiles.retain(|(id, _, _)| *id != user_id);
        state
            .profiles
            .push((user_id, email.to_string(), username.to_string()));
        Ok(())
    }

    async fn list_decks(&self, user_id: Uuid) -> Result<Vec<Deck>, StoreError> {
        let state = self.state.lock().expect("mock state lock");
        if state.fail_reads {
            return Err(Self::injected());
        }
        Ok(state
            .decks
            .iter()
            .filter(|deck| deck.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_cards(&self, deck_ids: &[Uuid]) -> Result<Vec<Card>, StoreError> {
        let state = self.state.lock().expect("mock state lock");
        if state.fail_reads {
            return Err(Self::injected());
        }
        Ok(state
            .cards
            .iter()
            .filter(|card| deck_ids.contains(&card.deck_id))
            .cloned()
            .collect())
    }

    async fn insert_deck(&self, deck: &NewDeck) -> Result<Deck, StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        let row = Deck {
            id: Uuid::new_v4(),
            name: deck.name.clone(),
            category: deck.category.clone(),
            owner_id: deck.owner_id,
            created_at: deck.created_at,
        };
        state.decks.push(row.clone());
        Ok(row)
    }

    async fn update_deck(
        &self,
        deck_id: Uuid,
        name: &str,
        category: &Category,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        if let Some(deck) = state.decks.iter_mut().find(|deck| deck.id == deck_id) {
            deck.name = name.to_string();
            deck.category = category.clone();
        }
        Ok(())
    }

    async fn delete_deck(&self, deck_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        // No cascade: cards referencing the deck stay behind.
        state.decks.retain(|deck| deck.id != deck_id);
        Ok(())
    }

    async fn insert_card(&self, card: &NewCard) -> Result<Card, StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        let row = Card {
            id: Uuid::new_v4(),
            deck_id: card.deck_id,
            question: card.question.clone(),
            answer: card.answer.clone(),
            is_correct: None,
        };
        state.cards.push(row.clone());
        Ok(row)
    }

    async fn update_card(
        &self,
        card_id: Uuid,
        deck_id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        if let Some(card) = state.cards.iter_mut().find(|card| card.id == card_id) {
            card.deck_id = deck_id;
            card.question = question.to_string();
            card.answer = answer.to_string();
        }
        Ok(())
    }

    async fn delete_card(&self, card_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_writes {
            return Err(Self::injected());
        }
        state.cards.retain(|card| card.id != card_id);
        Ok(())
    }

    async fn save_accuracy(&self, _user_id: Uuid, accuracy: f64) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_snapshots {
            return Err(Self::injected());
        }
        state.saved_accuracy.push(accuracy);
        Ok(())
    }

    async fn save_most_reviewed_deck(
        &self,
        _user_id: Uuid,
        deck_name: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_snapshots {
            return Err(Self::injected());
        }
        state.saved_most_reviewed.push(deck_name.to_string());
        Ok(())
    }

    async fn append_accuracy_snapshot(
        &self,
        _user_id: Uuid,
        accuracy: f64,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_snapshots {
            return Err(Self::injected());
        }
        state.accuracy_snapshots.push(accuracy);
        Ok(())
    }

    async fn append_progress_snapshot(
        &self,
        _user_id: Uuid,
        deck_id: Uuid,
        progress: f64,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("mock state lock");
        if state.fail_snapshots {
            return Err(Self::injected());
        }
        state.progress_snapshots.push((deck_id, progress));
        Ok(())
    }
}
