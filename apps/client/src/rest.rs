//! HTTP implementation of the remote store.
//!
//! Talks to a Supabase-style API: GoTrue endpoints under `/auth/v1` and
//! PostgREST tables under `/rest/v1`. Table and column names follow the
//! remote schema (`Decks`, `Cards`, `user_id`, `deckId`).

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizcards_core::types::{Card, Category, Deck};

use crate::error::StoreError;
use crate::store::{NewCard, NewDeck, RemoteStore};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Serialize)]
struct UserProfileRow<'a> {
    id: Uuid,
    email: &'a str,
    username: &'a str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct DeckPatch<'a> {
    name: &'a str,
    category: &'a Category,
}

#[derive(Debug, Serialize)]
struct CardPatch<'a> {
    #[serde(rename = "deckId")]
    deck_id: Uuid,
    question: &'a str,
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct AccuracyUpsert {
    user_id: Uuid,
    accuracy: f64,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AccuracyInsert {
    user_id: Uuid,
    accuracy: f64,
}

#[derive(Debug, Serialize)]
struct MostReviewedUpsert<'a> {
    user_id: Uuid,
    deck_name: &'a str,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ProgressInsert {
    user_id: Uuid,
    deck_id: String,
    progress: f64,
}

/// Remote store over HTTP.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Mutex<Option<String>>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: Mutex::new(None),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Bearer for table requests: the session token once signed in, the
    /// anon key before that.
    fn bearer(&self) -> String {
        self.access_token
            .lock()
            .expect("token lock")
            .clone()
            .unwrap_or_else(|| self.api_key.clone())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
    }

    async fn check(resp: Response) -> Result<Response, StoreError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        Err(StoreError::Remote { status, message })
    }

    async fn send(builder: RequestBuilder) -> Result<Response, StoreError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check(resp).await
    }
}

impl RemoteStore for RestStore {
    async fn auth_sign_up(&self, email: &str, password: &str) -> Result<Uuid, StoreError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            if message.contains("already registered") {
                return Err(StoreError::AlreadyRegistered(email.to_string()));
            }
            return Err(StoreError::Remote { status, message });
        }

        let body: SignUpResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let user = body
            .user
            .ok_or_else(|| StoreError::Parse("no user returned after sign-up".to_string()))?;
        Ok(user.id)
    }

    async fn auth_sign_in(&self, email: &str, password: &str) -> Result<Uuid, StoreError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            if message.contains("not confirmed") {
                return Err(StoreError::EmailNotConfirmed);
            }
            if status == 400 {
                return Err(StoreError::InvalidCredentials);
            }
            return Err(StoreError::Remote { status, message });
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        *self.access_token.lock().expect("token lock") = Some(body.access_token);
        Ok(body.user.id)
    }

    async fn auth_sign_out(&self) -> Result<(), StoreError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let result = Self::send(self.request(Method::POST, &url)).await;
        // The local token is gone either way.
        *self.access_token.lock().expect("token lock") = None;
        result.map(|_| ())
    }

    async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now();
        let row = UserProfileRow {
            id: user_id,
            email,
            username,
            created_at: now,
            updated_at: now,
        };
        Self::send(
            self.request(Method::POST, &self.table_url("Users"))
                .header("Prefer", "resolution=merge-duplicates")
                .json(&[row]),
        )
        .await
        .map(|_| ())
    }

    async fn list_decks(&self, user_id: Uuid) -> Result<Vec<Deck>, StoreError> {
        let resp = Self::send(
            self.request(Method::GET, &self.table_url("Decks"))
                .query(&[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{user_id}")),
                    ("order", "created_at.asc".to_string()),
                ]),
        )
        .await?;
        resp.json().await.map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn list_cards(&self, deck_ids: &[Uuid]) -> Result<Vec<Card>, StoreError> {
        if deck_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = deck_ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let resp = Self::send(
            self.request(Method::GET, &self.table_url("Cards")).query(&[
                ("select", "*".to_string()),
                ("deckId", format!("in.({ids})")),
            ]),
        )
        .await?;
        resp.json().await.map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn insert_deck(&self, deck: &NewDeck) -> Result<Deck, StoreError> {
        let resp = Self::send(
            self.request(Method::POST, &self.table_url("Decks"))
                .header("Prefer", "return=representation")
                .json(&[deck]),
        )
        .await?;
        let mut rows: Vec<Deck> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| StoreError::Parse("empty insert response".to_string()))
    }

    async fn update_deck(
        &self,
        deck_id: Uuid,
        name: &str,
        category: &Category,
    ) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::PATCH, &self.table_url("Decks"))
                .query(&[("id", format!("eq.{deck_id}"))])
                .json(&DeckPatch { name, category }),
        )
        .await
        .map(|_| ())
    }

    async fn delete_deck(&self, deck_id: Uuid) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::DELETE, &self.table_url("Decks"))
                .query(&[("id", format!("eq.{deck_id}"))]),
        )
        .await
        .map(|_| ())
    }

    async fn insert_card(&self, card: &NewCard) -> Result<Card, StoreError> {
        let resp = Self::send(
            self.request(Method::POST, &self.table_url("Cards"))
                .header("Prefer", "return=representation")
                .json(&[card]),
        )
        .await?;
        let mut rows: Vec<Card> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| StoreError::Parse("empty insert response".to_string()))
    }

    async fn update_card(
        &self,
        card_id: Uuid,
        deck_id: Uuid,
        question: &str,
        answer: &str,
    ) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::PATCH, &self.table_url("Cards"))
                .query(&[("id", format!("eq.{card_id}"))])
                .json(&CardPatch {
                    deck_id,
                    question,
                    answer,
                }),
        )
        .await
        .map(|_| ())
    }

    async fn delete_card(&self, card_id: Uuid) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::DELETE, &self.table_url("Cards"))
                .query(&[("id", format!("eq.{card_id}"))]),
        )
        .await
        .map(|_| ())
    }

    async fn save_accuracy(&self, user_id: Uuid, accuracy: f64) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::POST, &self.table_url("Accuracy"))
                .header("Prefer", "resolution=merge-duplicates")
                .json(&[AccuracyUpsert {
                    user_id,
                    accuracy,
                    updated_at: Utc::now(),
                }]),
        )
        .await
        .map(|_| ())
    }

    async fn save_most_reviewed_deck(
        &self,
        user_id: Uuid,
        deck_name: &str,
    ) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::POST, &self.table_url("MostReviewedDeck"))
                .header("Prefer", "resolution=merge-duplicates")
                .json(&[MostReviewedUpsert {
                    user_id,
                    deck_name,
                    updated_at: Utc::now(),
                }]),
        )
        .await
        .map(|_| ())
    }

    async fn append_accuracy_snapshot(
        &self,
        user_id: Uuid,
        accuracy: f64,
    ) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::POST, &self.table_url("Accuracy"))
                .json(&[AccuracyInsert { user_id, accuracy }]),
        )
        .await
        .map(|_| ())
    }

    async fn append_progress_snapshot(
        &self,
        user_id: Uuid,
        deck_id: Uuid,
        progress: f64,
    ) -> Result<(), StoreError> {
        Self::send(
            self.request(Method::POST, &self.table_url("DeckProgress"))
                .json(&[ProgressInsert {
                    user_id,
                    deck_id: deck_id.to_string(),
                    progress,
                }]),
        )
        .await
        .map(|_| ())
    }
}
