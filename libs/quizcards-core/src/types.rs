//! Core types for the quizcards application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Fixed deck category tags offered by the deck picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTag {
    Language,
    Science,
    Math,
    History,
    Geography,
}

impl CategoryTag {
    /// Get the tag as the string stored remotely.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "Language",
            Self::Science => "Science",
            Self::Math => "Math",
            Self::History => "History",
            Self::Geography => "Geography",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Language" => Some(Self::Language),
            "Science" => Some(Self::Science),
            "Math" => Some(Self::Math),
            "History" => Some(Self::History),
            "Geography" => Some(Self::Geography),
            _ => None,
        }
    }
}

/// Deck category: one of the fixed tags or free text supplied by the user.
///
/// Stored remotely as a plain string; strings that match no known tag
/// come back as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Preset(CategoryTag),
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Preset(tag) => tag.as_str(),
            Self::Custom(text) => text,
        }
    }

    pub fn parse(s: &str) -> Self {
        match CategoryTag::from_str(s) {
            Some(tag) => Self::Preset(tag),
            None => Self::Custom(s.to_string()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse(&s))
    }
}

/// A named, categorized collection of cards owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    #[serde(rename = "user_id")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A question/answer pair belonging to a deck.
///
/// `is_correct` is the outcome of the most recent quiz attempt on this
/// card. It is local-only state: never sent to or read from the remote
/// store, which only keeps aggregate snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    #[serde(rename = "deckId")]
    pub deck_id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(skip)]
    pub is_correct: Option<bool>,
}
