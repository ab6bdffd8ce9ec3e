//! Client core for the quizcards study application.
//!
//! Owns the signed-in session: the locally cached deck and card
//! collections, the derived statistics over them, and the quiz driver.
//! All remote access goes through the [`store::RemoteStore`] trait;
//! [`rest::RestStore`] is the HTTP implementation.

pub mod error;
pub mod rest;
pub mod session;
pub mod store;

pub use error::{Result, SessionError, StoreError};
pub use rest::RestStore;
pub use session::{QuizOutcome, Session, UNKNOWN_DECK};
pub use store::{NewCard, NewDeck, RemoteStore};
