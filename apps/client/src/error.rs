//! Error types for the client.

use thiserror::Error;

/// Failures raised by a remote store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email not confirmed")]
    EmailNotConfirmed,

    #[error("an account already exists for {0}")]
    AlreadyRegistered(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("remote error: {status} - {message}")]
    Remote { status: u16, message: String },

    #[error("response parse error: {0}")]
    Parse(String),
}

/// Failures surfaced by session operations.
///
/// Each variant is local to the operation that raised it. Snapshot
/// persistence failures never appear here: they are logged and swallowed
/// because the in-memory value is already up to date.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("authentication failed: {0}")]
    Auth(#[source] StoreError),

    #[error("remote write failed: {0}")]
    Write(#[source] StoreError),

    #[error("remote read failed: {0}")]
    Read(#[source] StoreError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
