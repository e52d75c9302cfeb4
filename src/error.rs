//! Unified error type for the toolforge client.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the chat client, session stores, and API calls.
///
/// Malformed SSE lines are deliberately NOT represented here: they are
/// logged and skipped, and the stream continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status. Carries the status
    /// code and the response body text.
    #[error("transport error ({status}): {body}")]
    Transport { status: u16, body: String },

    /// The request could not be established (DNS, connect, TLS, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The stream was interrupted after a successful start. Never produced
    /// when the interruption was caused by caller cancellation.
    #[error("stream interrupted: {0}")]
    StreamRead(String),

    /// Session token storage failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// A prompt must be non-empty.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// JSON could not be parsed or decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
