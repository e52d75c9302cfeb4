//! Streaming chat client.
//!
//! [`ChatClient`] owns the request side of a conversation: it opens one
//! streaming POST per prompt, attaches the persisted session token, checks
//! the response status, and hands the body to the SSE parser. The returned
//! [`ChatStream`] is the lazy fragment sequence described in
//! [`chat::stream`](crate::chat::stream).

pub mod history;
pub mod stream;
pub mod transcript;

pub use history::HistoryEntry;
pub use stream::{ChatStream, StreamHandle, StreamState};
pub use transcript::{ChatMessage, Role, Transcript};

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::error::{Error, Result};
use crate::net::{HttpClient, SseStream};
use crate::session::{MemorySessionStore, SessionStore};

/// Header carrying the opaque conversation token, both directions.
pub const SESSION_HEADER: &str = "Session-Id";

/// Client for the ToolForge chat backend.
///
/// Cheap to clone. One client serves any number of sequential streams; the
/// caller is responsible for cancelling a previous stream before starting a
/// new one in the same conversation slot.
#[derive(Clone)]
pub struct ChatClient {
    http: HttpClient,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ChatClient {
    /// Create a client with default HTTP settings and an in-memory session
    /// store.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new builder.
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::default()
    }

    /// The session store backing this client.
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Open a streaming chat request for `prompt`.
    ///
    /// Returns the lazy fragment sequence; see [`ChatStream`]. Errors
    /// before any fragment is produced: [`Error::EmptyPrompt`],
    /// [`Error::Network`] when the request cannot be established, and
    /// [`Error::Transport`] for a non-success status (body text included).
    pub async fn stream_chat(&self, prompt: &str) -> Result<ChatStream> {
        self.open_stream(prompt, None).await
    }

    /// Like [`stream_chat`](Self::stream_chat), addressed to a named
    /// backend model.
    pub async fn stream_chat_with_model(&self, prompt: &str, model: &str) -> Result<ChatStream> {
        self.open_stream(prompt, Some(model)).await
    }

    async fn open_stream(&self, prompt: &str, model: Option<&str>) -> Result<ChatStream> {
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }

        let url = match model {
            None => format!("{}/stream/chat", self.base_url),
            Some(_) => format!("{}/stream/chat-model", self.base_url),
        };

        let mut request = self
            .http
            .inner()
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .header(ACCEPT, "text/event-stream")
            .body(prompt.to_string());

        if let Some(model) = model {
            request = request.query(&[("model", model)]);
        }

        if let Some(token) = self.session.load()? {
            request = request.header(SESSION_HEADER, token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        // First response to carry a token wins; the value is stable, so a
        // racing second observer overwriting it is harmless.
        if let Some(token) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if self.session.load()?.is_none() {
                self.session.save(token)?;
                debug!(store = self.session.name(), "session token persisted");
            }
        }

        Ok(ChatStream::new(SseStream::new(response.bytes_stream())))
    }

    /// Fetch the stored conversation history for this session.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/stream/history", self.base_url);

        let mut request = self
            .http
            .inner()
            .get(&url)
            .header(ACCEPT, "application/json");

        if let Some(token) = self.session.load()? {
            request = request.header(SESSION_HEADER, token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session.name())
            .finish()
    }
}

/// Builder for [`ChatClient`].
#[derive(Default)]
pub struct ChatClientBuilder {
    base_url: Option<String>,
    http: Option<HttpClient>,
    session: Option<Arc<dyn SessionStore>>,
}

impl ChatClientBuilder {
    /// Base URL of the backend API, e.g. `http://127.0.0.1:8080/api`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Use a custom session store. Defaults to an in-memory store.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Build the client.
    pub fn build(self) -> ChatClient {
        let base_url = self
            .base_url
            .unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        ChatClient {
            http: self.http.unwrap_or_default(),
            // A trailing slash would produce double slashes in endpoints.
            base_url: base_url.trim_end_matches('/').to_string(),
            session: self
                .session
                .unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_network() {
        let client = ChatClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.stream_chat("").await,
            Err(Error::EmptyPrompt)
        ));
        assert!(matches!(
            client.stream_chat("   \n").await,
            Err(Error::EmptyPrompt)
        ));
    }

    #[test]
    fn builder_normalizes_trailing_slash() {
        let client = ChatClient::builder()
            .base_url("http://example.test/api/")
            .build();
        assert_eq!(client.base_url, "http://example.test/api");
    }
}
