//! # toolforge
//!
//! Client library for the ToolForge developer-utilities backend: streaming
//! chat over Server-Sent Events, session-token persistence, chat history,
//! and local JSON/hash utilities.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use toolforge::{ChatClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::new("http://127.0.0.1:8080/api");
//!
//!     let mut stream = client.stream_chat("Explain SSE framing").await?;
//!     while let Some(fragment) = stream.next().await {
//!         print!("{}", fragment?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! `stream.handle()` returns a [`StreamHandle`] whose `cancel()` stops the
//! stream from any task: the connection is aborted and the sequence ends
//! without an error.

pub mod account;
pub mod chat;
pub mod config;
pub mod error;
pub mod net;
pub mod session;
pub mod tools;

// Re-exports for ergonomic usage
pub use chat::{ChatClient, ChatClientBuilder, ChatMessage, ChatStream, HistoryEntry, Role,
    StreamHandle, StreamState, Transcript};
pub use config::Config;
pub use error::{Error, Result};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
