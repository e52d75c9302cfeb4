//! Networking primitives: HTTP client configuration and SSE framing.

pub mod client;
pub mod sse;

pub use client::HttpClient;
pub use sse::SseStream;
