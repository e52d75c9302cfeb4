//! Cancellable fragment stream for one chat request.
//!
//! A [`ChatStream`] is the lazy sequence of reassembled message fragments
//! for a single streaming request. It is finite and not restartable. The
//! paired [`StreamHandle`] cancels the stream from anywhere: the transport
//! is aborted, no further fragments or errors are emitted, and calling it
//! again is a no-op.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::error::Error;

/// Lifecycle of one streaming chat request.
///
/// `Idle` and `Connecting` cover the request-setup phase inside
/// [`ChatClient::stream_chat`](crate::chat::ChatClient::stream_chat); a
/// setup failure surfaces as an `Err` return before any stream exists. A
/// constructed stream starts in `Streaming` and ends in exactly one of the
/// three terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Connecting,
    Streaming,
    Completed,
    Errored,
    Cancelled,
}

impl StreamState {
    /// Whether the stream has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Errored | Self::Cancelled)
    }
}

/// Handle for cancelling a [`ChatStream`].
///
/// Cheap to clone; safe to invoke from any task, any number of times,
/// including after the stream already completed.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    token: CancellationToken,
}

impl StreamHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, reqwest::Error>> + Send>>;

/// The lazy, cancellable sequence of fragments for one chat request.
///
/// Fragments are emitted strictly in arrival order. The sequence ends
/// normally when the server closes the connection; a mid-stream read
/// failure ends it with [`Error::StreamRead`] unless the caller cancelled,
/// in which case it ends silently.
pub struct ChatStream {
    /// Dropped on cancellation or termination, which aborts the underlying
    /// transport and releases the response body.
    inner: Option<FragmentStream>,
    token: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    state: StreamState,
}

impl ChatStream {
    pub(crate) fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = Result<String, reqwest::Error>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = Box::pin(token.clone().cancelled_owned());
        Self {
            inner: Some(Box::pin(inner)),
            token,
            cancelled,
            state: StreamState::Streaming,
        }
    }

    /// A handle that cancels this stream.
    pub fn handle(&self) -> StreamHandle {
        StreamHandle {
            token: self.token.clone(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Stream for ChatStream {
    type Item = Result<String, Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // Terminal: the sequence stays exhausted.
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };

        // Cancellation is consulted before every emission. Polling the
        // future (rather than just reading the flag) registers the waker,
        // so a cancel() from another task unblocks an in-flight read.
        if this.cancelled.as_mut().poll(cx).is_ready() {
            this.inner = None;
            this.state = StreamState::Cancelled;
            return Poll::Ready(None);
        }

        match inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(fragment))) => Poll::Ready(Some(Ok(fragment))),
            Poll::Ready(Some(Err(e))) => {
                this.inner = None;
                this.state = StreamState::Errored;
                Poll::Ready(Some(Err(Error::StreamRead(e.to_string()))))
            }
            Poll::Ready(None) => {
                this.inner = None;
                this.state = StreamState::Completed;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
