//! Server-Sent Events (SSE) stream parser.
//!
//! Handles the framing of SSE streams, yielding one reassembled payload per
//! event. Does NOT interpret the payload; callers receive the raw data
//! string.
//!
//! Framing rules:
//!   - input is split on `\n`; a single trailing `\r` is stripped so CRLF
//!     streams parse identically
//!   - `data:` lines (one optional leading space removed) accumulate into
//!     the current event, joined with `\n`
//!   - a blank line terminates the event and emits the accumulated payload
//!   - `event:` / `id:` / `retry:` fields and `:` comments are skipped
//!   - a stream that ends mid-event emits the accumulated payload as a
//!     final fragment

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::Stream;
use pin_project_lite::pin_project;
use tracing::warn;

/// Incremental UTF-8 decoder.
///
/// A network chunk may end in the middle of a multi-byte character; the
/// undecodable tail is carried into the next call. Invalid sequences are
/// replaced with U+FFFD and logged.
#[derive(Debug, Default)]
struct Utf8Carry {
    partial: Vec<u8>,
}

impl Utf8Carry {
    fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.partial);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match err.error_len() {
                        // Invalid in the middle: replace and continue.
                        Some(len) => {
                            warn!("invalid UTF-8 sequence in event stream");
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        // Incomplete tail: keep it for the next chunk.
                        None => {
                            self.partial = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush any carried bytes at end of stream. A leftover tail at this
    /// point is an incomplete sequence and decodes to U+FFFD.
    fn finish(&mut self) -> String {
        let tail = std::mem::take(&mut self.partial);
        if tail.is_empty() {
            String::new()
        } else {
            warn!("event stream ended mid-character");
            String::from_utf8_lossy(&tail).into_owned()
        }
    }
}

/// Process one complete line, updating the event accumulator and emitting
/// finished events into `pending`.
fn process_line(line: &str, event_buf: &mut String, pending: &mut VecDeque<String>) {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() {
        // End of event.
        if !event_buf.is_empty() {
            let mut payload = std::mem::take(event_buf);
            if payload.ends_with('\n') {
                payload.pop();
            }
            pending.push_back(payload);
        }
        return;
    }

    if let Some(value) = line.strip_prefix("data:") {
        event_buf.push_str(value.strip_prefix(' ').unwrap_or(value));
        event_buf.push('\n');
    } else if line.starts_with(':')
        || line.starts_with("event:")
        || line.starts_with("id:")
        || line.starts_with("retry:")
    {
        // Non-data fields and comments carry nothing we need.
    } else {
        warn!(line = %line, "unexpected line in event stream");
    }
}

pin_project! {
    /// SSE framing over a stream of byte chunks.
    ///
    /// Consumes `Bytes` and yields one `String` per event, in arrival
    /// order. Transport errors pass through unchanged.
    pub struct SseStream<S> {
        #[pin]
        byte_stream: S,
        decoder: Utf8Carry,
        line_buf: String,
        event_buf: String,
        pending: VecDeque<String>,
        done: bool,
    }
}

impl<S> SseStream<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    pub fn new(byte_stream: S) -> Self {
        Self {
            byte_stream,
            decoder: Utf8Carry::default(),
            line_buf: String::new(),
            event_buf: String::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<S> Stream for SseStream<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    type Item = Result<String, reqwest::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match this.byte_stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.decoder.decode(&chunk);
                    this.line_buf.push_str(&text);

                    // Consume complete lines, leaving a trailing partial
                    // line in the buffer for the next read.
                    while let Some(pos) = this.line_buf.find('\n') {
                        let line: String = this.line_buf.drain(..pos).collect();
                        this.line_buf.drain(..1);
                        process_line(&line, this.event_buf, this.pending);
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    *this.done = true;

                    // Flush decoder state and the residual buffer: a stream
                    // may end mid-event without a terminating blank line.
                    let tail = this.decoder.finish();
                    this.line_buf.push_str(&tail);

                    while let Some(pos) = this.line_buf.find('\n') {
                        let line: String = this.line_buf.drain(..pos).collect();
                        this.line_buf.drain(..1);
                        process_line(&line, this.event_buf, this.pending);
                    }
                    if !this.line_buf.is_empty() {
                        let line = std::mem::take(this.line_buf);
                        process_line(&line, this.event_buf, this.pending);
                    }
                    // An unterminated final event is still emitted.
                    process_line("", this.event_buf, this.pending);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
