//! Server-sent event decoding.
//!
//! Turns a `text/event-stream` body into [`ServerEvent`]s. Lines may end in
//! `\n`, `\r` or `\r\n` and may be split across chunks arbitrarily.

use std::collections::VecDeque;
use std::fmt::Display;

use futures::{Stream, StreamExt};
use wardrobe_application::{EventStream, TransportError};
use tracing::warn;
use wardrobe_domain::ServerEvent;

/// Longest line kept in memory; longer lines are dropped whole.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Incremental parser for the event-stream format.
#[derive(Debug)]
pub struct EventStreamParser {
    buffer: Vec<u8>,
    max_line: usize,
    after_cr: bool,
    overflowed: bool,
    data: String,
    event: Option<String>,
    last_id: Option<String>,
    retry_ms: Option<u64>,
}

impl Default for EventStreamParser {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl EventStreamParser {
    /// Creates an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that drops lines longer than `max_line` bytes.
    #[must_use]
    pub const fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_line,
            after_cr: false,
            overflowed: false,
            data: String::new(),
            event: None,
            last_id: None,
            retry_ms: None,
        }
    }

    /// Feeds a chunk and returns the events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            // LF of a CRLF pair, possibly in the next chunk
            if std::mem::take(&mut self.after_cr) && byte == b'\n' {
                continue;
            }

            match byte {
                b'\r' | b'\n' => {
                    self.after_cr = byte == b'\r';
                    if std::mem::take(&mut self.overflowed) {
                        continue;
                    }
                    let line = String::from_utf8_lossy(&self.buffer).into_owned();
                    self.buffer.clear();
                    if let Some(event) = self.process_line(&line) {
                        events.push(event);
                    }
                }
                _ if self.overflowed => {}
                _ if self.buffer.len() >= self.max_line => {
                    warn!(max = self.max_line, "Event stream line too long, dropping it");
                    self.buffer.clear();
                    self.overflowed = true;
                }
                _ => self.buffer.push(byte),
            }
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<ServerEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            "retry" => {
                if let Ok(ms) = value.parse() {
                    self.retry_ms = Some(ms);
                }
            }
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<ServerEvent> {
        let event = self.event.take();
        let retry_ms = self.retry_ms.take();
        if self.data.is_empty() {
            return None;
        }

        let mut data = std::mem::take(&mut self.data);
        data.pop();
        Some(ServerEvent {
            id: self.last_id.clone(),
            event,
            data,
            retry_ms,
        })
    }
}

/// Decodes a byte stream into an [`EventStream`].
///
/// A read error is yielded once as [`TransportError::ConnectionFailed`];
/// an event left incomplete when the body ends is dropped.
pub fn decode_event_stream<B, C, E>(bytes: B) -> EventStream
where
    B: Stream<Item = Result<C, E>> + Send + 'static,
    C: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = (Box::pin(bytes), EventStreamParser::new(), VecDeque::new());

    futures::stream::unfold(state, |(mut bytes, mut parser, mut pending)| async move {
        loop {
            if let Some(event) = pending.pop_front() {
                return Some((Ok(event), (bytes, parser, pending)));
            }
            match bytes.next().await {
                Some(Ok(chunk)) => pending.extend(parser.feed(chunk.as_ref())),
                Some(Err(e)) => {
                    let error = TransportError::ConnectionFailed(format!("Stream read failed: {e}"));
                    return Some((Err(error), (bytes, parser, pending)));
                }
                None => return None,
            }
        }
    })
    .boxed()
}

/// Decodes the body of an event-stream response.
///
/// Read errors are reported without the request URL, which carries the
/// access token.
pub fn event_stream(response: reqwest::Response) -> EventStream {
    decode_event_stream(
        response
            .bytes_stream()
            .map(|chunk| chunk.map_err(reqwest::Error::without_url)),
    )
}
