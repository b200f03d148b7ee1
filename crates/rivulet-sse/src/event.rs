//! SSE record types and wire formatting.

use std::time::Duration;

use serde::Serialize;

use crate::error::{SseError, SseResult};

/// Leading blank line written before the first event.
///
/// Some SSE client implementations require it to begin parsing the stream.
pub const STREAM_PREAMBLE: &str = "\n";

/// A Server-Sent Event.
///
/// Fields are serialized in the order `event`, `id`, `data`, `retry`, each
/// on its own line, with a blank line terminating the record:
///
/// ```text
/// event: message
/// id: 1
/// data: message 1
///
/// ```
///
/// # Example
///
/// ```rust
/// use rivulet_sse::SseEvent;
///
/// let event = SseEvent::new("message 1").event("message").id("1");
/// assert_eq!(
///     event.to_sse_string(),
///     "event: message\nid: 1\ndata: message 1\n\n",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    event: Option<String>,
    id: Option<String>,
    data: String,
    retry: Option<Duration>,
}

impl SseEvent {
    /// Creates a new event with the given data.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            event: None,
            id: None,
            data: data.into(),
            retry: None,
        }
    }

    /// Creates an event whose data is the JSON serialization of `value`.
    pub fn json<T: Serialize>(value: &T) -> SseResult<Self> {
        let data = serde_json::to_string(value)
            .map_err(|e| SseError::serialization_failed(e.to_string()))?;
        Ok(Self::new(data))
    }

    /// Sets the event type.
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Sets the event ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the reconnection interval hint.
    #[must_use]
    pub fn retry(mut self, retry: Duration) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Returns the event type, if set.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Returns the event ID, if set.
    #[must_use]
    pub fn id_value(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the event data.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Returns the reconnection interval hint, if set.
    #[must_use]
    pub fn retry_interval(&self) -> Option<Duration> {
        self.retry
    }

    /// Formats the event as an SSE wire record.
    ///
    /// Multi-line data produces one `data:` line per payload line. The
    /// record always ends with a blank line.
    #[must_use]
    pub fn to_sse_string(&self) -> String {
        let mut result = String::new();

        if let Some(event) = &self.event {
            result.push_str("event: ");
            result.push_str(event);
            result.push('\n');
        }

        if let Some(id) = &self.id {
            result.push_str("id: ");
            result.push_str(id);
            result.push('\n');
        }

        for line in self.data.lines() {
            result.push_str("data: ");
            result.push_str(line);
            result.push('\n');
        }

        if let Some(retry) = &self.retry {
            result.push_str("retry: ");
            result.push_str(&retry.as_millis().to_string());
            result.push('\n');
        }

        result.push('\n');
        result
    }

    /// Converts the record to bytes for writing to the sink.
    #[must_use]
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_sse_string())
    }
}

impl Default for SseEvent {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<String> for SseEvent {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for SseEvent {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

/// A comment line in the SSE stream.
///
/// Comments start with a colon and are ignored by clients; they serve as
/// keep-alive pings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseComment(String);

impl SseComment {
    /// Creates a new comment.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates an empty keep-alive comment.
    #[must_use]
    pub fn keepalive() -> Self {
        Self::new("")
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Formats the comment as an SSE line.
    #[must_use]
    pub fn to_sse_string(&self) -> String {
        format!(": {}\n", self.0)
    }

    /// Converts the comment to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_sse_string())
    }
}

impl Default for SseComment {
    fn default() -> Self {
        Self::keepalive()
    }
}

/// Anything that can be written to an SSE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseItem {
    /// An event record.
    Event(SseEvent),
    /// A comment line.
    Comment(SseComment),
}

impl SseItem {
    /// Whether this item is an event.
    #[must_use]
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }

    /// Whether this item is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Formats the item for the wire.
    #[must_use]
    pub fn to_sse_string(&self) -> String {
        match self {
            Self::Event(e) => e.to_sse_string(),
            Self::Comment(c) => c.to_sse_string(),
        }
    }

    /// Converts the item to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_sse_string())
    }
}

impl From<SseEvent> for SseItem {
    fn from(event: SseEvent) -> Self {
        Self::Event(event)
    }
}

impl From<SseComment> for SseItem {
    fn from(comment: SseComment) -> Self {
        Self::Comment(comment)
    }
}
