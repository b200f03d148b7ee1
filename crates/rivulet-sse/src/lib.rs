//! Server-Sent Events support for Rivulet.
//!
//! This crate covers the wire side of SSE:
//!
//! - [`SseEvent`]: structured records with `event`, `id`, `data`, and
//!   `retry` fields, serialized to the event-stream format
//! - [`SseComment`]: comment lines, used as keep-alive pings
//! - [`sse_response`]: a streaming 200 response with the canonical SSE
//!   headers
//! - [`STREAM_PREAMBLE`]: the leading blank line that opens a stream
//!
//! Delivery is handled elsewhere: a handler opens a streaming session and
//! writes formatted records to its sink on each tick.
//!
//! ## Wire format
//!
//! ```text
//! event: message
//! id: 1
//! data: message 1
//!
//! ```
//!
//! A blank line terminates each record; comments start with `:`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod event;
mod response;

pub use error::{SseError, SseResult};
pub use event::{SseComment, SseEvent, SseItem, STREAM_PREAMBLE};
pub use response::{sse_headers, sse_response};
