//! Error types for body channel operations.

use thiserror::Error;

/// Errors returned when writing to a [`BodySender`](crate::BodySender).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// The sink was explicitly closed; no further writes are accepted.
    #[error("response sink closed")]
    Closed,

    /// The peer went away: the response body was dropped by the transport.
    #[error("peer disconnected")]
    Disconnected,

    /// The channel buffer is full (only from `try_send`).
    #[error("body channel full")]
    Full,
}

impl SendError {
    /// Whether this error means the stream is over and emission should stop.
    ///
    /// A full buffer is transient; a closed sink or a vanished peer is not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Disconnected)
    }
}
