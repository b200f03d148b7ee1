//! Error types for SSE operations.

use thiserror::Error;

/// Result type for SSE operations.
pub type SseResult<T> = Result<T, SseError>;

/// Errors that can occur while building SSE records.
#[derive(Debug, Error)]
pub enum SseError {
    /// Failed to serialize event data.
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
}

impl SseError {
    /// Creates a serialization failure.
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SseError::serialization_failed("bad payload");
        assert!(err.to_string().contains("bad payload"));
    }
}
