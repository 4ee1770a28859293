//! Transport-level errors.

use thiserror::Error;

/// Errors from the transport layer.
///
/// These mean the service could not be reached, or the caller gave up before
/// it answered. A service that answered with an error status is reported as a
/// [`StatusError`](super::StatusError) instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout or the context deadline.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// The request context was cancelled while the request was in flight.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns `true` for failures to reach the service (DNS, connect, TLS, I/O).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Returns `true` if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_not_transport() {
        let err = ClientError::Timeout { duration_ms: 5000 };
        assert!(err.is_timeout());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_cancelled() {
        let err = ClientError::Cancelled;
        assert!(!err.is_transport());
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "Request cancelled");
    }
}
