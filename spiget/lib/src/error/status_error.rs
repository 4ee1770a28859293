//! Non-2xx response errors.

use thiserror::Error;

use crate::response::Response;

/// The service answered, but with a non-success status code.
///
/// `api_message` is set when the body was a JSON error document such as
/// `{"error": "resource not found"}`. `message` is always populated: the API
/// message if there was one, otherwise the raw body text, otherwise the
/// canonical reason phrase.
#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct StatusError {
    /// The HTTP status code returned.
    pub status: u16,
    /// Human-readable error message.
    pub message: String,
    /// Message decoded from a structured error body, if any.
    pub api_message: Option<String>,
    /// The response envelope, for header inspection.
    pub response: Box<Response>,
}

impl StatusError {
    /// Returns `true` for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `true` for 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns `true` for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
