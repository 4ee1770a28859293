//! Errors for 2xx responses whose body did not decode.

use thiserror::Error;

use super::ValidationError;
use crate::response::Response;

/// A successful response whose body did not match the expected type.
///
/// The envelope is kept so status, pagination and rate-limit metadata remain
/// available to the caller.
#[derive(Debug, Error)]
#[error("failed to decode HTTP {} response from {}: {source}", .response.status.as_u16(), .response.url)]
pub struct DecodeError {
    /// The underlying parse failure.
    #[source]
    pub source: ValidationError,
    /// The response envelope.
    pub response: Box<Response>,
}
