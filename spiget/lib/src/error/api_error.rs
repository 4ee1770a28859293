//! Top-level error type.

use super::{BuildError, ClientError, DecodeError, EncodingError, StatusError};
use crate::response::Response;
use thiserror::Error;

/// Top-level error type for every Spiget client operation.
///
/// Each variant corresponds to one stage of the request pipeline, so callers
/// can tell "the service rejected the call" ([`ApiError::Status`]) apart from
/// "the service could not be reached" ([`ApiError::Client`]).
///
/// ## Examples
///
/// ```rust,ignore
/// use spiget_lib::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Status(e) if e.is_not_found() => eprintln!("no such resource"),
///         ApiError::Status(e) => eprintln!("rejected: {e}"),
///         ApiError::Client(e) => eprintln!("unreachable: {e}"),
///         ApiError::Decode(e) => eprintln!("unexpected body: {e}"),
///         ApiError::Encoding(e) => eprintln!("bad options: {e}"),
///         ApiError::Build(e) => eprintln!("bad request: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Options could not be encoded into query parameters.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The request could not be constructed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Transport failures, timeouts and cancellation.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The service returned a non-success status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A successful response body did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ApiError {
    /// Returns the response envelope, when the service answered at all.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status(e) => Some(&e.response),
            Self::Decode(e) => Some(&e.response),
            _ => None,
        }
    }

    /// Returns the HTTP status code, when the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status.as_u16())
    }

    /// Returns `true` if the service could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_transport())
    }

    /// Returns `true` if the request context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(ClientError::Cancelled))
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_timeout())
    }
}
