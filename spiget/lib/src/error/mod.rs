//! Layered error types for the Spiget client.
//!
//! Each stage of the request pipeline has its own error type, aggregated by
//! [`ApiError`]:
//! - [`EncodingError`] - an options value could not be turned into query parameters
//! - [`BuildError`] - malformed base URL, path, header, or unserializable body
//! - [`ClientError`] - transport failures, timeouts and cancellation
//! - [`StatusError`] - the service answered with a non-2xx status
//! - [`DecodeError`] - a 2xx body did not match the expected shape
//!
//! [`StatusError`] and [`DecodeError`] carry the [`Response`](crate::Response)
//! envelope so callers can still inspect status and headers.

mod api_error;
mod build_error;
mod client_error;
mod decode_error;
mod encoding_error;
mod status_error;
mod validation_error;

pub use api_error::ApiError;
pub use build_error::BuildError;
pub use client_error::ClientError;
pub use decode_error::DecodeError;
pub use encoding_error::EncodingError;
pub use status_error::StatusError;
pub use validation_error::ValidationError;
