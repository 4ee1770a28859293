//! Response format trait and implementations.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response body parsing strategies.
///
/// The format type doubles as the "destination" of a call: [`JsonFormat<T>`]
/// decodes into `T`, [`Discard`] is used where only success matters.
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send;

    /// Parse a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Media type sent as `Accept` when decoding with this format.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
///
/// An empty (or whitespace-only) body decodes to `T::default()` rather than
/// failing, matching endpoints that answer 2xx with no content.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Default + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// Ignores the body. Used by download and delete endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ResponseFormat for Discard {
    type Output = ();

    async fn parse(_body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn content_type() -> &'static str {
        "*/*"
    }
}
