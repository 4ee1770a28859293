//! Response body parsing errors.

use thiserror::Error;

/// Errors while parsing a response body into the expected type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ValidationError {
    /// Returns `true` if the body was valid JSON of the wrong shape, as opposed
    /// to malformed JSON.
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            Self::JsonParse(e) => e.is_data(),
        }
    }
}
