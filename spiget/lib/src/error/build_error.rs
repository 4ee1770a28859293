//! Request construction and configuration errors.

use thiserror::Error;

use crate::method::RestMethod;

/// Errors raised before any network I/O takes place.
///
/// These usually indicate a programmer or configuration error: a base URL
/// that cannot carry relative paths, a path that does not join, a header that
/// is not valid HTTP, or a body that cannot be serialized.
#[derive(Debug, Error)]
pub enum BuildError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot have relative paths joined onto it.
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// The relative path could not be joined onto the base URL, or would
    /// leave it.
    #[error("Invalid path {path:?}: {message}")]
    InvalidPath {
        /// The relative path as given by the caller.
        path: String,
        /// Description of the problem.
        message: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name.
        name: String,
        /// Description of the problem.
        message: String,
    },

    /// A configuration value (usually from the environment) is malformed.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig {
        /// The configuration key.
        key: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// A body was given for a method that does not carry one.
    #[error("{method} requests do not carry a body")]
    BodyNotAllowed {
        /// The request method.
        method: RestMethod,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl BuildError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key,
            message: message.into(),
        }
    }
}
