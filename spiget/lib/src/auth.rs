//! Optional request authentication.
//!
//! The public Spiget API is anonymous. Authentication exists for mirrors and
//! caching proxies that sit in front of it and expect a credential.

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use crate::error::BuildError;

/// How a configured API key is attached to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiAuthMethod {
    /// No credential is sent.
    #[default]
    None,
    /// `Authorization: Bearer <key>`.
    BearerToken,
    /// The key is sent verbatim in the named header.
    ApiKey(String),
}

impl ApiAuthMethod {
    /// Returns the header carrying `api_key`, or `None` for [`ApiAuthMethod::None`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or key is not valid in an HTTP header.
    pub fn header(&self, api_key: &str) -> Result<Option<(HeaderName, HeaderValue)>, BuildError> {
        let (name, value) = match self {
            Self::None => return Ok(None),
            Self::BearerToken => (AUTHORIZATION, format!("Bearer {api_key}")),
            Self::ApiKey(header_name) => {
                let name = HeaderName::try_from(header_name.as_str())
                    .map_err(|e| BuildError::invalid_header(header_name.as_str(), e))?;
                (name, api_key.to_string())
            }
        };

        let mut value = HeaderValue::try_from(value)
            .map_err(|e| BuildError::invalid_header(name.as_str(), e))?;
        value.set_sensitive(true);
        Ok(Some((name, value)))
    }
}
