//! Client configuration.
//!
//! [`ClientConfig`] is built once and handed to
//! [`SpigetClient::new`](crate::SpigetClient::new). There is no global default
//! client; a caller that wants environment-driven settings asks for them with
//! [`ClientConfig::from_env`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::auth::ApiAuthMethod;
use crate::error::BuildError;

/// Base URL of the public Spiget API.
pub const DEFAULT_BASE_URL: &str = "https://api.spiget.org/v2/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "SPIGET_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "SPIGET_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "SPIGET_USER_AGENT";
const ENV_API_KEY: &str = "SPIGET_API_KEY";

/// Immutable settings shared by every request a client issues.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use spiget_lib::ClientConfig;
///
/// let config = ClientConfig::default()
///     .base_url("http://localhost:8080/v2")?
///     .timeout(Duration::from_secs(5))
///     .user_agent("my-plugin-manager/1.0");
///
/// assert_eq!(config.base().as_str(), "http://localhost:8080/v2/");
/// # Ok::<(), spiget_lib::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
    auth: Option<(ApiAuthMethod, String)>,
    default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            auth: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Reads settings from the process environment.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `SPIGET_BASE_URL` | API base URL |
    /// | `SPIGET_TIMEOUT_SECS` | transport timeout in whole seconds |
    /// | `SPIGET_USER_AGENT` | `User-Agent` header |
    /// | `SPIGET_API_KEY` | sent as a bearer token |
    ///
    /// ## Errors
    ///
    /// Returns an error if a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, BuildError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading values through `lookup`.
    ///
    /// ## Errors
    ///
    /// Returns an error if a value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BuildError> {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_BASE_URL) {
            config = config.base_url(&base)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BuildError::invalid_config(ENV_TIMEOUT_SECS, format!("expected whole seconds, got {secs:?}"))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config = config.user_agent(agent);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            config = config.auth(ApiAuthMethod::BearerToken, key);
        }

        Ok(config)
    }

    /// Sets the API base URL.
    ///
    /// A trailing `/` is added when missing, so `https://host/v2` and
    /// `https://host/v2/` behave the same.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL does not parse, is not http(s), or carries
    /// a query or fragment.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, BuildError> {
        self.base_url = normalize_base_url(Url::parse(base_url.as_ref())?)?;
        Ok(self)
    }

    /// Sets the transport timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the authentication method and API key.
    pub fn auth(mut self, method: ApiAuthMethod, api_key: impl Into<String>) -> Self {
        self.auth = Some((method, api_key.into()));
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, BuildError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| BuildError::invalid_header(name.as_ref(), e))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| BuildError::invalid_header(name.as_str(), e))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Returns the normalized base URL.
    pub fn base(&self) -> &Url {
        &self.base_url
    }

    /// Returns the transport timeout.
    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` header value.
    pub fn agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the configured authentication, if any.
    pub fn authentication(&self) -> Option<(&ApiAuthMethod, &str)> {
        self.auth.as_ref().map(|(method, key)| (method, key.as_str()))
    }

    /// Returns the headers added to every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

fn default_user_agent() -> String {
    format!("spiget-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Checks that `url` can carry relative paths and makes its path end in `/`.
fn normalize_base_url(mut url: Url) -> Result<Url, BuildError> {
    let invalid = |message: &str| BuildError::InvalidBaseUrl {
        url: url.to_string(),
        message: message.to_string(),
    };

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an absolute http(s) URL"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
