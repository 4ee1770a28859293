//! Request descriptors and the request builder.

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::BuildError;
use crate::method::RestMethod;

const JSON: &str = "application/json";

/// A fully-resolved request, built fresh for each call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Absolute target URL, query included.
    pub url: Url,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Serialized JSON body, if any.
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Builds a request without a body.
    ///
    /// ## Errors
    ///
    /// Returns an error if `path` does not resolve under the base URL or a
    /// configured header is invalid.
    pub fn build(config: &ClientConfig, method: RestMethod, path: &str) -> Result<Self, BuildError> {
        Self::assemble(config, method, path, None)
    }

    /// Builds a request with `body` serialized as JSON.
    ///
    /// ## Errors
    ///
    /// Returns an error if `method` does not carry a body or the body cannot
    /// be serialized, in addition to the conditions of [`build`](Self::build).
    pub fn build_with_body<B: Serialize + ?Sized>(
        config: &ClientConfig,
        method: RestMethod,
        path: &str,
        body: &B,
    ) -> Result<Self, BuildError> {
        if !method.has_body() {
            return Err(BuildError::BodyNotAllowed { method });
        }
        let body = serde_json::to_vec(body).map_err(BuildError::Serialize)?;
        Self::assemble(config, method, path, Some(Bytes::from(body)))
    }

    fn assemble(
        config: &ClientConfig,
        method: RestMethod,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Self, BuildError> {
        let url = resolve_url(config.base(), path)?;

        let mut headers = config.headers().clone();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        let agent = HeaderValue::try_from(config.agent())
            .map_err(|e| BuildError::invalid_header(USER_AGENT.as_str(), e))?;
        headers.insert(USER_AGENT, agent);

        if let Some((auth, api_key)) = config.authentication() {
            if let Some((name, value)) = auth.header(api_key)? {
                headers.insert(name, value);
            }
        }

        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }

        debug!(%method, %url, has_body = body.is_some(), "built request");

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Joins `path` onto `base`, ignoring leading `/` so `"/x"` and `"x"` resolve
/// to the same URL. The result must stay under `base`.
pub(crate) fn resolve_url(base: &Url, path: &str) -> Result<Url, BuildError> {
    let invalid = |message: String| BuildError::InvalidPath {
        path: path.to_string(),
        message,
    };

    let relative = path.trim_start_matches('/');
    let url = base.join(relative).map_err(|e| invalid(e.to_string()))?;

    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(invalid(format!("resolves outside of {base}")));
    }
    Ok(url)
}
