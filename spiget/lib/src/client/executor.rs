//! Request execution with tracing instrumentation.
//!
//! This module provides [`SpigetClient`], which owns the configuration and the
//! transport and drives every call through build, send, classify and decode.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, debug, instrument, warn};

use super::{ApiRequest, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{ApiError, BuildError, DecodeError, StatusError};
use crate::method::RestMethod;
use crate::options::{QueryOptions, add_options};
use crate::response::{ApiResponse, Discard, JsonFormat, Response, ResponseFormat};

/// Longest slice of a non-JSON error body kept as the error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Async client for the Spiget API.
///
/// Holds an immutable [`ClientConfig`] and a [`Transport`]. Cloning is cheap
/// and clones share the underlying connection pool.
///
/// Endpoint groups are reached through the accessors in
/// [`services`](crate::services), e.g. [`resources`](Self::resources).
///
/// ## Examples
///
/// ```rust,no_run
/// use spiget_lib::{ClientConfig, RequestContext, SpigetClient};
///
/// # async fn example() -> Result<(), spiget_lib::ApiError> {
/// let client = SpigetClient::new(ClientConfig::from_env()?)?;
/// let status = client.status().get(&RequestContext::background()).await?;
/// println!("{} resources indexed", status.value.stats.resources);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpigetClient<T = ReqwestTransport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl SpigetClient<ReqwestTransport> {
    /// Creates a client using the default reqwest transport.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, BuildError> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> SpigetClient<T> {
    /// Creates a client that sends through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds a request for `path`, relative to the base URL.
    ///
    /// A leading `/` on `path` is ignored.
    ///
    /// ## Errors
    ///
    /// Returns an error if `path` does not resolve under the base URL.
    pub fn new_request(&self, method: RestMethod, path: &str) -> Result<ApiRequest, BuildError> {
        ApiRequest::build(&self.config, method, path)
    }

    /// Builds a request carrying `body` as JSON.
    ///
    /// ## Errors
    ///
    /// Returns an error if the body cannot be serialized or `path` does not
    /// resolve under the base URL.
    pub fn new_request_with_body<B: Serialize + ?Sized>(
        &self,
        method: RestMethod,
        path: &str,
        body: &B,
    ) -> Result<ApiRequest, BuildError> {
        ApiRequest::build_with_body(&self.config, method, path, body)
    }

    /// Sends `request` and decodes the body with format `F`.
    ///
    /// `Accept` is set to the content type `F` decodes.
    ///
    /// The send is abandoned as soon as `ctx` is cancelled or its deadline
    /// passes. Any response outside 2xx becomes [`ApiError::Status`]; a 2xx
    /// body that fails to decode becomes [`ApiError::Decode`]. Both keep the
    /// [`Response`] envelope.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - No response arrived (network failure, timeout, cancellation)
    /// - The server returned a non-success status code
    /// - The body could not be decoded
    #[instrument(
        name = "spiget_request",
        skip(self, ctx, request),
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<F>(
        &self,
        ctx: &RequestContext,
        mut request: ApiRequest,
    ) -> Result<ApiResponse<F::Output>, ApiError>
    where
        F: ResponseFormat,
    {
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static(F::content_type()));

        let raw = match ctx.run(self.transport.send(request)).await {
            Ok(raw) => raw,
            Err(err) => {
                Span::current().record("otel.status_code", "ERROR");
                warn!(error = %err, "request failed");
                return Err(err.into());
            }
        };

        let status = raw.status;
        Span::current().record("http.status_code", status.as_u16());
        let response = Response::from_raw(&raw);

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            let err = status_error(status, &raw.body, response);
            debug!(status = err.status, message = %err.message, "service rejected request");
            return Err(err.into());
        }

        Span::current().record("otel.status_code", "OK");

        match F::parse(raw.body).await {
            Ok(value) => {
                debug!(status = status.as_u16(), "request completed");
                Ok(ApiResponse { value, response })
            }
            Err(source) => {
                warn!(error = %source, "response body did not decode");
                Err(DecodeError {
                    source,
                    response: Box::new(response),
                }
                .into())
            }
        }
    }

    /// GETs `path` with `options` encoded into the query string and decodes
    /// the JSON body into `R`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the options cannot be encoded, in addition to the
    /// conditions of [`execute`](Self::execute).
    pub async fn get_json<R, O>(
        &self,
        ctx: &RequestContext,
        path: &str,
        options: Option<&O>,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned + Default + Send + Sync,
        O: QueryOptions + ?Sized,
    {
        let path = add_options(path, options)?;
        self.fetch(ctx, &path).await
    }

    /// GETs `path` and decodes a JSON body into `R`.
    pub(crate) async fn fetch<R>(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        R: DeserializeOwned + Default + Send + Sync,
    {
        let request = self.new_request(RestMethod::Get, path)?;
        self.execute::<JsonFormat<R>>(ctx, request).await
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON answer.
    pub(crate) async fn post_json<B, R>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Default + Send + Sync,
    {
        let request = self.new_request_with_body(RestMethod::Post, path, body)?;
        self.execute::<JsonFormat<R>>(ctx, request).await
    }

    /// Sends a bodiless request and ignores the answer's body.
    pub(crate) async fn send_discard(
        &self,
        ctx: &RequestContext,
        method: RestMethod,
        path: &str,
    ) -> Result<Response, ApiError> {
        let request = self.new_request(method, path)?;
        self.execute::<Discard>(ctx, request)
            .await
            .map(|answer| answer.response)
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn status_error(status: StatusCode, body: &[u8], response: Response) -> StatusError {
    let api_message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|doc| doc.error.or(doc.message))
        .filter(|m| !m.trim().is_empty());

    let message = api_message
        .clone()
        .or_else(|| {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            (!text.is_empty()).then(|| text.chars().take(MAX_ERROR_BODY_CHARS).collect())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });

    StatusError {
        status: status.as_u16(),
        message,
        api_message,
        response: Box::new(response),
    }
}
