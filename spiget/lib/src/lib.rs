//! Typed async client for the Spiget REST API.
//!
//! Every endpoint method funnels through one pipeline:
//!
//! 1. **Options encoding** ([`options`]) turns an options value into query
//!    parameters, emitting only the fields that were explicitly set.
//! 2. **Request building** ([`SpigetClient::new_request`]) joins the relative
//!    path onto the configured base URL and attaches headers and body.
//! 3. **Execution** ([`SpigetClient::execute`]) sends the request through a
//!    pluggable [`Transport`], honouring the caller's [`RequestContext`].
//! 4. **Decoding** ([`response`]) parses the body into the requested type and
//!    wraps the status and metadata headers into a [`Response`] envelope.
//!
//! The client holds no mutable state after construction and is safe to share
//! between tasks. It never retries; rate-limit headers are reported, not acted on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use spiget_lib::{ClientConfig, RequestContext, SpigetClient};
//!
//! # async fn example() -> Result<(), spiget_lib::ApiError> {
//! let client = SpigetClient::new(ClientConfig::default())?;
//! let ctx = RequestContext::background();
//!
//! let resource = client.resources().get(&ctx, 6245).await?;
//! println!("{} ({} downloads)", resource.value.name, resource.value.downloads);
//!
//! if let Some(rate) = &resource.response.rate_limit {
//!     println!("{:?} requests left", rate.remaining);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod method;
pub mod options;
pub mod response;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use auth::ApiAuthMethod;
pub use client::{ApiRequest, RawResponse, ReqwestTransport, SpigetClient, Transport};
pub use config::ClientConfig;
pub use context::RequestContext;
pub use error::{
    ApiError, BuildError, ClientError, DecodeError, EncodingError, StatusError, ValidationError,
};
pub use method::RestMethod;
pub use options::{
    AuthorListOptions, AuthorSearchOptions, CategoryListOptions, ListOptions, QueryOptions,
    QueryWriter, ResourceListByVersionsOptions, ResourceListOptions, ResourceSearchOptions,
    SearchField, Sort, SortOrder, VersionMatch,
};
pub use response::{ApiResponse, Discard, JsonFormat, Pagination, RateLimit, Response, ResponseFormat};
