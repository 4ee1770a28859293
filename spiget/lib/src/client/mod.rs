//! The request pipeline.
//!
//! - [`request`](self) builds an [`ApiRequest`] from a method, a relative path
//!   and an optional body.
//! - [`Transport`] sends it; [`ReqwestTransport`] is the default.
//! - [`SpigetClient::execute`] runs the send under a
//!   [`RequestContext`](crate::RequestContext), classifies the status and
//!   decodes the body.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use spiget_lib::{ClientConfig, JsonFormat, RequestContext, RestMethod, SpigetClient};
//! use spiget_lib::types::Category;
//!
//! # async fn example() -> Result<(), spiget_lib::ApiError> {
//! let client = SpigetClient::new(ClientConfig::default())?;
//! let request = client.new_request(RestMethod::Get, "/categories/4")?;
//! let category = client
//!     .execute::<JsonFormat<Category>>(&RequestContext::background(), request)
//!     .await?;
//! println!("{}", category.value.name);
//! # Ok(())
//! # }
//! ```

mod executor;
mod request;
mod transport;

pub use executor::SpigetClient;
pub use request::ApiRequest;
pub use transport::{RawResponse, ReqwestTransport, Transport};
