//! Endpoint groups.
//!
//! Each group borrows the [`SpigetClient`] it was obtained from and maps one
//! method to one Spiget endpoint. Every method takes the caller's
//! [`RequestContext`](crate::RequestContext) and returns the decoded value
//! together with the [`Response`](crate::Response) envelope.

mod authors;
mod categories;
mod resources;
mod search;
mod status;
mod webhook;

pub use authors::AuthorsService;
pub use categories::CategoriesService;
pub use resources::ResourcesService;
pub use search::SearchService;
pub use status::StatusService;
pub use webhook::WebhookService;

use crate::client::{SpigetClient, Transport};
use crate::error::EncodingError;
use crate::options::path_segment;

impl<T: Transport> SpigetClient<T> {
    /// Resource listing, lookup, download and search.
    pub fn resources(&self) -> ResourcesService<'_, T> {
        ResourcesService::new(self)
    }

    /// Author listing, lookup and search.
    pub fn authors(&self) -> AuthorsService<'_, T> {
        AuthorsService::new(self)
    }

    /// Category listing and lookup.
    pub fn categories(&self) -> CategoriesService<'_, T> {
        CategoriesService::new(self)
    }

    /// Searches across resources and authors.
    pub fn search(&self) -> SearchService<'_, T> {
        SearchService::new(self)
    }

    /// API and crawler status.
    pub fn status(&self) -> StatusService<'_, T> {
        StatusService::new(self)
    }

    /// Webhook registration and management.
    pub fn webhook(&self) -> WebhookService<'_, T> {
        WebhookService::new(self)
    }
}

/// Escapes a caller-supplied path segment.
///
/// Empty, `.` and `..` are rejected: the first drops the segment and the
/// others are collapsed by URL resolution, so each would reach another
/// endpoint.
fn required_segment(name: &'static str, value: &str) -> Result<String, EncodingError> {
    match value {
        "" => Err(EncodingError::EmptyValue { name }),
        "." | ".." => Err(EncodingError::DotSegment {
            name,
            segment: value.to_string(),
        }),
        _ => Ok(path_segment(value)),
    }
}
