use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::options::{AuthorSearchOptions, ResourceSearchOptions};
use crate::response::ApiResponse;
use crate::types::{Author, Resource};

/// Search shortcuts. Same requests as
/// [`ResourcesService::search`](super::ResourcesService::search) and
/// [`AuthorsService::search`](super::AuthorsService::search).
#[derive(Debug, Clone, Copy)]
pub struct SearchService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> SearchService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    pub async fn resources(
        &self,
        ctx: &RequestContext,
        query: &str,
        options: Option<&ResourceSearchOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client.resources().search(ctx, query, options).await
    }

    pub async fn authors(
        &self,
        ctx: &RequestContext,
        query: &str,
        options: Option<&AuthorSearchOptions>,
    ) -> Result<ApiResponse<Vec<Author>>, ApiError> {
        self.client.authors().search(ctx, query, options).await
    }
}
