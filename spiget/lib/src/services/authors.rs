use super::required_segment;
use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::options::{AuthorListOptions, AuthorSearchOptions, ListOptions};
use crate::response::ApiResponse;
use crate::types::{Author, Resource, Review};

/// Endpoints under `/authors` and `/search/authors`.
#[derive(Debug, Clone, Copy)]
pub struct AuthorsService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> AuthorsService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    /// Authors known to Spiget.
    ///
    /// Only members involved with resources are listed, either as author or
    /// as reviewer.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        options: Option<&AuthorListOptions>,
    ) -> Result<ApiResponse<Vec<Author>>, ApiError> {
        self.client.get_json(ctx, "authors", options).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: u64) -> Result<ApiResponse<Author>, ApiError> {
        self.client.fetch(ctx, &format!("authors/{id}")).await
    }

    /// Resources published by author `id`.
    pub async fn get_resources(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client
            .get_json(ctx, &format!("authors/{id}/resources"), options)
            .await
    }

    /// Reviews written by author `id`.
    pub async fn get_reviews(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Review>>, ApiError> {
        self.client
            .get_json(ctx, &format!("authors/{id}/reviews"), options)
            .await
    }

    /// Searches authors by name. `query` must not be empty.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        options: Option<&AuthorSearchOptions>,
    ) -> Result<ApiResponse<Vec<Author>>, ApiError> {
        let query = required_segment("query", query)?;
        self.client
            .get_json(ctx, &format!("search/authors/{query}"), options)
            .await
    }
}
