use tracing::instrument;

use super::required_segment;
use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::{ApiError, EncodingError};
use crate::method::RestMethod;
use crate::options::{ListOptions, ResourceListByVersionsOptions, ResourceSearchOptions};
use crate::response::{ApiResponse, Response};
use crate::types::{Author, Resource, Review, Update, Version};

/// Endpoints under `/resources` and `/search/resources`.
#[derive(Debug, Clone, Copy)]
pub struct ResourcesService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> ResourcesService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    /// All resources, free and premium.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client.get_json(ctx, "resources", options).await
    }

    pub async fn list_free(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client.get_json(ctx, "resources/free", options).await
    }

    /// Recently added resources.
    pub async fn list_new(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client.get_json(ctx, "resources/new", options).await
    }

    pub async fn list_premium(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client.get_json(ctx, "resources/premium", options).await
    }

    /// Resources tested against the given game versions.
    ///
    /// `versions` must not be empty. Whether a resource has to match any or
    /// all of them is controlled by [`ResourceListByVersionsOptions::method`].
    #[instrument(skip(self, ctx, options), level = "debug")]
    pub async fn list_by_versions(
        &self,
        ctx: &RequestContext,
        versions: &[&str],
        options: Option<&ResourceListByVersionsOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        if versions.is_empty() {
            return Err(EncodingError::EmptyValue { name: "versions" }.into());
        }
        let segments = versions
            .iter()
            .map(|v| required_segment("versions", v))
            .collect::<Result<Vec<_>, _>>()?;
        let path = format!("resources/for/{}", segments.join(","));
        self.client.get_json(ctx, &path, options).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: u64) -> Result<ApiResponse<Resource>, ApiError> {
        self.client.fetch(ctx, &format!("resources/{id}")).await
    }

    /// The author of resource `id`.
    pub async fn get_author(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<ApiResponse<Author>, ApiError> {
        self.client.fetch(ctx, &format!("resources/{id}/author")).await
    }

    /// Follows the download redirect for resource `id`.
    ///
    /// The body is not read into memory; [`Response::url`] is the final
    /// location. For external resources that may be any web page, so check
    /// [`Resource::external`] first.
    pub async fn download(&self, ctx: &RequestContext, id: u64) -> Result<Response, ApiError> {
        self.client
            .send_discard(ctx, RestMethod::Get, &format!("resources/{id}/download"))
            .await
    }

    pub async fn get_reviews(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Review>>, ApiError> {
        self.client
            .get_json(ctx, &format!("resources/{id}/reviews"), options)
            .await
    }

    pub async fn get_updates(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Update>>, ApiError> {
        self.client
            .get_json(ctx, &format!("resources/{id}/updates"), options)
            .await
    }

    pub async fn get_latest_update(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<ApiResponse<Update>, ApiError> {
        self.client
            .fetch(ctx, &format!("resources/{id}/updates/latest"))
            .await
    }

    pub async fn get_versions(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Version>>, ApiError> {
        self.client
            .get_json(ctx, &format!("resources/{id}/versions"), options)
            .await
    }

    pub async fn get_latest_version(
        &self,
        ctx: &RequestContext,
        id: u64,
    ) -> Result<ApiResponse<Version>, ApiError> {
        self.client
            .fetch(ctx, &format!("resources/{id}/versions/latest"))
            .await
    }

    /// A single version of resource `id`.
    pub async fn get_version(
        &self,
        ctx: &RequestContext,
        id: u64,
        version: u64,
    ) -> Result<ApiResponse<Version>, ApiError> {
        self.client
            .fetch(ctx, &format!("resources/{id}/versions/{version}"))
            .await
    }

    /// Follows the download redirect of one version. External resources
    /// may not redirect to a file at all.
    pub async fn download_version(
        &self,
        ctx: &RequestContext,
        id: u64,
        version: u64,
    ) -> Result<Response, ApiError> {
        self.client
            .send_discard(
                ctx,
                RestMethod::Get,
                &format!("resources/{id}/versions/{version}/download"),
            )
            .await
    }

    /// Searches resources by name (default) or tag.
    ///
    /// `query` is escaped as a single path segment and must not be empty.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        options: Option<&ResourceSearchOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        let query = required_segment("query", query)?;
        self.client
            .get_json(ctx, &format!("search/resources/{query}"), options)
            .await
    }
}
