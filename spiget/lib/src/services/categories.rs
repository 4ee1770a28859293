use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::options::{CategoryListOptions, ListOptions};
use crate::response::ApiResponse;
use crate::types::{Category, Resource};

/// Endpoints under `/categories`.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> CategoriesService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        options: Option<&CategoryListOptions>,
    ) -> Result<ApiResponse<Vec<Category>>, ApiError> {
        self.client.get_json(ctx, "categories", options).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: u64) -> Result<ApiResponse<Category>, ApiError> {
        self.client.fetch(ctx, &format!("categories/{id}")).await
    }

    /// Resources filed under category `id`.
    pub async fn get_resources(
        &self,
        ctx: &RequestContext,
        id: u64,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<Vec<Resource>>, ApiError> {
        self.client
            .get_json(ctx, &format!("categories/{id}/resources"), options)
            .await
    }
}
