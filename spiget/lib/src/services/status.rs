use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::types::StatusResponse;

/// The `/status` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct StatusService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> StatusService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    /// Crawler state and catalogue totals.
    pub async fn get(&self, ctx: &RequestContext) -> Result<ApiResponse<StatusResponse>, ApiError> {
        self.client.fetch(ctx, "status").await
    }
}
