use serde::Serialize;
use tracing::info;

use super::required_segment;
use crate::client::{ReqwestTransport, SpigetClient, Transport};
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::response::{ApiResponse, Response};
use crate::types::{Webhook, WebhookEvents, WebhookStatus};

#[derive(Serialize)]
struct Registration<'a> {
    url: &'a str,
    events: &'a [String],
}

/// Endpoints under `/webhook`.
#[derive(Debug, Clone, Copy)]
pub struct WebhookService<'a, T = ReqwestTransport> {
    client: &'a SpigetClient<T>,
}

impl<'a, T: Transport> WebhookService<'a, T> {
    pub(crate) fn new(client: &'a SpigetClient<T>) -> Self {
        Self { client }
    }

    /// Event names accepted by [`register`](Self::register).
    pub async fn events(&self, ctx: &RequestContext) -> Result<ApiResponse<WebhookEvents>, ApiError> {
        self.client.fetch(ctx, "webhook/events").await
    }

    /// Registers `url` to be called for `events`.
    ///
    /// The returned [`Webhook`] carries the secret needed by
    /// [`delete`](Self::delete).
    pub async fn register(
        &self,
        ctx: &RequestContext,
        url: &str,
        events: &[String],
    ) -> Result<ApiResponse<Webhook>, ApiError> {
        let body = Registration { url, events };
        let answer: ApiResponse<Webhook> = self.client.post_json(ctx, "webhook/register", &body).await?;
        info!(id = %answer.value.id, events = events.len(), "webhook registered");
        Ok(answer)
    }

    /// Delivery state of webhook `id`.
    pub async fn status(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<ApiResponse<WebhookStatus>, ApiError> {
        let id = required_segment("id", id)?;
        self.client.fetch(ctx, &format!("webhook/status/{id}")).await
    }

    /// Deletes `webhook`. Both its id and secret must be set.
    pub async fn delete(&self, ctx: &RequestContext, webhook: &Webhook) -> Result<Response, ApiError> {
        let id = required_segment("id", &webhook.id)?;
        let secret = required_segment("secret", &webhook.secret)?;
        self.client
            .send_discard(ctx, RestMethod::Delete, &format!("webhook/delete/{id}/{secret}"))
            .await
    }
}
