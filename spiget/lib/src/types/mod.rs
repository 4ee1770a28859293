//! Domain values returned by the Spiget API.
//!
//! Plain records: every field defaults when missing, so partial payloads
//! (such as those trimmed with [`ListOptions::fields`](crate::ListOptions::fields))
//! still decode.

mod author;
mod category;
mod resource;
mod status;
mod webhook;

pub use author::{Author, Icon};
pub use category::Category;
pub use resource::{Rating, Resource, ResourceFile, Review, Update, Version};
pub use status::{
    ExistenceDocument, ExistenceStatus, FetchItem, FetchPage, FetchStatus, RestFetchCursor,
    RestFetchStatus, ServerInfo, Stats, Status, StatusResponse,
};
pub use webhook::{Webhook, WebhookEvents, WebhookStatus};
