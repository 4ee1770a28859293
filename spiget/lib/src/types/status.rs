use serde::{Deserialize, Serialize};

/// Body of `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: Status,
    pub stats: Stats,
}

/// State of the Spiget crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub server: ServerInfo,
    pub fetch: FetchStatus,
    pub rest_fetch: RestFetchStatus,
    pub existence: ExistenceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub mode: String,
}

/// Progress of the page crawl. Timestamps are unix milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchStatus {
    pub start: i64,
    pub start_string: String,
    pub end: i64,
    pub active: bool,
    pub page: FetchPage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchPage {
    pub amount: u32,
    pub index: u32,
    pub item: FetchItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchItem {
    pub index: u32,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestFetchStatus {
    pub start: i64,
    pub start_string: String,
    pub end: i64,
    pub active: bool,
    #[serde(rename = "n")]
    pub cursor: RestFetchCursor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestFetchCursor {
    pub num: u32,
    pub start: u32,
    pub end: u32,
    pub max: u32,
    pub index: u32,
}

/// Progress of the pass that checks listed resources still exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExistenceStatus {
    pub start: i64,
    pub start_string: String,
    pub end: i64,
    pub active: bool,
    pub document: ExistenceDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExistenceDocument {
    pub amount: u32,
    pub suspects: u32,
    pub index: u32,
    pub id: u64,
}

/// Catalogue totals. The service names these in snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Stats {
    pub resources: u64,
    pub authors: u64,
    pub categories: u64,
    pub resource_updates: u64,
    pub resource_versions: u64,
    pub reviews: u64,
}
