//! The response envelope and its metadata.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::client::RawResponse;

/// Current page number.
pub const PAGE_INDEX_HEADER: &str = "x-page-index";
/// Items per page.
pub const PAGE_SIZE_HEADER: &str = "x-page-size";
/// Total number of pages.
pub const PAGE_COUNT_HEADER: &str = "x-page-count";
/// Field the page is sorted by.
pub const PAGE_SORT_HEADER: &str = "x-page-sort";
/// Sort direction of the page.
pub const PAGE_ORDER_HEADER: &str = "x-page-order";
/// Request quota for the current window.
pub const RATE_LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Requests left in the current window.
pub const RATE_REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Unix time (seconds) at which the window resets.
pub const RATE_RESET_HEADER: &str = "x-ratelimit-reset";

/// Status, headers and derived metadata of an answered request.
///
/// Produced for every response that arrived, whether or not its body was
/// decoded, and carried by [`StatusError`](crate::StatusError) and
/// [`DecodeError`](crate::DecodeError) too.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw response headers.
    pub headers: HeaderMap,
    /// Final URL, after any redirects were followed.
    pub url: Url,
    /// Pagination hints, when the service sent any.
    pub pagination: Option<Pagination>,
    /// Rate-limit counters, when the service sent any.
    pub rate_limit: Option<RateLimit>,
}

impl Response {
    /// Builds the envelope from a raw transport response.
    pub fn from_raw(raw: &RawResponse) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers.clone(),
            url: raw.url.clone(),
            pagination: Pagination::from_headers(&raw.headers),
            rate_limit: RateLimit::from_headers(&raw.headers),
        }
    }
}

/// Page metadata from the `X-Page-*` headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page, from `X-Page-Index`.
    pub page: Option<u32>,
    /// Items per page, from `X-Page-Size`.
    pub size: Option<u32>,
    /// Number of pages, from `X-Page-Count`.
    pub total_pages: Option<u32>,
    /// Sort key applied by the service, from `X-Page-Sort`.
    pub sort: Option<String>,
    /// Sort direction, from `X-Page-Order`.
    pub order: Option<String>,
}

impl Pagination {
    /// Returns `None` when none of the pagination headers are present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let pagination = Self {
            page: header_num(headers, PAGE_INDEX_HEADER),
            size: header_num(headers, PAGE_SIZE_HEADER),
            total_pages: header_num(headers, PAGE_COUNT_HEADER),
            sort: header_str(headers, PAGE_SORT_HEADER).map(str::to_string),
            order: header_str(headers, PAGE_ORDER_HEADER).map(str::to_string),
        };
        (pagination != Self::default()).then_some(pagination)
    }

    /// The page after this one, if the total is known and not yet reached.
    pub fn next_page(&self) -> Option<u32> {
        match (self.page, self.total_pages) {
            (Some(page), Some(total)) if page < total => Some(page + 1),
            _ => None,
        }
    }
}

/// Rate-limit counters from the `X-RateLimit-*` headers.
///
/// Purely informational: the client never waits or retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    /// Requests allowed per window, from `X-RateLimit-Limit`.
    pub limit: Option<u32>,
    /// Requests left in the window, from `X-RateLimit-Remaining`.
    pub remaining: Option<u32>,
    /// When the window resets, from `X-RateLimit-Reset`.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Returns `None` when none of the rate-limit headers are present.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_num(headers, RATE_LIMIT_HEADER);
        let remaining = header_num(headers, RATE_REMAINING_HEADER);
        let reset = header_num::<i64>(headers, RATE_RESET_HEADER)
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        if limit.is_none() && remaining.is_none() && reset.is_none() {
            return None;
        }
        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    /// Returns `true` when the service reported no requests left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// A decoded value together with its response envelope.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded body.
    pub value: T,
    /// Status, headers and metadata.
    pub response: Response,
}

impl<T> ApiResponse<T> {
    /// Drops the envelope.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transforms the value, keeping the envelope.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            response: self.response,
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn header_num<N: FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    let raw = header_str(headers, name)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!(header = name, value = raw, "ignoring malformed metadata header");
            None
        }
    }
}
