//! Response decoding.
//!
//! [`ResponseFormat`] decides what happens to a successful body: parse it
//! ([`JsonFormat`]) or drop it ([`Discard`]). The [`Response`] envelope, with
//! its pagination and rate-limit metadata, is produced either way.

mod envelope;
mod format;

pub use envelope::{
    ApiResponse, PAGE_COUNT_HEADER, PAGE_INDEX_HEADER, PAGE_ORDER_HEADER, PAGE_SIZE_HEADER,
    PAGE_SORT_HEADER, Pagination, RATE_LIMIT_HEADER, RATE_REMAINING_HEADER, RATE_RESET_HEADER,
    RateLimit, Response,
};
pub use format::{Discard, JsonFormat, ResponseFormat};
