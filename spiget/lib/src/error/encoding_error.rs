//! Query option encoding errors.

use thiserror::Error;

/// Errors raised while converting an options value into query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A field was explicitly set to an empty string.
    #[error("query parameter `{name}` was set to an empty value")]
    EmptyValue {
        /// The query parameter name.
        name: &'static str,
    },

    /// A list item was empty or contained the `,` separator.
    #[error("query parameter `{name}` has an invalid list item {item:?}")]
    InvalidListItem {
        /// The query parameter name.
        name: &'static str,
        /// The offending item.
        item: String,
    },

    /// A path segment was `.` or `..`, which URL resolution would collapse.
    #[error("path segment `{name}` must not be {segment:?}")]
    DotSegment {
        /// What the segment identifies (`query`, `id`, ...).
        name: &'static str,
        /// The rejected segment.
        segment: String,
    },
}
