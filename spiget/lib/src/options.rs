//! Query option encoding.
//!
//! Each options type lists its query parameters explicitly in a
//! [`QueryOptions::write_query`] implementation. A field that is `None` (or an
//! empty list) is left out of the query string; a field that is set is always
//! written, even when its value is zero.

use std::fmt::Display;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use strum::{Display as StrumDisplay, EnumString};
use url::form_urlencoded;

use crate::error::EncodingError;

/// Characters escaped when user input becomes a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes `value` so it stays one path segment once joined into a URL.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// An options value that knows how to write itself as query parameters.
pub trait QueryOptions {
    /// Writes every set field into `query`.
    ///
    /// ## Errors
    ///
    /// Returns an error if a set field has a value that cannot be encoded.
    fn write_query(&self, query: &mut QueryWriter) -> Result<(), EncodingError>;
}

/// Collects query parameters, applying the omit-if-unset rule per field.
#[derive(Debug, Default)]
pub struct QueryWriter {
    pairs: Vec<(&'static str, String)>,
}

impl QueryWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `name=value` when `value` is `Some`, including `Some(0)`.
    pub fn optional<V: Display>(&mut self, name: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    /// Writes `name=value` when `value` is `Some`.
    ///
    /// ## Errors
    ///
    /// Returns [`EncodingError::EmptyValue`] for `Some("")`.
    pub fn optional_str(
        &mut self,
        name: &'static str,
        value: Option<&str>,
    ) -> Result<&mut Self, EncodingError> {
        match value {
            Some("") => Err(EncodingError::EmptyValue { name }),
            Some(value) => {
                self.pairs.push((name, value.to_string()));
                Ok(self)
            }
            None => Ok(self),
        }
    }

    /// Writes `name=a,b,c` when `values` is non-empty.
    ///
    /// ## Errors
    ///
    /// Returns [`EncodingError::InvalidListItem`] for an empty item or one
    /// containing `,`.
    pub fn list(&mut self, name: &'static str, values: &[String]) -> Result<&mut Self, EncodingError> {
        if values.is_empty() {
            return Ok(self);
        }
        if let Some(bad) = values.iter().find(|v| v.is_empty() || v.contains(',')) {
            return Err(EncodingError::InvalidListItem {
                name,
                item: bad.clone(),
            });
        }
        self.pairs.push((name, values.join(",")));
        Ok(self)
    }

    /// Returns the collected pairs in insertion order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Returns `true` when no parameter was written.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the pairs as an `application/x-www-form-urlencoded` string.
    pub fn finish(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// Appends the query string for `options` to `path`.
///
/// Nothing is appended when `options` is `None` or writes no parameters.
///
/// ## Examples
///
/// ```rust
/// use spiget_lib::options::add_options;
/// use spiget_lib::{ListOptions, Sort};
///
/// let opts = ListOptions::new().size(10).sort(Sort::descending("downloads"));
/// let path = add_options("resources", Some(&opts)).unwrap();
/// assert_eq!(path, "resources?size=10&sort=-downloads");
///
/// let untouched = add_options::<ListOptions>("resources", None).unwrap();
/// assert_eq!(untouched, "resources");
/// ```
///
/// ## Errors
///
/// Returns an error if the options value cannot be encoded.
pub fn add_options<O: QueryOptions + ?Sized>(
    path: &str,
    options: Option<&O>,
) -> Result<String, EncodingError> {
    let Some(options) = options else {
        return Ok(path.to_string());
    };

    let mut writer = QueryWriter::new();
    options.write_query(&mut writer)?;
    if writer.is_empty() {
        return Ok(path.to_string());
    }

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{path}{separator}{}", writer.finish()))
}

/// Sort direction, written as a `+`/`-` prefix on the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A sort key such as `-downloads`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    /// Sorts by `field`, smallest first.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    /// Sorts by `field`, largest first.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    fn encode(&self) -> Result<String, EncodingError> {
        if self.field.is_empty() {
            return Err(EncodingError::EmptyValue { name: "sort" });
        }
        let prefix = match self.order {
            SortOrder::Ascending => '+',
            SortOrder::Descending => '-',
        };
        Ok(format!("{prefix}{}", self.field))
    }
}

/// Pagination, sorting and field selection shared by every list endpoint.
///
/// | Field | Query parameter |
/// |-------|-----------------|
/// | `size` | `size` |
/// | `page` | `page` |
/// | `sort` | `sort` (`+field` / `-field`) |
/// | `fields` | `fields` (comma separated) |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub size: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<Sort>,
    pub fields: Vec<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of items per page.
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the sort key.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Restricts the returned fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl QueryOptions for ListOptions {
    fn write_query(&self, query: &mut QueryWriter) -> Result<(), EncodingError> {
        query.optional("size", self.size).optional("page", self.page);
        let sort = self.sort.as_ref().map(Sort::encode).transpose()?;
        query.optional_str("sort", sort.as_deref())?;
        query.list("fields", &self.fields)?;
        Ok(())
    }
}

/// Options for listing resources.
pub type ResourceListOptions = ListOptions;
/// Options for listing authors.
pub type AuthorListOptions = ListOptions;
/// Options for listing categories.
pub type CategoryListOptions = ListOptions;

/// Whether a resource must support any or all of the requested versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VersionMatch {
    Any,
    All,
}

/// Options for [`ResourcesService::list_by_versions`](crate::services::ResourcesService::list_by_versions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceListByVersionsOptions {
    pub method: Option<VersionMatch>,
    pub list: ListOptions,
}

impl QueryOptions for ResourceListByVersionsOptions {
    fn write_query(&self, query: &mut QueryWriter) -> Result<(), EncodingError> {
        query.optional("method", self.method);
        self.list.write_query(query)
    }
}

/// Which field a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SearchField {
    Name,
    Tag,
}

/// Options for resource searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSearchOptions {
    pub field: Option<SearchField>,
    pub list: ListOptions,
}

impl QueryOptions for ResourceSearchOptions {
    fn write_query(&self, query: &mut QueryWriter) -> Result<(), EncodingError> {
        query.optional("field", self.field);
        self.list.write_query(query)
    }
}

/// Options for author searches. Spiget only matches authors by name.
pub type AuthorSearchOptions = ResourceSearchOptions;
