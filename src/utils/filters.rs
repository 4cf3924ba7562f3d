//! Listing parameters: pagination bounds and allow-listed sorting.
//!
//! A sort key arrives as free text (`title`, `-title`, ...). It is looked up in
//! a fixed table of `(field, column)` pairs and only the column expression from
//! that table ever reaches SQL. [`QueryDescriptor::order_by_clause`] is the
//! single place an identifier is interpolated into a query string.

use crate::core::error::Error;
use crate::utils::validator::ValidationErrors;

pub(crate) const DEFAULT_PAGE: i64 = 1;
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 20;
pub(crate) const MAX_PAGE: i64 = 10_000_000;
pub(crate) const MAX_PAGE_SIZE: i64 = 100;

/// Fixed mapping from client-facing sort fields to column expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SortSafelist {
    default: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl SortSafelist {
    pub(crate) const fn new(
        default: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { default, entries }
    }

    fn column(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }
}

pub(crate) const CONTRACT_SORT: SortSafelist =
    SortSafelist::new("id", &[("id", "id"), ("title", "title")]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated listing parameters. Only constructed by [`normalize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Filters {
    page: i64,
    page_size: i64,
    sort: String,
    column: &'static str,
    direction: SortDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QueryDescriptor {
    pub(crate) limit: i64,
    pub(crate) offset: i64,
    pub(crate) order_by_column: &'static str,
    pub(crate) order_by_direction: SortDirection,
}

impl Filters {
    pub(crate) fn page(&self) -> i64 {
        self.page
    }

    pub(crate) fn page_size(&self) -> i64 {
        self.page_size
    }

    pub(crate) fn sort(&self) -> &str {
        &self.sort
    }

    pub(crate) fn to_query_descriptor(&self) -> QueryDescriptor {
        QueryDescriptor {
            limit: self.page_size,
            offset: (self.page - 1) * self.page_size,
            order_by_column: self.column,
            order_by_direction: self.direction,
        }
    }
}

impl QueryDescriptor {
    /// `ORDER BY` body with the primary-key tie-break, e.g. `title DESC, id ASC`.
    pub(crate) fn order_by_clause(&self) -> String {
        format!(
            "{} {}, id ASC",
            self.order_by_column,
            self.order_by_direction.as_sql()
        )
    }
}

/// Parses an optional integer query value. `None` means "not an integer".
fn read_int(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

fn split_sort(sort: &str) -> (&str, SortDirection) {
    match sort.strip_prefix('-') {
        Some(field) => (field, SortDirection::Desc),
        None => (sort, SortDirection::Asc),
    }
}

pub(crate) fn normalize(
    raw_page: Option<&str>,
    raw_page_size: Option<&str>,
    raw_sort: Option<&str>,
    safelist: &SortSafelist,
) -> Result<Filters, Error> {
    let page = read_int(raw_page, DEFAULT_PAGE);
    let page_size = read_int(raw_page_size, DEFAULT_PAGE_SIZE);
    let sort = match raw_sort {
        None | Some("") => safelist.default,
        Some(sort) => sort,
    };
    let (field, direction) = split_sort(sort);
    let column = safelist.column(field);

    let errors = ValidationErrors::new()
        .check(page.is_some(), "page", "must be an integer value")
        .check(page.is_none_or(|p| p > 0), "page", "must be greater than zero")
        .check(
            page.is_none_or(|p| p <= MAX_PAGE),
            "page",
            "must be a maximum of 10 million",
        )
        .check(page_size.is_some(), "page_size", "must be an integer value")
        .check(
            page_size.is_none_or(|s| s > 0),
            "page_size",
            "must be greater than zero",
        )
        .check(
            page_size.is_none_or(|s| s <= MAX_PAGE_SIZE),
            "page_size",
            "must be a maximum of 100",
        )
        .check(column.is_some(), "sort", "invalid sort value");

    match (page, page_size, column) {
        (Some(page), Some(page_size), Some(column)) if errors.is_empty() => Ok(Filters {
            page,
            page_size,
            sort: sort.to_owned(),
            column,
            direction,
        }),
        _ => Err(Error::Validation(errors)),
    }
}
