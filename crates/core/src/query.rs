//! Search, filter, sort and pagination for course and user listings.
//!
//! Query-string parameters arrive as loosely typed optional values. The
//! builders here normalize them into [`CourseQuery`] / [`UserQuery`]: the
//! `all` sentinels are dropped, search text becomes an escaped `ILIKE`
//! pattern, the sort key becomes a fixed `ORDER BY` clause and paging
//! becomes a clamped limit/offset pair. Repositories bind these values into
//! static SQL, so no user input ever reaches the query text.

use serde::Deserialize;

use crate::error::CoreError;
use crate::user::{STATUS_ACTIVE, STATUS_INACTIVE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sentinel meaning "no restriction" for choice filters (matched case-insensitively).
pub const FILTER_ALL: &str = "all";

/// Admin course status filter: published courses only.
pub const STATUS_PUBLISHED: &str = "published";

/// Admin course status filter: unpublished courses only.
pub const STATUS_DRAFT: &str = "draft";

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Query parameters accepted by the course listings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CourseSearchParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    /// Admin listing only: `published`, `draft` or `all`.
    pub status: Option<String>,
    #[serde(rename = "minPrice", alias = "min_price")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", alias = "max_price")]
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters accepted by the admin user listing.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserSearchParams {
    pub search: Option<String>,
    pub role: Option<String>,
    /// `active`, `inactive` or `all`.
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Supported course orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseSort {
    Title,
    PriceLow,
    PriceHigh,
    Rating,
    #[default]
    Newest,
}

impl CourseSort {
    /// Map a sort key to an ordering. Unknown or missing keys fall back to newest.
    pub fn parse(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("title") => Self::Title,
            Some("price_low") => Self::PriceLow,
            Some("price_high") => Self::PriceHigh,
            Some("rating") => Self::Rating,
            _ => Self::Newest,
        }
    }

    /// The `ORDER BY` clause for this ordering.
    ///
    /// Each clause ends with the primary key so pages never overlap when the
    /// leading column has ties.
    pub fn order_by(self) -> &'static str {
        match self {
            Self::Title => "title ASC, id ASC",
            Self::PriceLow => "price ASC, id ASC",
            Self::PriceHigh => "price DESC, id DESC",
            Self::Rating => "rating DESC, id DESC",
            Self::Newest => "created_at DESC, id DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A 1-indexed page of at most `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Clamp user-provided paging values: `page >= 1`, `1 <= limit <= MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`; zero when there are no matches.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Filter helpers
// ---------------------------------------------------------------------------

/// Drop empty values and the `all` sentinel; keep everything else verbatim.
pub fn choice_filter(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(FILTER_ALL) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Build a case-insensitive substring pattern for `ILIKE`.
///
/// `%`, `_` and `\` in the search text are escaped so they match literally.
/// Returns `None` for empty or whitespace-only input.
pub fn like_pattern(search: Option<&str>) -> Option<String> {
    let text = search?.trim();
    if text.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

// ---------------------------------------------------------------------------
// Course query
// ---------------------------------------------------------------------------

/// Which course listing is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Public catalogue: only published courses are visible.
    Public,
    /// Admin listing: no publish restriction beyond the optional status filter.
    Admin,
}

/// A normalized course listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseQuery {
    /// `ILIKE` pattern over title, description, instructor name and category.
    pub search_pattern: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    /// Restrict on `is_published` when set.
    pub published: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: CourseSort,
    pub page: Page,
}

impl CourseQuery {
    pub fn from_params(
        params: &CourseSearchParams,
        visibility: Visibility,
    ) -> Result<Self, CoreError> {
        if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
            if min > max {
                return Err(CoreError::Validation(
                    "minPrice cannot be greater than maxPrice".to_string(),
                ));
            }
        }

        let published = match visibility {
            Visibility::Public => Some(true),
            Visibility::Admin => parse_course_status(params.status.as_deref())?,
        };

        Ok(Self {
            search_pattern: like_pattern(params.search.as_deref()),
            category: choice_filter(params.category.as_deref()),
            level: choice_filter(params.level.as_deref()),
            published,
            min_price: params.min_price,
            max_price: params.max_price,
            sort: CourseSort::parse(params.sort.as_deref()),
            page: Page::new(params.page, params.limit),
        })
    }
}

fn parse_course_status(status: Option<&str>) -> Result<Option<bool>, CoreError> {
    parse_flag(status, (STATUS_PUBLISHED, true), (STATUS_DRAFT, false))
}

/// Map a two-valued status filter (plus the `all` sentinel) to a boolean
/// restriction. Both names match case-insensitively, like the sentinel.
fn parse_flag(
    status: Option<&str>,
    yes: (&str, bool),
    no: (&str, bool),
) -> Result<Option<bool>, CoreError> {
    let Some(status) = choice_filter(status) else {
        return Ok(None);
    };
    for (name, value) in [yes, no] {
        if status.eq_ignore_ascii_case(name) {
            return Ok(Some(value));
        }
    }
    Err(CoreError::Validation(format!(
        "Invalid status '{status}'. Must be one of: {}, {}, {FILTER_ALL}",
        yes.0, no.0
    )))
}

// ---------------------------------------------------------------------------
// User query
// ---------------------------------------------------------------------------

/// A normalized admin user listing query. Always ordered newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    /// `ILIKE` pattern over name and email.
    pub search_pattern: Option<String>,
    pub role: Option<String>,
    /// Restrict on `is_active` when set.
    pub active: Option<bool>,
    pub page: Page,
}

impl UserQuery {
    pub fn from_params(params: &UserSearchParams) -> Result<Self, CoreError> {
        let active = parse_flag(
            params.status.as_deref(),
            (STATUS_ACTIVE, true),
            (STATUS_INACTIVE, false),
        )?;

        Ok(Self {
            search_pattern: like_pattern(params.search.as_deref()),
            role: choice_filter(params.role.as_deref()),
            active,
            page: Page::new(params.page, params.limit),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
