//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Paginated listings add
//! paging metadata next to the data.

use coursehub_core::query::Page;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: course }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing together with the totals before paging.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items on this page.
    pub count: usize,
    /// Matches across all pages.
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub data: Vec<T>,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: &Page) -> Self {
        Self {
            count: data.len(),
            total,
            total_pages: page.total_pages(total),
            current_page: page.page,
            data,
        }
    }
}

/// `{ "message": ..., "data": T }` for mutations whose result needs a
/// human-readable summary (deletions, enrollment changes).
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_metadata() {
        let page = Page::new(Some(2), Some(2));
        let response = PaginatedResponse::new(vec!["c", "d"], 5, &page);
        assert_eq!(response.count, 2);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 2);
    }

    #[test]
    fn empty_listing_has_zero_pages() {
        let response = PaginatedResponse::new(Vec::<u8>::new(), 0, &Page::default());
        assert_eq!(response.count, 0);
        assert_eq!(response.total_pages, 0);
        assert_eq!(response.current_page, 1);
    }
}
