//! DTOs exposed by the advocates API endpoint.

use serde::Serialize;

use crate::domain::advocate::Advocate;
use crate::search::{DEFAULT_PAGE_SIZE, SearchPage};

/// Query parameters accepted by [`crate::services::api::list_advocates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvocatesQuery {
    /// Optional free-form search string applied to the advocate list.
    pub search: Option<String>,
    /// One-based page number; values below 1 produce an empty page.
    pub page: i64,
    /// Number of advocates per page.
    pub limit: usize,
}

impl Default for AdvocatesQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned next to the page of advocates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: i64,
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl<T> From<&SearchPage<T>> for PaginationInfo {
    fn from(page: &SearchPage<T>) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            page_size: page.page_size,
            has_next_page: page.has_next,
            has_prev_page: page.has_prev,
            next_page: page.has_next.then(|| page.current_page + 1),
            prev_page: page.has_prev.then(|| page.current_page - 1),
        }
    }
}

/// Body of a successful `/api/advocates` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvocatesResponse {
    pub data: Vec<Advocate>,
    pub pagination: PaginationInfo,
}

impl From<SearchPage<Advocate>> for AdvocatesResponse {
    fn from(page: SearchPage<Advocate>) -> Self {
        let pagination = PaginationInfo::from(&page);
        Self {
            data: page.items,
            pagination,
        }
    }
}

/// Body of a failed API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
