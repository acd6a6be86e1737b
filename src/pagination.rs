use serde::{Deserialize, Serialize};

/// Fixed page size for every list endpoint; callers may only choose the page.
pub const DEFAULT_PER_PAGE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub per_page: i64,
}

impl PageParams {
    /// Returns `None` when the requested page is below 1; a missing page
    /// defaults to the first.
    pub fn new(page: Option<i64>) -> Option<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return None;
        }
        Some(Self {
            page,
            per_page: DEFAULT_PER_PAGE,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

pub fn total_pages(total_items: i64, per_page: i64) -> i64 {
    (total_items + per_page - 1) / per_page
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

/// Response envelope shared by every list endpoint.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total_items: i64) -> Self {
        Self {
            items,
            pagination: PaginationMeta {
                current_page: params.page,
                total_pages: total_pages(total_items, params.per_page),
                total_items,
                items_per_page: params.per_page,
            },
        }
    }
}
