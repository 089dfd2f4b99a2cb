//! Pagination types shared by handlers, services and the repository layer.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;

/// Raw pagination query parameters (`?page=&size=`), zero-based pages
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0)
    pub page: Option<u64>,
    /// Page size (default 20, clamped to the configured maximum)
    pub size: Option<u64>,
}

impl PageParams {
    /// Applies defaults and clamps the size to `[1, max_size]`.
    ///
    /// Fails when the row offset `page * size` does not fit a signed 64-bit
    /// integer, which is the widest offset the database accepts.
    pub fn resolve(&self, default_size: u64, max_size: u64) -> Result<PageRequest, ServiceError> {
        let size = self.size.unwrap_or(default_size).min(max_size).max(1);
        let page = self.page.unwrap_or(0);
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(PageRequest { page, size }),
            _ => Err(ServiceError::BadRequest(format!(
                "Page index {} is too large for page size {}",
                page, size
            ))),
        }
    }
}

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }
}

/// Paginated response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
