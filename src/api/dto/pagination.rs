//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters (`?page=2&pageSize=50`).
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "Page must be greater than 0"))]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts to offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `pageSize`: 25
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), AppError> {
        self.validate()?;

        let offset = i64::from(self.page() - 1) * i64::from(self.page_size());
        let limit = i64::from(self.page_size());

        Ok((offset, limit))
    }

    /// Number of pages needed for `total_items`.
    pub fn total_pages(&self, total_items: i64) -> u32 {
        let page_size = i64::from(self.page_size().max(1));
        let pages = (total_items.max(0) + page_size - 1) / page_size;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
