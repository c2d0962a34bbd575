pub mod comment_service;
pub mod user_service;
pub mod vacancy_service;

use crate::database::store::Page;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

/// Resolved pagination: 1-based page number, page size and store window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn store_page(self) -> Page {
        Page {
            limit: self.per_page,
            offset: (self.page - 1).saturating_mul(self.per_page),
        }
    }

    pub fn total_pages(self, total: i64) -> i64 {
        (total + self.per_page - 1) / self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_size() {
        let window = PageWindow::new(Some(0), Some(1000));
        assert_eq!(window, PageWindow { page: 1, per_page: 100 });

        let window = PageWindow::new(None, None);
        assert_eq!(window.store_page(), Page { limit: 20, offset: 0 });

        let window = PageWindow::new(Some(3), Some(10));
        assert_eq!(window.store_page(), Page { limit: 10, offset: 20 });
    }

    #[test]
    fn total_pages_rounds_up() {
        let window = PageWindow::new(None, Some(10));
        assert_eq!(window.total_pages(0), 0);
        assert_eq!(window.total_pages(10), 1);
        assert_eq!(window.total_pages(11), 2);
    }
}
