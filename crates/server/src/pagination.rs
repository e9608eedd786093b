use serde::Deserialize;

pub const PER_PAGE: u64 = 25;
pub const MAX_PER_PAGE: u64 = 100;
pub const MAX_PAGES: u64 = 10000;

/// 1-based page selection with an optional page size.
#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    page: u64,

    #[serde(default)]
    size: Option<u64>,
}

impl Pagination {
    pub fn limit(&self) -> u64 {
        self.size.unwrap_or(PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> u64 {
        self.page.min(MAX_PAGES).saturating_sub(1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::{Pagination, MAX_PER_PAGE, PER_PAGE};

    #[test]
    fn defaults() {
        let pagination = Pagination {
            page: 0,
            size: None,
        };

        assert_eq!(pagination.limit(), PER_PAGE);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn explicit_page_size() {
        let pagination = Pagination {
            page: 3,
            size: Some(2),
        };

        assert_eq!(pagination.limit(), 2);
        assert_eq!(pagination.offset(), 4);
    }

    #[test]
    fn clamped_page_size() {
        let huge = Pagination {
            page: 1,
            size: Some(10_000),
        };
        let empty = Pagination {
            page: 2,
            size: Some(0),
        };

        assert_eq!(huge.limit(), MAX_PER_PAGE);
        assert_eq!(empty.limit(), 1);
        assert_eq!(empty.offset(), 1);
    }
}
