/// Pagination controls derived from the current page and total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl PaginationView {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Next is available while records remain past this page.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    /// "Page 1 of 3". An empty collection still reads "of 1".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages().max(1))
    }
}
