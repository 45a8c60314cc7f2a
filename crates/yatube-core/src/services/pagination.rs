//! Page math for feeds.
//!
//! Pure functions of (total record count, requested page number). Page
//! numbers are 1-based; out-of-range requests clamp to the nearest valid
//! page instead of failing, and an empty result set still has one valid
//! (empty) first page.

/// Fixed number of posts per feed page.
pub const PAGE_SIZE: u64 = 10;

/// Where a page sits inside the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// The page actually served, after clamping.
    pub number: u64,
    pub total_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Total number of pages for `total_items` records.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Resolve a requested page number against the record count.
pub fn locate(total_items: u64, page_size: u64, requested: u64) -> PageBounds {
    let pages = total_pages(total_items, page_size);
    let number = requested.clamp(1, pages);
    PageBounds {
        number,
        total_pages: pages,
        offset: (number - 1) * page_size,
        limit: page_size,
    }
}

/// One served page of a feed plus its pagination metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_division() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
        assert_eq!(total_pages(13, PAGE_SIZE), 2);
        assert_eq!(total_pages(30, PAGE_SIZE), 3);
    }

    #[test]
    fn thirteen_records_split_ten_and_three() {
        let first = locate(13, PAGE_SIZE, 1);
        assert_eq!(first.offset, 0);
        assert_eq!(first.limit, 10);
        assert_eq!(first.total_pages, 2);

        let second = locate(13, PAGE_SIZE, 2);
        assert_eq!(second.offset, 10);
        // Only three records remain past the offset; the limit stays at
        // the page size and the store returns the shorter tail.
        assert_eq!(second.number, 2);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        assert_eq!(locate(13, PAGE_SIZE, 99).number, 2);
        assert_eq!(locate(13, PAGE_SIZE, 0).number, 1);
        assert_eq!(locate(0, PAGE_SIZE, 7).number, 1);
    }

    #[test]
    fn empty_set_has_one_empty_page() {
        let bounds = locate(0, PAGE_SIZE, 1);
        assert_eq!(bounds.number, 1);
        assert_eq!(bounds.total_pages, 1);
        assert_eq!(bounds.offset, 0);
    }

    #[test]
    fn page_navigation_flags() {
        let page = Page {
            items: vec![1, 2, 3],
            number: 2,
            total_pages: 3,
            total_items: 23,
        };
        assert!(page.has_previous());
        assert!(page.has_next());

        let only = Page::<i32> {
            items: vec![],
            number: 1,
            total_pages: 1,
            total_items: 0,
        };
        assert!(!only.has_previous());
        assert!(!only.has_next());
    }
}
