//! Page arithmetic for the list screens.
//!
//! Pure functions only: given a filtered collection and a 1-based page
//! number, compute the visible slice and the page count. Every list view
//! in the app goes through `slice_page` so the "Page 1 of 1" empty state
//! and the clamping rules are identical everywhere.

/// One page of a collection, as produced by [`slice_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items visible on this page
    pub items: &'a [T],
    /// The page actually shown, clamped into `[1, total_pages]`
    pub page: usize,
    /// Always at least 1, even for an empty collection
    pub total_pages: usize,
    /// Length of the collection the page was cut from
    pub total_items: usize,
    page_size: usize,
}

impl<'a, T> Page<'a, T> {
    /// 1-based index of the first visible item, 0 when the page is empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last visible item, 0 when the page is empty
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + self.items.len()
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cuts `items` down to the requested page.
///
/// The requested page number is clamped into `[1, total_pages]`, so callers
/// must not assume the page they asked for is the page they get. An empty
/// collection yields an empty slice and a page count of 1.
pub fn slice_page<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    };
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: &items[start.min(total_items)..end],
        page,
        total_pages,
        total_items,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_partition_the_collection() {
        let items: Vec<u32> = (0..23).collect();
        let first = slice_page(&items, 1, 10);
        assert_eq!(first.total_pages, 3);

        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            rebuilt.extend_from_slice(slice_page(&items, page, 10).items);
        }
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn test_twenty_three_items_across_three_pages() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(slice_page(&items, 1, 10).items.len(), 10);
        assert_eq!(slice_page(&items, 2, 10).items.len(), 10);
        let last = slice_page(&items, 3, 10);
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.first_index(), 21);
        assert_eq!(last.last_index(), 23);
    }

    #[test]
    fn test_out_of_range_pages_clamp_to_the_boundary() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(slice_page(&items, 0, 10), slice_page(&items, 1, 10));
        assert_eq!(slice_page(&items, 99, 10), slice_page(&items, 3, 10));
        // Clamping is idempotent: re-requesting the clamped page changes nothing
        let clamped = slice_page(&items, 99, 10);
        assert_eq!(slice_page(&items, clamped.page, 10), clamped);
    }

    #[test]
    fn test_empty_collection_is_page_one_of_one() {
        let items: Vec<u32> = Vec::new();
        let page = slice_page(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.first_index(), 0);
        assert_eq!(page.last_index(), 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_exact_multiple_has_no_phantom_page() {
        let items: Vec<u32> = (0..20).collect();
        let page = slice_page(&items, 1, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(slice_page(&items, 2, 10).items.len(), 10);
    }

    #[test]
    fn test_navigation_flags() {
        let items: Vec<u32> = (0..23).collect();
        let first = slice_page(&items, 1, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());
        let middle = slice_page(&items, 2, 10);
        assert!(middle.has_previous());
        assert!(middle.has_next());
        let last = slice_page(&items, 3, 10);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}
