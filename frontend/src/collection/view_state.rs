//! Per-screen view state: selected filters, pagination and view mode.
//!
//! One `CollectionViewState` is the single owner of this state for a
//! screen. Anything that changes which items are visible (a filter, the
//! search query, a freshly loaded collection) snaps the pagination back to
//! page 1 so the screen never points past the end of the new result.

use super::pager::{slice_page, Page};
use super::pipeline::FilterState;

/// How a list screen presents its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Cards,
    Table,
    Map,
}

/// Filter, pagination and view-mode state for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionViewState {
    pub filters: FilterState,
    page: usize,
    items_per_page: usize,
    pub view_mode: ViewMode,
}

impl CollectionViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            filters: FilterState::new(),
            page: 1,
            items_per_page: items_per_page.max(1),
            view_mode: ViewMode::Cards,
        }
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Requested page; the effective page is clamped by [`Self::paginate`]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Selects a dropdown filter value and resets to page 1.
    pub fn set_filter(&mut self, name: &'static str, value: impl Into<String>) {
        self.filters.set(name, value);
        self.page = 1;
    }

    /// Updates the search query and resets to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filters.set_search(query);
        self.page = 1;
    }

    /// Moves to another page without touching filters. Values below 1 are
    /// lifted to 1; the upper bound is applied against the current filtered
    /// collection when the page is cut.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Called when the loader delivers a new collection; the fresh data may
    /// have fewer pages than the one currently shown.
    pub fn on_collection_replaced(&mut self) {
        self.page = 1;
    }

    /// Cuts the current page out of the already-filtered collection.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        slice_page(items, self.page, self.items_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_a_filter_resets_to_page_one() {
        let mut view = CollectionViewState::new(10);
        view.set_page(3);
        assert_eq!(view.page(), 3);

        view.set_filter("sector", "WASH");
        assert_eq!(view.page(), 1);
        assert_eq!(view.filters.active("sector"), Some("WASH"));
    }

    #[test]
    fn test_setting_the_search_resets_to_page_one() {
        let mut view = CollectionViewState::new(10);
        view.set_page(5);
        view.set_search("kingston");
        assert_eq!(view.page(), 1);
        assert_eq!(view.filters.search(), "kingston");
    }

    #[test]
    fn test_collection_replacement_resets_to_page_one() {
        let mut view = CollectionViewState::new(10);
        view.set_page(4);
        view.on_collection_replaced();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_set_page_leaves_filters_alone() {
        let mut view = CollectionViewState::new(10);
        view.set_filter("sector", "Health");
        view.set_page(2);
        assert_eq!(view.filters.active("sector"), Some("Health"));
        assert_eq!(view.page(), 2);

        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_pagination_never_points_past_the_filtered_result() {
        let mut view = CollectionViewState::new(10);
        let items: Vec<u32> = (0..23).collect();
        view.set_page(99);
        let page = view.paginate(&items);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);

        // A shrunken (filtered) collection clamps harder
        let narrowed: Vec<u32> = (0..2).collect();
        let page = view.paginate(&narrowed);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_filter_narrowing_recomputes_total_pages() {
        // 7 rows, 2 of them WASH, 5-per-page: filtered total must come
        // from the 2 matches, not the 7 inputs.
        let rows = ["WASH", "Shelter", "WASH", "Health", "Education", "Protection", "CCCM"];
        let mut view = CollectionViewState::new(5);
        view.set_filter("sector", "WASH");

        let filtered: Vec<&&str> = rows.iter().filter(|s| **s == "WASH").collect();
        let page = view.paginate(&filtered);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_view_mode_switching() {
        let mut view = CollectionViewState::new(10).with_view_mode(ViewMode::Table);
        assert_eq!(view.view_mode, ViewMode::Table);
        view.set_view_mode(ViewMode::Map);
        assert_eq!(view.view_mode, ViewMode::Map);
        // Switching the presentation does not move the page
        view.set_page(2);
        view.set_view_mode(ViewMode::Cards);
        assert_eq!(view.page(), 2);
    }
}
