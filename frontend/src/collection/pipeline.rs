//! Filtering, free-text search and sorting applied to an in-memory
//! collection before it is paginated.
//!
//! Each screen declares its filters once as named predicates plus a set of
//! searchable fields; the pipeline then derives the visible subset from the
//! raw collection on every render. Filters are conjunctive and predicates
//! must be pure, so the order they are registered in does not change the
//! result.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Dropdown sentinel meaning "no constraint"
pub const ALL: &str = "all";

/// Currently selected filter values plus the free-text search query for one
/// screen. The sentinel [`ALL`] (or an empty string) leaves the collection
/// untouched for that filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    values: BTreeMap<&'static str, String>,
    search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// Selected value for a dropdown, [`ALL`] when nothing was picked yet
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or(ALL)
    }

    /// The constraining value for `name`, or `None` when the filter is
    /// inactive (unset, sentinel, or blank)
    pub fn active(&self, name: &str) -> Option<&str> {
        match self.values.get(name).map(String::as_str) {
            None => None,
            Some(v) if v.is_empty() || v == ALL => None,
            Some(v) => Some(v),
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }
}

type FilterPredicate<T> = Box<dyn Fn(&T, &str) -> bool>;

/// Declarative filter/search/sort configuration for one collection type.
///
/// Built once per screen with the builder methods, then applied to the raw
/// collection together with the screen's [`FilterState`].
pub struct Pipeline<T> {
    filters: Vec<(&'static str, FilterPredicate<T>)>,
    search_fields: Option<Box<dyn Fn(&T) -> Vec<String>>>,
    sort: Option<Box<dyn Fn(&T, &T) -> Ordering>>,
}

impl<T: Clone> Pipeline<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            search_fields: None,
            sort: None,
        }
    }

    /// Registers a named predicate. The predicate receives the item and the
    /// active filter value; it is only consulted while the filter is active.
    pub fn filter(mut self, name: &'static str, predicate: impl Fn(&T, &str) -> bool + 'static) -> Self {
        self.filters.push((name, Box::new(predicate)));
        self
    }

    /// Declares the fields the free-text search matches against.
    pub fn search_fields(mut self, fields: impl Fn(&T) -> Vec<String> + 'static) -> Self {
        self.search_fields = Some(Box::new(fields));
        self
    }

    /// Comparator applied after filtering. Sorting is stable, so items that
    /// compare equal keep their relative input order; callers wanting a
    /// deterministic tie-break chain a secondary key with `then_with`.
    pub fn sort_by(mut self, compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    /// Derives the visible subset: active filters (AND), then search, then
    /// sort. An empty result is a valid outcome, not an error.
    pub fn apply(&self, items: &[T], state: &FilterState) -> Vec<T> {
        let query = state.search().trim().to_lowercase();

        let mut out: Vec<T> = items
            .iter()
            .filter(|item| {
                self.filters.iter().all(|(name, predicate)| match state.active(name) {
                    Some(value) => predicate(item, value),
                    None => true,
                })
            })
            .filter(|item| {
                if query.is_empty() {
                    return true;
                }
                match &self.search_fields {
                    Some(fields) => fields(item)
                        .iter()
                        .any(|field| field.to_lowercase().contains(&query)),
                    None => true,
                }
            })
            .cloned()
            .collect();

        if let Some(compare) = &self.sort {
            out.sort_by(|a, b| compare(a, b));
        }
        out
    }
}

impl<T: Clone> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        sector: &'static str,
        community: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Water trucking", sector: "WASH", community: "Kingston 6" },
            Row { name: "Shelter kits", sector: "Shelter", community: "Portmore" },
            Row { name: "Chlorination", sector: "WASH", community: "Spanish Town" },
            Row { name: "School meals", sector: "Education", community: "May Pen" },
            Row { name: "Clinic support", sector: "Health", community: "Mandeville" },
            Row { name: "Cash transfers", sector: "Food Security", community: "Savanna-la-Mar" },
            Row { name: "GBV referrals", sector: "Protection", community: "Montego Bay" },
        ]
    }

    fn pipeline() -> Pipeline<Row> {
        Pipeline::new()
            .filter("sector", |row: &Row, value| row.sector == value)
            .search_fields(|row: &Row| vec![row.name.to_string(), row.community.to_string()])
    }

    #[test]
    fn test_sentinel_values_do_not_constrain() {
        let rows = rows();
        let pipeline = pipeline();

        let mut state = FilterState::new();
        assert_eq!(pipeline.apply(&rows, &state).len(), rows.len());

        state.set("sector", ALL);
        state.set_search("");
        assert_eq!(pipeline.apply(&rows, &state).len(), rows.len());
    }

    #[test]
    fn test_sector_filter_narrows_to_matches() {
        let rows = rows();
        let pipeline = pipeline();
        let mut state = FilterState::new();
        state.set("sector", "WASH");

        let filtered = pipeline.apply(&rows, &state);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|row| row.sector == "WASH"));
    }

    #[test]
    fn test_filters_and_search_are_conjunctive() {
        let rows = rows();
        let pipeline = pipeline();
        let mut state = FilterState::new();
        state.set("sector", "WASH");
        state.set_search("kingston");

        let filtered = pipeline.apply(&rows, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Water trucking");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = rows();
        let pipeline = pipeline();
        let mut state = FilterState::new();
        state.set_search("kingston");

        let filtered = pipeline.apply(&rows, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].community, "Kingston 6");

        state.set_search("  KINGSTON  ");
        assert_eq!(pipeline.apply(&rows, &state).len(), 1);

        state.set_search("nowhere");
        assert!(pipeline.apply(&rows, &state).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let rows = rows();
        let pipeline = pipeline();
        let mut state = FilterState::new();
        state.set("sector", "WASH");
        state.set_search("a");

        let once = pipeline.apply(&rows, &state);
        let twice = pipeline.apply(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_applies_after_filtering_with_secondary_key() {
        let rows = vec![
            Row { name: "Borehole rehab", sector: "WASH", community: "B" },
            Row { name: "Aquatabs", sector: "WASH", community: "A" },
            Row { name: "Shelter kits", sector: "Shelter", community: "C" },
        ];
        let pipeline = Pipeline::new()
            .filter("sector", |row: &Row, value| row.sector == value)
            .sort_by(|a: &Row, b: &Row| a.sector.cmp(b.sector).then_with(|| a.name.cmp(b.name)));

        let state = FilterState::new();
        let sorted = pipeline.apply(&rows, &state);
        assert_eq!(
            sorted.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["Shelter kits", "Aquatabs", "Borehole rehab"],
        );
    }

    #[test]
    fn test_stable_sort_preserves_input_order_on_ties() {
        let rows = vec![
            Row { name: "First", sector: "WASH", community: "X" },
            Row { name: "Second", sector: "WASH", community: "Y" },
        ];
        let pipeline: Pipeline<Row> =
            Pipeline::new().sort_by(|a: &Row, b: &Row| a.sector.cmp(b.sector));

        let sorted = pipeline.apply(&rows, &FilterState::new());
        assert_eq!(sorted[0].name, "First");
        assert_eq!(sorted[1].name, "Second");
    }
}
