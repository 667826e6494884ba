//! Load-state machine and request sequencing for collection fetches.
//!
//! The store keeps the last successfully loaded collection visible while a
//! refetch is outstanding (stale-while-revalidate), and the request
//! sequence enforces last-request-wins: a response belonging to a
//! superseded fetch is discarded instead of overwriting newer data.

use std::rc::Rc;

use crate::services::api::ApiError;

/// Lifecycle of one collection fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(ApiError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Monotone counter implementing last-request-wins.
///
/// Every fetch takes a ticket from `begin`; when its response arrives it
/// only applies if the ticket is still the newest one issued. Superseded
/// fetches are not aborted at the transport level, only ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// Collection slot for one screen: the current [`LoadState`] plus the last
/// good collection retained for display while a refetch is in flight.
#[derive(Debug)]
pub struct CollectionStore<T> {
    state: LoadState<Rc<Vec<T>>>,
    displayed: Option<Rc<Vec<T>>>,
    version: u64,
}

impl<T> CollectionStore<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            displayed: None,
            version: 0,
        }
    }

    /// Marks a fetch as outstanding without clearing what is on screen.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Applies a fetch outcome. A success replaces the collection
    /// wholesale; a failure keeps the previous collection displayed with
    /// the error flagged alongside it.
    pub fn resolve(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => {
                let items = Rc::new(items);
                self.displayed = Some(Rc::clone(&items));
                self.state = LoadState::Loaded(items);
                self.version += 1;
            }
            Err(error) => {
                self.state = LoadState::Failed(error);
            }
        }
    }

    pub fn state(&self) -> &LoadState<Rc<Vec<T>>> {
        &self.state
    }

    /// Counts successful deliveries; increments even when a refetch returns
    /// content identical to the previous collection, so "collection
    /// replaced" consumers fire on every delivery.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The collection the screen should render right now, regardless of an
    /// in-flight refetch or a failed one.
    pub fn displayed(&self) -> Option<&Rc<Vec<T>>> {
        self.displayed.as_ref()
    }
}

impl<T> Default for CollectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CollectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            displayed: self.displayed.clone(),
            version: self.version,
        }
    }
}

impl<T: PartialEq> PartialEq for CollectionStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.displayed == other.displayed
            && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_ok(values: &[u32]) -> Result<Vec<u32>, ApiError> {
        Ok(values.to_vec())
    }

    #[test]
    fn test_load_transitions() {
        let mut store = CollectionStore::new();
        assert!(store.state().is_loading());
        assert_eq!(store.displayed(), None);

        store.resolve(fetch_ok(&[1, 2, 3]));
        assert_eq!(store.state().data().map(|d| d.len()), Some(3));

        store.begin_load();
        assert!(store.state().is_loading());

        store.resolve(Err(ApiError::Network("connection refused".to_string())));
        assert!(store.state().error().is_some());
    }

    #[test]
    fn test_failure_keeps_previous_collection_displayed() {
        let mut store = CollectionStore::new();
        store.resolve(fetch_ok(&[1, 2, 3]));
        store.begin_load();

        // Still showing the stale data while the refetch is outstanding
        assert!(store.state().is_loading());
        assert_eq!(store.displayed().map(|d| d.len()), Some(3));

        store.resolve(Err(ApiError::Network("timed out".to_string())));
        assert_eq!(store.displayed().map(|d| d.len()), Some(3));
        assert!(store.state().error().is_some());
    }

    #[test]
    fn test_success_replaces_the_collection_wholesale() {
        let mut store = CollectionStore::new();
        store.resolve(fetch_ok(&[1, 2, 3]));
        store.begin_load();
        store.resolve(fetch_ok(&[9]));
        assert_eq!(store.displayed().map(|d| d.as_slice()), Some([9].as_slice()));
    }

    #[test]
    fn test_version_counts_deliveries_not_content_changes() {
        let mut store = CollectionStore::new();
        assert_eq!(store.version(), 0);
        store.resolve(fetch_ok(&[1]));
        assert_eq!(store.version(), 1);

        // Identical content still counts as a fresh delivery
        store.begin_load();
        store.resolve(fetch_ok(&[1]));
        assert_eq!(store.version(), 2);

        // Failures do not
        store.begin_load();
        store.resolve(Err(ApiError::NotFound));
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_superseded_request_is_discarded() {
        let mut store = CollectionStore::new();
        let mut seq = RequestSeq::new();

        let first = seq.begin();
        let second = seq.begin();

        // Second request resolves first and wins
        if seq.is_current(second) {
            store.resolve(fetch_ok(&[42]));
        }

        // The first response arrives late and must not be applied
        if seq.is_current(first) {
            store.resolve(fetch_ok(&[1]));
        }

        assert_eq!(store.displayed().map(|d| d.as_slice()), Some([42].as_slice()));
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_every_new_request_supersedes_the_previous() {
        let mut seq = RequestSeq::new();
        let a = seq.begin();
        assert!(seq.is_current(a));
        let b = seq.begin();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }
}
