//! Hook combining the collection loader with the per-screen view state.
//!
//! This is the one place where "something changed, go back to page 1" is
//! enforced: filter and search updates reset through
//! [`CollectionViewState`], and every fresh delivery from the loader
//! triggers `on_collection_replaced`.

use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;

use crate::collection::load::LoadState;
use crate::collection::view_state::{CollectionViewState, ViewMode};
use crate::hooks::use_collection::{use_collection, UseCollectionResult};
use crate::services::api::ApiError;

/// Loader state plus view state plus the mutation callbacks, bundled for
/// one screen.
pub struct CollectionViewHandle<T> {
    pub items: Option<Rc<Vec<T>>>,
    pub state: LoadState<Rc<Vec<T>>>,
    pub view: CollectionViewState,
    pub set_filter: Callback<(&'static str, String)>,
    pub set_search: Callback<String>,
    pub set_page: Callback<usize>,
    pub set_view_mode: Callback<ViewMode>,
    pub refresh: Callback<()>,
}

impl<T> CollectionViewHandle<T> {
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.state.error()
    }
}

#[hook]
pub fn use_collection_view<T, D, F, Fut>(
    items_per_page: usize,
    initial_mode: ViewMode,
    deps: D,
    fetch: F,
) -> CollectionViewHandle<T>
where
    T: PartialEq + 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let UseCollectionResult {
        state,
        items,
        version,
        refresh,
    } = use_collection(deps, fetch);

    let view = use_state(|| CollectionViewState::new(items_per_page).with_view_mode(initial_mode));

    {
        // A fresh delivery may have fewer pages than the one on screen
        let view = view.clone();
        use_effect_with(version, move |_| {
            let mut next = (*view).clone();
            next.on_collection_replaced();
            view.set(next);
        });
    }

    let set_filter = {
        let view = view.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            let mut next = (*view).clone();
            next.set_filter(name, value);
            view.set(next);
        })
    };

    let set_search = {
        let view = view.clone();
        Callback::from(move |query: String| {
            let mut next = (*view).clone();
            next.set_search(query);
            view.set(next);
        })
    };

    let set_page = {
        let view = view.clone();
        Callback::from(move |page: usize| {
            let mut next = (*view).clone();
            next.set_page(page);
            view.set(next);
        })
    };

    let set_view_mode = {
        let view = view.clone();
        Callback::from(move |mode: ViewMode| {
            let mut next = (*view).clone();
            next.set_view_mode(mode);
            view.set(next);
        })
    };

    CollectionViewHandle {
        items,
        state,
        view: (*view).clone(),
        set_filter,
        set_search,
        set_page,
        set_view_mode,
        refresh,
    }
}
