//! Hook wiring the collection store to a screen's fetch function.

use std::future::Future;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::collection::load::{CollectionStore, LoadState, RequestSeq};
use crate::services::api::ApiError;

/// Snapshot handed back to the screen on every render.
pub struct UseCollectionResult<T> {
    /// Current machine state, for spinners and error banners
    pub state: LoadState<Rc<Vec<T>>>,
    /// The collection to render right now; survives refetches and failures
    pub items: Option<Rc<Vec<T>>>,
    /// Counts successful deliveries (see [`CollectionStore::version`])
    pub version: u64,
    /// User-initiated retry; there are no automatic ones
    pub refresh: Callback<()>,
}

/// Loads a collection and refetches whenever `deps` changes.
///
/// `deps` is the full identity of the request (typically the API client,
/// whose auth session is part of its equality, plus any query inputs).
/// When a fetch is superseded before it resolves, the stale response is
/// discarded rather than applied out of order.
#[hook]
pub fn use_collection<T, D, F, Fut>(deps: D, fetch: F) -> UseCollectionResult<T>
where
    T: 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let store = use_state(CollectionStore::<T>::new);
    let seq = use_mut_ref(RequestSeq::new);
    let reload_tick = use_state(|| 0u32);

    {
        let store = store.clone();
        let seq = seq.clone();
        use_effect_with((deps, *reload_tick), move |(deps, _): &(D, u32)| {
            let ticket = seq.borrow_mut().begin();
            let mut loading = (*store).clone();
            loading.begin_load();
            store.set(loading.clone());

            let fut = fetch(deps.clone());
            spawn_local(async move {
                let result = fut.await;
                if seq.borrow().is_current(ticket) {
                    let mut resolved = loading;
                    resolved.resolve(result);
                    store.set(resolved);
                }
            });
        });
    }

    let refresh = {
        let reload_tick = reload_tick.clone();
        Callback::from(move |_| reload_tick.set(reload_tick.wrapping_add(1)))
    };

    UseCollectionResult {
        state: store.state().clone(),
        items: store.displayed().cloned(),
        version: store.version(),
        refresh,
    }
}
