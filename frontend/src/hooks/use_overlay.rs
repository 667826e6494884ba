//! App-wide "currently open overlay" registry.
//!
//! At most one transient overlay (dropdown menu, modal) is open at a time.
//! Each overlay instance takes a stable id once and toggles itself through
//! the shared registry; opening any overlay implicitly closes whichever
//! one was open before, which replaces per-instance document-level
//! click-away listeners.

use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

pub type OverlayId = u64;

/// Pointer to the single open overlay, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    open: Option<OverlayId>,
}

impl OverlayState {
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open == Some(id)
    }

    pub fn any_open(&self) -> bool {
        self.open.is_some()
    }

    fn toggled(self, id: OverlayId) -> Self {
        Self {
            open: if self.open == Some(id) { None } else { Some(id) },
        }
    }

    fn closed(self, id: OverlayId) -> Self {
        Self {
            open: if self.open == Some(id) { None } else { self.open },
        }
    }
}

pub enum OverlayAction {
    Toggle(OverlayId),
    /// Close this overlay if it is the open one; a no-op otherwise, so a
    /// late close cannot tear down a newer overlay
    Close(OverlayId),
    CloseAll,
}

impl Reducible for OverlayState {
    type Action = OverlayAction;

    fn reduce(self: Rc<Self>, action: OverlayAction) -> Rc<Self> {
        Rc::new(match action {
            OverlayAction::Toggle(id) => self.toggled(id),
            OverlayAction::Close(id) => self.closed(id),
            OverlayAction::CloseAll => OverlayState::default(),
        })
    }
}

/// Shared handle provided once near the app root via `ContextProvider`.
pub type OverlayRegistry = UseReducerHandle<OverlayState>;

thread_local! {
    static NEXT_OVERLAY_ID: Cell<OverlayId> = const { Cell::new(1) };
}

/// Allocates a stable id for one overlay instance.
#[hook]
pub fn use_overlay_id() -> OverlayId {
    *use_memo((), |_| {
        NEXT_OVERLAY_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let state = OverlayState::default();
        assert!(!state.any_open());

        let open = state.toggled(7);
        assert!(open.is_open(7));

        let closed = open.toggled(7);
        assert!(!closed.any_open());
    }

    #[test]
    fn test_opening_a_second_overlay_supersedes_the_first() {
        let state = OverlayState::default().toggled(1);
        let state = state.toggled(2);
        assert!(state.is_open(2));
        assert!(!state.is_open(1));
    }

    #[test]
    fn test_late_close_of_a_superseded_overlay_is_a_no_op() {
        let state = OverlayState::default().toggled(1).toggled(2);
        let state = state.closed(1);
        assert!(state.is_open(2));

        let state = state.closed(2);
        assert!(!state.any_open());
    }
}
