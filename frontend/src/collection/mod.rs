//! The collection-view core shared by every list screen.
//!
//! Control flow: the loader fetches a collection ([`load`]), the pipeline
//! derives the filtered view ([`pipeline`]), the view state computes the
//! current page ([`view_state`]), the pager yields the visible rows
//! ([`pager`]) and the column descriptors draw them ([`columns`]). Filter,
//! search and collection changes all funnel back through the view state,
//! which resets pagination to page 1.

pub mod columns;
pub mod load;
pub mod pager;
pub mod pipeline;
pub mod view_state;
