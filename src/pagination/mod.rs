//! Append-only, single-flight pagination
//!
//! `PaginatedList` is the synchronous state machine: every transition into
//! loading hands back a `PageRequest` ticket, and `complete` applies the
//! outcome of exactly that request. `Pager` pairs the state machine with a
//! `PageSource` and awaits fetches in place; `spawn_fetch` runs a fetch on the
//! runtime for callers that need to keep drawing while it is pending.

pub mod pager;
pub mod state;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use pager::{spawn_fetch, PageCompletion, Pager};
pub use state::{ListPhase, PageRequest, PageState, PaginatedList, FETCH_ERROR_MESSAGE};
pub use view::{ListView, LoadMore, LOADING_LABEL, LOAD_MORE_LABEL};
