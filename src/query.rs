//! Query pipeline: search, filter and sort over the record store.
//!
//! - [`filter`] - typed filter descriptors and the AND-combined set
//! - [`sort`] - sort fields, directions and header-click cycling
//! - [`engine`] - the full-store pass producing a [`View`]
//! - [`debounce`] - trailing-edge debouncer for search text
//! - [`state`] - the owner of the current query

pub mod debounce;
pub mod engine;
pub mod filter;
pub mod sort;
pub mod state;

pub use debounce::Debouncer;
pub use engine::{apply, View};
pub use filter::{Filter, FilterSet};
pub use sort::{SortDirection, SortField, SortPreset, SortState};
pub use state::QueryState;
