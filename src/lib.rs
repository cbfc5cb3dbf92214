//! # rollcall - Virtualized Customer Directory
//!
//! Browse, search, filter, sort and select across a million synthetic customer records in
//! the terminal, materializing only the rows that intersect the viewport.
//!
//! ## Architecture
//!
//! Data flows one way: store -> query engine -> windower -> rendered rows.
//!
//! - [`error`] - Centralized error types
//! - [`config`] - Viewer configuration and its optional TOML file
//! - [`store`] - The immutable record store and its deterministic generator
//! - [`query`] - Search, filters and sort producing a [`query::View`]
//! - [`viewport`] - Scroll offset to materialized row range
//! - [`selection`] - Selected record identities, independent of the view
//! - [`input`] / [`render`] - Terminal key bindings and drawing
//! - [`app`] - The session owner and event loop

pub mod config;
pub mod error;
pub mod query;
pub mod selection;
pub mod store;
pub mod viewport;

pub mod input;
pub mod render;

pub mod app;

pub use error::{Result, RollcallError};

pub use app::{Application, Session};
pub use config::ViewerConfig;
pub use query::{Filter, FilterSet, SortDirection, SortField, SortPreset, SortState, View};
pub use selection::SelectionSet;
pub use store::{Record, RecordId, RecordStore};
pub use viewport::{compute_range, ViewportState, WindowRange, Windower};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
