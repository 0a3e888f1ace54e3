//! # Cinelog Search
//!
//! Debounced, cancellable asynchronous search with item selection, independent
//! of any rendering.
//!
//! ## Features
//!
//! - **Debounce**: one query per quiet period, using the last text typed
//! - **Epoch ordering**: results are applied in the order queries started;
//!   a slow early response never overwrites a fast later one
//! - **Fail-soft**: provider errors become an empty result list and a log line
//! - **Selection**: replace (single) or toggle (multiple), keyed by item id,
//!   and independent of text and results
//!
//! ## Architecture
//!
//! A search session is a reducer run by the cinelog [`Store`](cinelog_runtime::Store):
//!
//! ```text
//! SetQueryText ─▶ Reducer ─▶ debounce timer ─▶ RunQuery ─▶ provider ─▶ QueryCompleted
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use cinelog_search::*;
//!
//! let provider = HttpQueryProvider::new(
//!     reqwest::Client::new(),
//!     "https://api.example.com/movies/search",
//! );
//! let engine = SearchEngine::new(SearchConfig::default(), provider);
//!
//! engine.set_query_text("blade runner").await?;
//! ```

pub mod actions;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod item;
pub mod presets;
pub mod providers;
pub mod reducer;
pub mod selection;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::SearchAction;
pub use config::SearchConfig;
pub use engine::SearchEngine;
pub use environment::{NoopListener, QueryProvider, SearchEnvironment, SearchEvent, SearchListener};
pub use error::QueryError;
pub use item::Item;
pub use presets::{ReferenceType, movie_search_dropdown, reference_type_filter};
pub use providers::{HttpQueryProvider, StaticQueryProvider, query_fn};
pub use reducer::{DEBOUNCE_ID, SearchReducer};
pub use selection::Selection;
pub use state::{SearchPhase, SearchState};
