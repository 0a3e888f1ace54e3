//! Query providers.
//!
//! Concrete [`QueryProvider`](crate::environment::QueryProvider)
//! implementations: an HTTP endpoint, a fixed in-memory list, and an adapter
//! for async closures.

pub mod func;
pub mod http;
pub mod memory;

pub use func::{FnQueryProvider, query_fn};
pub use http::HttpQueryProvider;
pub use memory::StaticQueryProvider;
