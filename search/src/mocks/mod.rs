//! Mock implementations for testing.
//!
//! In-memory, scriptable stand-ins for the search environment.

pub mod listener;
pub mod query;

pub use listener::RecordingListener;
pub use query::MockQueryProvider;
