//! Mock implementations for testing.
//!
//! In-memory account endpoints and helpers to mint unsigned tokens. For
//! storage use [`MemoryStorage`](crate::providers::MemoryStorage).

pub mod api;
pub mod token;

pub use api::MockAuthApi;
pub use token::{issue_raw_token, issue_token, user_claims};
