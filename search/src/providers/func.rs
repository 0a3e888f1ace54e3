//! Closure-backed query provider.

use crate::environment::QueryProvider;
use crate::error::QueryError;
use crate::item::Item;
use std::future::Future;

/// Provider that delegates to an async closure.
///
/// Created with [`query_fn`].
#[derive(Clone)]
pub struct FnQueryProvider<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnQueryProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnQueryProvider").finish_non_exhaustive()
    }
}

/// Wrap an async closure as a [`QueryProvider`].
///
/// The closure receives an owned copy of the text.
///
/// # Examples
///
/// ```
/// use cinelog_search::{Item, query_fn};
///
/// let provider = query_fn(|text: String| async move {
///     Ok(vec![Item::new(text.clone(), text)])
/// });
/// # let _ = provider;
/// ```
pub const fn query_fn<F, Fut>(f: F) -> FnQueryProvider<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Item>, QueryError>> + Send,
{
    FnQueryProvider { f }
}

impl<F, Fut> QueryProvider for FnQueryProvider<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Item>, QueryError>> + Send,
{
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send {
        (self.f)(text.to_owned())
    }
}
