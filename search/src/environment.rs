//! Search environment.
//!
//! The two collaborators a search session talks to: the query provider it
//! asks for results, and the listener it reports changes to.

use crate::error::QueryError;
use crate::item::Item;
use std::future::Future;
use std::sync::Arc;

/// Source of search results.
///
/// # Contract
///
/// Implementations should report failures as [`QueryError`] rather than
/// panic. The engine turns any error into an empty result list.
pub trait QueryProvider: Send + Sync + 'static {
    /// Look up items matching `text`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the backend is unreachable or its response
    /// cannot be interpreted.
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send;
}

impl<P: QueryProvider> QueryProvider for Arc<P> {
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send {
        (**self).query(text)
    }
}

/// Notification sent to the owner of a search control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The selection changed; carries the full new selection.
    SelectionChanged(Vec<Item>),

    /// An item was picked in single mode.
    Selected(Item),

    /// The input text changed.
    Changed(String),

    /// The input was cleared.
    Cleared,
}

/// Receiver of [`SearchEvent`]s.
///
/// Called inline while the session state is locked, so it must return
/// quickly and must not call back into the engine.
pub trait SearchListener: Send + Sync + 'static {
    /// Handle one event.
    fn on_event(&self, event: &SearchEvent);
}

impl<F> SearchListener for F
where
    F: Fn(&SearchEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &SearchEvent) {
        self(event);
    }
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SearchListener for NoopListener {
    fn on_event(&self, _event: &SearchEvent) {}
}

/// Search environment.
///
/// # Type Parameters
///
/// - `P`: Query provider
/// - `L`: Event listener
pub struct SearchEnvironment<P, L = NoopListener> {
    /// Query provider.
    pub provider: Arc<P>,

    /// Event listener.
    pub listener: Arc<L>,
}

impl<P, L> SearchEnvironment<P, L> {
    /// Create a new environment.
    #[must_use]
    pub fn new(provider: P, listener: L) -> Self {
        Self {
            provider: Arc::new(provider),
            listener: Arc::new(listener),
        }
    }
}

impl<P> SearchEnvironment<P, NoopListener> {
    /// Environment without a listener.
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self::new(provider, NoopListener)
    }
}

impl<P, L> Clone for SearchEnvironment<P, L> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<P, L: SearchListener> SearchEnvironment<P, L> {
    pub(crate) fn emit(&self, event: SearchEvent) {
        self.listener.on_event(&event);
    }
}
