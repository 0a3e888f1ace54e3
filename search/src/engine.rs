//! Search engine facade.
//!
//! [`SearchEngine`] owns a [`Store`] running the [`SearchReducer`] and exposes
//! the session operations as methods. Every method returns once the state
//! change is applied; the debounce timer and queries continue in the
//! background.

use crate::actions::SearchAction;
use crate::config::SearchConfig;
use crate::environment::{NoopListener, QueryProvider, SearchEnvironment, SearchListener};
use crate::item::Item;
use crate::reducer::SearchReducer;
use crate::state::{SearchPhase, SearchState};
use cinelog_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;

type SearchStore<P, L> =
    Store<SearchState, SearchAction, SearchEnvironment<P, L>, SearchReducer<P, L>>;

/// A running search session.
///
/// Cloning yields another handle to the same session.
///
/// # Example
///
/// ```ignore
/// let engine = SearchEngine::new(SearchConfig::default(), provider);
///
/// engine.set_query_text("alien").await?;
/// // ... three seconds of silence later the query runs ...
/// let results = engine.results().await;
/// ```
pub struct SearchEngine<P, L = NoopListener>
where
    P: QueryProvider,
    L: SearchListener,
{
    store: SearchStore<P, L>,
}

impl<P> SearchEngine<P, NoopListener>
where
    P: QueryProvider,
{
    /// Start a session without a listener.
    #[must_use]
    pub fn new(config: SearchConfig, provider: P) -> Self {
        Self::with_listener(config, provider, NoopListener)
    }
}

impl<P, L> SearchEngine<P, L>
where
    P: QueryProvider,
    L: SearchListener,
{
    /// Start a session reporting to `listener`.
    #[must_use]
    pub fn with_listener(config: SearchConfig, provider: P, listener: L) -> Self {
        let state = SearchState::new(&config);
        let store = Store::new(
            state,
            SearchReducer::new(config),
            SearchEnvironment::new(provider, listener),
        );
        Self { store }
    }

    async fn send(&self, action: SearchAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    // ═══════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════

    /// Update the input text, restarting the debounce timer.
    ///
    /// Empty text clears the results and schedules nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn set_query_text(
        &self,
        text: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::SetQueryText { text: text.into() }).await
    }

    /// Run a query for `text` now, skipping the debounce period.
    ///
    /// A timer already scheduled still fires; its query supersedes this one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn run_query(&self, text: impl Into<String>) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::RunQuery { text: text.into() }).await
    }

    /// Pick `item` (replace in single mode, toggle in multiple mode).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn select_item(&self, item: Item) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::SelectItem { item }).await
    }

    /// Drop `item` from the selection if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn remove_selection(&self, item: Item) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::RemoveSelection { item }).await
    }

    /// Empty text and results; the selection is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn clear(&self) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::Clear).await
    }

    /// Empty text, results and selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn clear_all(&self) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::ClearAll).await
    }

    /// Close the results view.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn close_results(&self) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::CloseResults).await
    }

    /// Replace the selection from outside.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`SearchEngine::shutdown`].
    pub async fn sync_selection(&self, items: Vec<Item>) -> Result<EffectHandle, StoreError> {
        self.send(SearchAction::SyncSelection { items }).await
    }

    // ═══════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════

    /// Copy of the whole session state.
    pub async fn snapshot(&self) -> SearchState {
        self.store.state(Clone::clone).await
    }

    /// Current input text.
    pub async fn query_text(&self) -> String {
        self.store.state(|s| s.query_text.clone()).await
    }

    /// Current results.
    pub async fn results(&self) -> Vec<Item> {
        self.store.state(|s| s.results.clone()).await
    }

    /// Current selection, in pick order.
    pub async fn selection(&self) -> Vec<Item> {
        self.store.state(|s| s.selection.to_vec()).await
    }

    /// Current phase.
    pub async fn phase(&self) -> SearchPhase {
        self.store.state(|s| s.phase).await
    }

    /// Whether the query for the current epoch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.store.state(SearchState::is_loading).await
    }

    /// Whether the results view is open.
    pub async fn is_open(&self) -> bool {
        self.store.state(|s| s.is_open).await
    }

    /// Number of queries started so far.
    pub async fn epoch(&self) -> u64 {
        self.store.state(|s| s.epoch).await
    }

    /// The underlying store, for subscribing to actions.
    #[must_use]
    pub const fn store(&self) -> &SearchStore<P, L> {
        &self.store
    }

    /// Stop the session: the pending timer is aborted and in-flight queries
    /// are awaited for up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if queries are still running.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

impl<P, L> Clone for SearchEngine<P, L>
where
    P: QueryProvider,
    L: SearchListener,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockQueryProvider;

    fn fast() -> SearchConfig {
        SearchConfig::default().with_debounce(Duration::from_millis(20))
    }

    #[tokio::test]
    async fn query_runs_after_quiet_period() {
        let provider = MockQueryProvider::new().with_results("heat", vec![Item::new("1", "Heat")]);
        let engine = SearchEngine::new(fast(), provider.clone());

        let _ = engine.set_query_text("heat").await;
        assert_eq!(engine.phase().await, SearchPhase::Debouncing);
        assert_eq!(provider.call_count(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(provider.calls(), ["heat"]);
        assert_eq!(engine.results().await, vec![Item::new("1", "Heat")]);
        assert_eq!(engine.phase().await, SearchPhase::Idle);
    }

    #[tokio::test]
    async fn run_query_skips_debounce() {
        let provider = MockQueryProvider::new().with_results("up", vec![Item::new("2", "Up")]);
        let engine = SearchEngine::new(SearchConfig::default(), provider.clone());

        let _ = engine.run_query("up").await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(engine.results().await.len(), 1);
    }

    #[tokio::test]
    async fn shutdown_aborts_pending_timer() {
        let provider = MockQueryProvider::new();
        let engine = SearchEngine::new(fast(), provider.clone());

        let _ = engine.set_query_text("late").await;
        assert!(engine.shutdown(Duration::from_secs(1)).await.is_ok());
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(provider.call_count(), 0);
        assert!(matches!(
            engine.clear().await,
            Err(StoreError::ShutdownInProgress)
        ));
    }
}
