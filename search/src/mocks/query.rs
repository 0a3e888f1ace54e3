//! Mock query provider for testing.

use crate::environment::QueryProvider;
use crate::error::QueryError;
use crate::item::Item;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct Scripted {
    outcome: Option<Result<Vec<Item>, QueryError>>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    scripts: HashMap<String, Scripted>,
    calls: Vec<String>,
}

/// Mock query provider.
///
/// Answers from per-text scripts (unscripted text yields no items) and
/// records every call. Clones share scripts and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockQueryProvider {
    inner: Arc<Mutex<Inner>>,
}

impl MockQueryProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, text: &str, edit: impl FnOnce(&mut Scripted)) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        edit(inner.scripts.entry(text.to_string()).or_default());
    }

    /// Answer `text` with `items`.
    #[must_use]
    pub fn with_results(self, text: &str, items: Vec<Item>) -> Self {
        self.script(text, |s| s.outcome = Some(Ok(items)));
        self
    }

    /// Fail queries for `text`.
    #[must_use]
    pub fn with_failure(self, text: &str, message: &str) -> Self {
        let error = QueryError::Provider(message.to_string());
        self.script(text, |s| s.outcome = Some(Err(error)));
        self
    }

    /// Delay the answer for `text`.
    #[must_use]
    pub fn with_latency(self, text: &str, latency: Duration) -> Self {
        self.script(text, |s| s.latency = latency);
        self
    }

    /// Texts queried so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }

    /// Number of queries made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .len()
    }
}

impl QueryProvider for MockQueryProvider {
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send {
        let scripted = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.calls.push(text.to_string());
            inner.scripts.get(text).cloned().unwrap_or_default()
        };

        async move {
            if !scripted.latency.is_zero() {
                tokio::time::sleep(scripted.latency).await;
            }
            scripted.outcome.unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
