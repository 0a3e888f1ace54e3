//! Recording listener for testing.

use crate::environment::{SearchEvent, SearchListener};
use crate::item::Item;
use std::sync::{Arc, Mutex, PoisonError};

/// Listener that keeps every event it receives.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<SearchEvent>>>,
}

impl RecordingListener {
    /// Create a new recording listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far.
    #[must_use]
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Selection carried by the most recent `SelectionChanged`.
    #[must_use]
    pub fn last_selection(&self) -> Option<Vec<Item>> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find_map(|event| match event {
                SearchEvent::SelectionChanged(items) => Some(items.clone()),
                _ => None,
            })
    }

    /// Forget recorded events.
    pub fn reset(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SearchListener for RecordingListener {
    fn on_event(&self, event: &SearchEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
