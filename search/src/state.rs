//! Search session state.

use crate::config::SearchConfig;
use crate::item::Item;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};

/// Where the session is on the query path.
///
/// ```text
/// Idle ──text──▶ Debouncing ──timer──▶ Loading ──completion──▶ Idle
///   ▲                 │                   │
///   └──── empty text / clear ─────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    /// Nothing scheduled, nothing in flight for the current epoch.
    #[default]
    Idle,

    /// A query is scheduled and waiting for the quiet period to elapse.
    Debouncing,

    /// The query for the current epoch is in flight.
    Loading,
}

/// State of one search control.
///
/// Owned by a single engine; never shared across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Raw text as last typed (or echoed after a single selection).
    pub query_text: String,

    /// Results of the latest applied query, at most `max_results` long.
    pub results: Vec<Item>,

    /// Incremented each time a query fires or the session is cleared.
    ///
    /// A completion carrying any other epoch is stale and discarded.
    pub epoch: u64,

    /// Picked items.
    pub selection: Selection,

    /// Query path phase.
    pub phase: SearchPhase,

    /// Whether the results view is open.
    pub is_open: bool,
}

impl SearchState {
    /// Initial state for `config`, seeded with its selected items.
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            selection: Selection::from_items(
                config.selected_items.iter().cloned(),
                config.multiple,
            ),
            ..Self::default()
        }
    }

    /// Whether the query for the current epoch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Whether a query is waiting on the debounce timer.
    #[must_use]
    pub fn is_debouncing(&self) -> bool {
        self.phase == SearchPhase::Debouncing
    }

    /// Bump the epoch so that every in-flight completion becomes stale.
    pub(crate) fn invalidate(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_seeds_selection_from_config() {
        let config = SearchConfig::default()
            .with_multiple(true)
            .with_selected_items(vec![Item::new("1", "Heat"), Item::new("2", "Ronin")]);

        let state = SearchState::new(&config);

        assert_eq!(state.selection.len(), 2);
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(!state.is_open);
        assert_eq!(state.epoch, 0);
    }

    #[test]
    fn single_mode_seed_keeps_first() {
        let config = SearchConfig::default()
            .with_selected_items(vec![Item::new("1", "Heat"), Item::new("2", "Ronin")]);

        let state = SearchState::new(&config);

        assert_eq!(state.selection.items(), &[Item::new("1", "Heat")]);
    }
}
