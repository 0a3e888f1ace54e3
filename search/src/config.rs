//! Search engine configuration.

use crate::item::Item;
use std::time::Duration;

/// Default quiet period before a query fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(3000);

/// Default number of results kept from a query.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration for one search session.
///
/// # Examples
///
/// ```
/// use cinelog_search::SearchConfig;
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_debounce(Duration::from_millis(300))
///     .with_max_results(5)
///     .with_multiple(true);
///
/// assert!(config.multiple);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Inactivity period after the last keystroke before the query runs.
    ///
    /// Default: 3000 ms
    pub debounce: Duration,

    /// Results beyond this count are dropped.
    ///
    /// Default: 10
    pub max_results: usize,

    /// Multiple selection (toggle) instead of single selection (replace).
    ///
    /// Default: `false`
    pub multiple: bool,

    /// Initial selection.
    pub selected_items: Vec<Item>,
}

impl SearchConfig {
    /// Set the debounce period.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the maximum number of results.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Switch between single and multiple selection.
    #[must_use]
    pub const fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Seed the selection.
    #[must_use]
    pub fn with_selected_items(mut self, items: Vec<Item>) -> Self {
        self.selected_items = items;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            max_results: DEFAULT_MAX_RESULTS,
            multiple: false,
            selected_items: Vec::new(),
        }
    }
}
