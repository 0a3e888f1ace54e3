//! Search actions.
//!
//! Everything that can happen to a search session: user input, the debounce
//! timer firing, and query completions fed back by effects.

use crate::error::QueryError;
use crate::item::Item;

/// Search action.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    // ═══════════════════════════════════════════════════════════
    // User input
    // ═══════════════════════════════════════════════════════════

    /// The input text changed.
    ///
    /// Restarts the debounce timer, or clears the results when `text` is empty.
    SetQueryText {
        /// New input text
        text: String,
    },

    /// An item was picked from the results.
    SelectItem {
        /// The picked item
        item: Item,
    },

    /// An item was removed from the selection (e.g. a chip was dismissed).
    RemoveSelection {
        /// Item to remove; matched by id
        item: Item,
    },

    /// Empty the text and results, keeping the selection.
    Clear,

    /// Empty the text, results and selection.
    ClearAll,

    /// Close the results view without touching text or selection.
    CloseResults,

    /// Replace the selection from outside (controlled component).
    SyncSelection {
        /// New selection
        items: Vec<Item>,
    },

    // ═══════════════════════════════════════════════════════════
    // Effect feedback
    // ═══════════════════════════════════════════════════════════

    /// The debounce period elapsed; run the query now.
    RunQuery {
        /// Text to query for
        text: String,
    },

    /// A query finished.
    QueryCompleted {
        /// Epoch the query was started under
        epoch: u64,
        /// Items returned, or why there are none
        outcome: Result<Vec<Item>, QueryError>,
    },
}
