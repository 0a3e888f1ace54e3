//! Ordered item selection keyed by id.

use crate::item::Item;
use serde::{Deserialize, Serialize};

/// The items a user has picked, in the order they were picked.
///
/// Membership is decided by [`Item::id`]. In single mode the engine keeps at
/// most one entry; the type itself does not know about modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<Item>,
}

impl Selection {
    /// Build a selection from `items`, dropping later duplicates.
    ///
    /// With `multiple == false` only the first item is kept.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = Item>, multiple: bool) -> Self {
        let mut selection = Self::default();
        for item in items {
            if !selection.contains(&item.id) {
                selection.items.push(item);
            }
            if !multiple && !selection.is_empty() {
                break;
            }
        }
        selection
    }

    /// Whether an item with `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Add `item` if absent, remove it if present.
    ///
    /// Returns `true` if the item is selected afterwards.
    pub fn toggle(&mut self, item: Item) -> bool {
        if self.remove(&item.id).is_some() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Replace the whole selection with a single item.
    pub fn replace_with(&mut self, item: Item) {
        self.items.clear();
        self.items.push(item);
    }

    /// Remove the item with `id`, returning it if it was selected.
    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Selected items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The first selected item, which is the selection in single mode.
    #[must_use]
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the selected items, as handed to listeners.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.clone()
    }
}
