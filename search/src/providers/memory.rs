//! In-memory query provider.

use crate::environment::QueryProvider;
use crate::error::QueryError;
use crate::item::Item;
use std::future::Future;
use std::sync::Arc;

/// Provider that filters a fixed list of items.
///
/// Matches case-insensitively on a substring of the item name; results keep
/// the order of the list.
///
/// # Examples
///
/// ```
/// use cinelog_search::{Item, StaticQueryProvider};
///
/// let provider = StaticQueryProvider::new(vec![Item::new("1", "Heat"), Item::new("2", "Alien")]);
/// assert_eq!(provider.matching("EA"), vec![Item::new("1", "Heat")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticQueryProvider {
    items: Arc<[Item]>,
}

impl StaticQueryProvider {
    /// Create a provider over `items`.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Items whose name contains `text`, ignoring case.
    #[must_use]
    pub fn matching(&self, text: &str) -> Vec<Item> {
        let needle = text.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl QueryProvider for StaticQueryProvider {
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send {
        std::future::ready(Ok(self.matching(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> StaticQueryProvider {
        StaticQueryProvider::new(vec![
            Item::new("1", "The Thing"),
            Item::new("2", "Things to Come"),
            Item::new("3", "Alien"),
        ])
    }

    #[test]
    fn matches_case_insensitive_substring_in_order() {
        let ids: Vec<_> = catalogue()
            .matching("thing")
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn blank_text_matches_everything() {
        assert_eq!(catalogue().matching("  ").len(), 3);
    }

    #[tokio::test]
    async fn query_resolves_immediately() {
        let result = catalogue().query("alien").await;
        assert_eq!(result, Ok(vec![Item::new("3", "Alien")]));
    }
}
