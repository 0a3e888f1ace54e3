//! Ready-made search controls used across the catalogue.

use crate::config::SearchConfig;
use crate::engine::SearchEngine;
use crate::environment::{QueryProvider, SearchListener};
use crate::item::Item;
use crate::providers::StaticQueryProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Debounce used by the movie dropdown.
pub const MOVIE_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce used by the reference type filter.
pub const REFERENCE_FILTER_DEBOUNCE: Duration = Duration::from_millis(150);

/// Configuration of the movie search dropdown: single selection, ten results.
#[must_use]
pub fn movie_search_config() -> SearchConfig {
    SearchConfig::default()
        .with_debounce(MOVIE_SEARCH_DEBOUNCE)
        .with_max_results(10)
        .with_multiple(false)
}

/// Single-select dropdown over a movie search provider.
///
/// `selected` seeds the current movie, if any.
#[must_use]
pub fn movie_search_dropdown<P, L>(
    provider: P,
    listener: L,
    selected: Option<Item>,
) -> SearchEngine<P, L>
where
    P: QueryProvider,
    L: SearchListener,
{
    let config = movie_search_config().with_selected_items(selected.into_iter().collect());
    SearchEngine::with_listener(config, provider, listener)
}

/// Kinds of content a feed or comment thread can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// A movie page.
    Movie,
    /// A user review.
    Review,
    /// A curated list.
    List,
    /// A news article.
    News,
    /// A comment.
    Comment,
}

impl ReferenceType {
    /// Every reference type, in display order.
    pub const ALL: [Self; 5] = [
        Self::Movie,
        Self::Review,
        Self::List,
        Self::News,
        Self::Comment,
    ];

    /// Stable id used in items and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Review => "review",
            Self::List => "list",
            Self::News => "news",
            Self::Comment => "comment",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Review => "Reviews",
            Self::List => "Lists",
            Self::News => "News",
            Self::Comment => "Comments",
        }
    }

    /// Item representing this type in a search control.
    #[must_use]
    pub fn to_item(self) -> Item {
        Item::new(self.as_str(), self.label())
    }

    /// Reference types among `items`, skipping unknown ids.
    #[must_use]
    pub fn from_items(items: &[Item]) -> Vec<Self> {
        items.iter().filter_map(|item| item.id.parse().ok()).collect()
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`ReferenceType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown reference type: {0}")]
pub struct UnknownReferenceType(pub String);

impl FromStr for ReferenceType {
    type Err = UnknownReferenceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownReferenceType(s.to_string()))
    }
}

/// Configuration of the reference type filter: multiple selection over all types.
#[must_use]
pub fn reference_type_config(selected: &[ReferenceType]) -> SearchConfig {
    SearchConfig::default()
        .with_debounce(REFERENCE_FILTER_DEBOUNCE)
        .with_max_results(ReferenceType::ALL.len())
        .with_multiple(true)
        .with_selected_items(selected.iter().map(|kind| kind.to_item()).collect())
}

/// Multi-select filter over [`ReferenceType`]s, answered locally.
#[must_use]
pub fn reference_type_filter<L>(
    listener: L,
    selected: &[ReferenceType],
) -> SearchEngine<StaticQueryProvider, L>
where
    L: SearchListener,
{
    let provider =
        StaticQueryProvider::new(ReferenceType::ALL.map(ReferenceType::to_item).to_vec());
    SearchEngine::with_listener(reference_type_config(selected), provider, listener)
}
