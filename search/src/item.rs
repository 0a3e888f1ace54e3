//! Search result items.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single searchable entry (movie, list, reference type, ...).
///
/// Identity is the `id` alone: two items with the same id are equal even if
/// their names or images differ. Selection and de-duplication rely on this.
///
/// # Examples
///
/// ```
/// use cinelog_search::Item;
///
/// let a = Item::new("42", "Heat");
/// let b = Item::new("42", "Heat (1995)");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier.
    pub id: String,

    /// Display name, echoed into the input on single selection.
    pub name: String,

    /// Optional secondary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Item {
    /// Create an item with just an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            image: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
