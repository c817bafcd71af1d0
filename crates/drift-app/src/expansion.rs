//! Expanded categories, keyed by category name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of category names whose sub-facts are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet {
    names: BTreeSet<String>,
}

impl ExpansionSet {
    /// Create an empty expansion set (everything collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named category is expanded.
    pub fn is_expanded(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of expanded categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether every category is collapsed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Expanded category names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Expand `category_name` if collapsed, collapse it if expanded.
#[must_use]
pub fn toggle_expand(expanded: &ExpansionSet, category_name: &str) -> ExpansionSet {
    let mut next = expanded.clone();
    if !next.names.remove(category_name) {
        next.names.insert(category_name.to_string());
    }
    next
}
