//! # Fact Selection
//!
//! Checkbox state for the fact table. Selecting a category selects all of its
//! sub-facts; deselecting it deselects them all. Selecting a single sub-fact
//! leaves the parent's own membership alone; the parent's checkbox is derived
//! from its children at projection time.

use crate::errors::ProjectorError;
use crate::facts::{all_fact_ids, countable_ids, find_fact, Fact, FactId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of checked fact ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<FactId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is checked.
    pub fn contains(&self, id: FactId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of checked ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checked ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FactId> + '_ {
        self.ids.iter().copied()
    }

    /// Return a copy with every id in `ids` set to `selected`.
    #[must_use]
    pub fn with_ids(&self, ids: impl IntoIterator<Item = FactId>, selected: bool) -> Self {
        let mut next = self.clone();
        for id in ids {
            if selected {
                next.ids.insert(id);
            } else {
                next.ids.remove(&id);
            }
        }
        next
    }
}

impl FromIterator<FactId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = FactId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Set `target_id` to `is_selected`, propagating to sub-facts when the target
/// is a category.
///
/// The returned set is built in full before it is handed back, so callers
/// never observe a half-propagated selection. An id that is not in `facts`
/// comes from a stale render and is reported as
/// [`ProjectorError::FactNotFound`].
pub fn toggle_select(
    facts: &[Fact],
    selected: &SelectionSet,
    target_id: FactId,
    is_selected: bool,
) -> Result<SelectionSet, ProjectorError> {
    let fact = find_fact(facts, target_id).ok_or(ProjectorError::FactNotFound { id: target_id })?;
    Ok(selected.with_ids(fact.ids(), is_selected))
}

/// Set every top-level id and every sub-fact id to `is_selected`.
pub fn bulk_select(facts: &[Fact], is_selected: bool) -> SelectionSet {
    if is_selected {
        all_fact_ids(facts).collect()
    } else {
        SelectionSet::new()
    }
}

// =============================================================================
// Toolbar Aggregate
// =============================================================================

/// Tri-state of the toolbar's bulk-select checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkSelectState {
    /// No countable fact is checked
    None,
    /// Some but not all countable facts are checked
    Partial,
    /// Every countable fact is checked
    All,
}

/// Selection aggregate shown by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Checked leaves and sub-facts
    pub selected_count: usize,
    /// Leaves and sub-facts in the tree
    pub total_facts: usize,
    /// Bulk-select checkbox state
    pub state: BulkSelectState,
}

impl SelectionSummary {
    /// Whether every fact is checked (and there is at least one).
    pub fn all_selected(&self) -> bool {
        self.state == BulkSelectState::All
    }
}

/// Summarize `selected` over the same rows [`crate::facts::count_facts`] counts.
pub fn selection_summary(facts: &[Fact], selected: &SelectionSet) -> SelectionSummary {
    let (selected_count, total_facts) = countable_ids(facts).fold((0, 0), |(hit, total), id| {
        (hit + usize::from(selected.contains(id)), total + 1)
    });

    let state = if selected_count == 0 {
        BulkSelectState::None
    } else if selected_count == total_facts {
        BulkSelectState::All
    } else {
        BulkSelectState::Partial
    };

    SelectionSummary {
        selected_count,
        total_facts,
        state,
    }
}
