//! # Column Sorting
//!
//! The fact table sorts on one column at a time. Each column's header cycles
//! `None → Ascending → Descending → None`; activating one column resets the
//! other to `None`.

use crate::facts::{Fact, FactValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Fact name column
    Name,
    /// Fact value column
    Value,
}

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Source order
    #[default]
    None,
    /// A → Z
    Ascending,
    /// Z → A
    Descending,
}

impl SortDirection {
    /// Next direction when the column header is activated.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }

    /// Whether the column is actively sorting (header highlighted).
    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// Active sort: a field and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column being sorted
    pub field: SortField,
    /// Direction of that column
    pub direction: SortDirection,
}

impl SortSpec {
    /// Source order.
    pub const NONE: Self = Self {
        field: SortField::Name,
        direction: SortDirection::None,
    };
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::NONE
    }
}

/// Per-column toggle state. At most one column is not `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    name: SortDirection,
    value: SortDirection,
}

impl SortState {
    /// Both columns unsorted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction shown on a column header.
    pub fn direction(&self, field: SortField) -> SortDirection {
        match field {
            SortField::Name => self.name,
            SortField::Value => self.value,
        }
    }

    /// Advance `field` one step and reset the other column.
    #[must_use]
    pub fn activate(self, field: SortField) -> Self {
        match field {
            SortField::Name => Self {
                name: self.name.next(),
                value: SortDirection::None,
            },
            SortField::Value => Self {
                name: SortDirection::None,
                value: self.value.next(),
            },
        }
    }

    /// The active sort, or [`SortSpec::NONE`].
    pub fn spec(&self) -> SortSpec {
        if self.value.is_active() {
            SortSpec {
                field: SortField::Value,
                direction: self.value,
            }
        } else {
            SortSpec {
                field: SortField::Name,
                direction: self.name,
            }
        }
    }
}

// =============================================================================
// Sort Collaborator
// =============================================================================

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_key(fact: &Fact, field: SortField) -> &str {
    match field {
        SortField::Name => &fact.name,
        SortField::Value => fact.scalar_value().unwrap_or(""),
    }
}

fn sort_level(facts: &mut [Fact], spec: SortSpec) {
    facts.sort_by(|a, b| {
        let ordering = compare_text(sort_key(a, spec.field), sort_key(b, spec.field));
        match spec.direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    });
}

/// Order `facts` for display.
///
/// Top-level facts and each category's sub-facts are sorted independently.
/// Categories have no scalar value and sort as empty under a value sort. The
/// sort is stable, and [`SortDirection::None`] returns source order.
pub fn sort_facts(facts: &[Fact], spec: SortSpec) -> Vec<Fact> {
    let mut sorted = facts.to_vec();
    if !spec.direction.is_active() {
        return sorted;
    }

    sort_level(&mut sorted, spec);
    for fact in &mut sorted {
        if let FactValue::Category(sub_facts) = &mut fact.value {
            sort_level(sub_facts, spec);
        }
    }
    sorted
}
