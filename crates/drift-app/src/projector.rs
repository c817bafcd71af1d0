//! # Fact Table Projector
//!
//! Pure transformation from a fact tree plus UI state into the rows a table
//! renders:
//!
//! ```text
//! (facts, expanded, selected) → [FactRow]
//! ```
//!
//! Category rows are always emitted; their sub-facts follow as nested rows
//! only while the category is expanded. A category's checkbox is derived from
//! its children and never stored.

use crate::expansion::ExpansionSet;
use crate::facts::{count_facts, Fact, FactId};
use crate::permissions::Permissions;
use crate::selection::{selection_summary, SelectionSet, SelectionSummary};
use crate::sort::{sort_facts, SortDirection, SortField, SortState};
use serde::{Deserialize, Serialize};

/// Nesting level of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowDepth {
    /// Top-level leaf or category
    TopLevel,
    /// Sub-fact of an expanded category
    Nested,
}

impl RowDepth {
    /// Numeric depth (0 or 1).
    pub fn level(self) -> u8 {
        match self {
            Self::TopLevel => 0,
            Self::Nested => 1,
        }
    }
}

/// One rendered table row. Derived on every projection, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRow {
    /// Fact id (checkbox name)
    pub id: FactId,
    /// Fact name
    pub name: String,
    /// Scalar value; `None` on category rows
    pub value: Option<String>,
    /// Whether the row is a category header
    pub is_category: bool,
    /// Checkbox state
    pub selected: bool,
    /// Category rows: whether the expand icon points down
    pub expanded: bool,
    /// Nesting level
    pub depth: RowDepth,
}

impl FactRow {
    fn top_level(fact: &Fact, expanded: &ExpansionSet, selected: &SelectionSet) -> Self {
        if fact.is_category() {
            Self {
                id: fact.id,
                name: fact.name.clone(),
                value: None,
                is_category: true,
                selected: category_selected(fact, selected),
                expanded: expanded.is_expanded(&fact.name),
                depth: RowDepth::TopLevel,
            }
        } else {
            Self {
                id: fact.id,
                name: fact.name.clone(),
                value: fact.scalar_value().map(str::to_string),
                is_category: false,
                selected: selected.contains(fact.id),
                expanded: false,
                depth: RowDepth::TopLevel,
            }
        }
    }

    fn nested(sub_fact: &Fact, selected: &SelectionSet) -> Self {
        Self {
            id: sub_fact.id,
            name: sub_fact.name.clone(),
            value: sub_fact.scalar_value().map(str::to_string),
            is_category: false,
            selected: selected.contains(sub_fact.id),
            expanded: false,
            depth: RowDepth::Nested,
        }
    }
}

/// A category shows checked when every sub-fact is checked. An empty
/// category has nothing to aggregate and falls back to its own id.
fn category_selected(category: &Fact, selected: &SelectionSet) -> bool {
    let sub_facts = category.sub_facts();
    if sub_facts.is_empty() {
        selected.contains(category.id)
    } else {
        sub_facts.iter().all(|sub| selected.contains(sub.id))
    }
}

/// Project `facts` into table rows.
///
/// `facts` must already be in display order (see [`sort_facts`]); the
/// projection never reorders. The returned iterator is lazy, holds no state
/// beyond its position, and can be cloned to restart.
pub fn project<'a>(
    facts: &'a [Fact],
    expanded: &'a ExpansionSet,
    selected: &'a SelectionSet,
) -> impl Iterator<Item = FactRow> + Clone + 'a {
    facts.iter().flat_map(move |fact| {
        let nested: &'a [Fact] = if fact.is_category() && expanded.is_expanded(&fact.name) {
            fact.sub_facts()
        } else {
            &[]
        };

        std::iter::once(FactRow::top_level(fact, expanded, selected))
            .chain(nested.iter().map(move |sub| FactRow::nested(sub, selected)))
    })
}

// =============================================================================
// Table View
// =============================================================================

/// Everything a table and its toolbar need for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTableView {
    /// Rows in display order
    pub rows: Vec<FactRow>,
    /// Leaves and sub-facts in the tree
    pub total_facts: usize,
    /// Toolbar selection aggregate
    pub summary: SelectionSummary,
    /// Whether checkboxes are rendered
    pub selectable: bool,
    /// Fact column header indicator
    pub name_sort: SortDirection,
    /// Value column header indicator
    pub value_sort: SortDirection,
}

impl FactTableView {
    /// Sort, project and summarize in one pass.
    pub fn build(
        facts: &[Fact],
        sort: SortState,
        expanded: &ExpansionSet,
        selected: &SelectionSet,
        permissions: Permissions,
    ) -> Self {
        let ordered = sort_facts(facts, sort.spec());
        let rows = project(&ordered, expanded, selected).collect();

        Self {
            rows,
            total_facts: count_facts(facts),
            summary: selection_summary(facts, selected),
            selectable: permissions.can_select(),
            name_sort: sort.direction(SortField::Name),
            value_sort: sort.direction(SortField::Value),
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fixtures::scenario_tree;
    use crate::selection::toggle_select;

    fn shape(rows: &[FactRow]) -> Vec<(&str, bool, bool, u8)> {
        rows.iter()
            .map(|r| (r.name.as_str(), r.is_category, r.selected, r.depth.level()))
            .collect()
    }

    #[test]
    fn scenario_rows_with_expanded_category() {
        let facts = scenario_tree();
        let expanded: ExpansionSet = ["B"].into_iter().collect();
        let rows: Vec<_> = project(&facts, &expanded, &SelectionSet::new()).collect();

        assert_eq!(
            shape(&rows),
            vec![
                ("A", false, false, 0),
                ("B", true, false, 0),
                ("B1", false, false, 1),
                ("B2", false, false, 1),
            ]
        );
        assert_eq!(rows[0].value.as_deref(), Some("x"));
        assert_eq!(rows[1].value, None);
        assert!(rows[1].expanded);
        assert_eq!(rows[3].value.as_deref(), Some("z"));
    }

    #[test]
    fn collapsed_category_hides_sub_facts() {
        let facts = scenario_tree();
        let rows: Vec<_> = project(&facts, &ExpansionSet::new(), &SelectionSet::new()).collect();
        assert_eq!(rows.len(), 2);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn category_checked_only_when_all_sub_facts_checked() {
        let facts = scenario_tree();
        let expanded: ExpansionSet = ["B"].into_iter().collect();

        let partial: SelectionSet = [3].into_iter().collect();
        let rows: Vec<_> = project(&facts, &expanded, &partial).collect();
        assert!(!rows[1].selected);
        assert!(rows[2].selected);

        // Sub-facts checked without the category's own id still show checked
        let children: SelectionSet = [3, 4].into_iter().collect();
        let rows: Vec<_> = project(&facts, &expanded, &children).collect();
        assert!(rows[1].selected);
    }

    #[test]
    fn empty_category_uses_own_membership() {
        let facts = vec![Fact::category(9, "empty", Vec::new())];
        let selected: SelectionSet = [9].into_iter().collect();
        let rows: Vec<_> = project(&facts, &ExpansionSet::new(), &selected).collect();
        assert!(rows[0].selected);

        let rows: Vec<_> = project(&facts, &ExpansionSet::new(), &SelectionSet::new()).collect();
        assert!(!rows[0].selected);
    }

    #[test]
    fn empty_tree_projects_nothing() {
        let rows: Vec<_> = project(&[], &ExpansionSet::new(), &SelectionSet::new()).collect();
        assert!(rows.is_empty());
    }

    #[test]
    fn projection_restarts_from_clone() {
        let facts = scenario_tree();
        let expanded: ExpansionSet = ["B"].into_iter().collect();
        let selected = SelectionSet::new();
        let rows = project(&facts, &expanded, &selected);
        let first: Vec<_> = rows.clone().collect();
        let second: Vec<_> = rows.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn table_view_sorts_and_summarizes() {
        let facts = scenario_tree();
        let selected = toggle_select(&facts, &SelectionSet::new(), 2, true).unwrap();
        let sort = SortState::new()
            .activate(SortField::Name)
            .activate(SortField::Name);

        let view = FactTableView::build(
            &facts,
            sort,
            &ExpansionSet::new(),
            &selected,
            Permissions::READ_WRITE,
        );

        assert_eq!(shape(&view.rows), vec![("B", true, true, 0), ("A", false, false, 0)]);
        assert_eq!(view.total_facts, 3);
        assert_eq!(view.summary.selected_count, 2);
        assert!(view.selectable);
        assert_eq!(view.name_sort, SortDirection::Descending);
        assert_eq!(view.value_sort, SortDirection::None);
    }

    #[test]
    fn read_only_view_is_not_selectable() {
        let view = FactTableView::build(
            &scenario_tree(),
            SortState::new(),
            &ExpansionSet::new(),
            &SelectionSet::new(),
            Permissions::READ_ONLY,
        );
        assert!(!view.selectable);
    }
}
