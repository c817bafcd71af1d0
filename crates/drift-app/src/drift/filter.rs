//! Comparison toolbar state: compared items, state chips, fact chips,
//! pagination.

use crate::errors::ErrorCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default page size of the comparison table.
pub const DEFAULT_PER_PAGE: usize = 50;

/// Comparison outcome of a fact across systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonState {
    /// All systems agree
    Same,
    /// At least one system differs
    Different,
    /// At least one system has no value
    IncompleteData,
}

impl ComparisonState {
    /// All states in chip order.
    pub const ALL: [Self; 3] = [Self::Same, Self::Different, Self::IncompleteData];

    /// Chip label.
    pub fn display(self) -> &'static str {
        match self {
            Self::Same => "Same",
            Self::Different => "Different",
            Self::IncompleteData => "Incomplete data",
        }
    }
}

/// One state filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFilter {
    /// State this chip filters on
    pub filter: ComparisonState,
    /// Whether rows in this state are shown
    pub selected: bool,
}

/// Chip group a removal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipKind {
    /// "State" chip group
    State,
    /// "Fact" chip group
    Fact,
}

/// Comparison table pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    /// Rows per page
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Range of row indices shown for `total` rows.
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);
        start..end
    }
}

/// Invalid filter input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Page numbers start at 1
    #[error("page must be at least 1")]
    ZeroPage,

    /// Page size must be positive
    #[error("per_page must be at least 1")]
    ZeroPerPage,

    /// Only a compared item can be the reference
    #[error("{0} is not part of the comparison")]
    NotCompared(Uuid),
}

impl FilterError {
    /// Category used for frontend routing.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

/// Everything the comparison toolbar filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftFilterState {
    compared: Vec<Uuid>,
    reference: Option<Uuid>,
    state_filters: Vec<StateFilter>,
    fact_filter: String,
    active_fact_filters: Vec<String>,
    pagination: Pagination,
}

impl Default for DriftFilterState {
    fn default() -> Self {
        Self {
            compared: Vec::new(),
            reference: None,
            state_filters: ComparisonState::ALL
                .into_iter()
                .map(|filter| StateFilter {
                    filter,
                    selected: true,
                })
                .collect(),
            fact_filter: String::new(),
            active_fact_filters: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl DriftFilterState {
    /// Every state shown, no fact filters, first page.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────

    /// Systems and baselines in the comparison, in the order they were added.
    pub fn compared(&self) -> &[Uuid] {
        &self.compared
    }

    /// Item every other column is compared against.
    pub fn reference(&self) -> Option<Uuid> {
        self.reference
    }

    /// State filter chips.
    pub fn state_filters(&self) -> &[StateFilter] {
        &self.state_filters
    }

    /// Whether rows in `state` are shown.
    pub fn shows(&self, state: ComparisonState) -> bool {
        self.state_filters
            .iter()
            .any(|f| f.filter == state && f.selected)
    }

    /// Free-text fact filter.
    pub fn fact_filter(&self) -> &str {
        &self.fact_filter
    }

    /// Fact filter chips.
    pub fn active_fact_filters(&self) -> &[String] {
        &self.active_fact_filters
    }

    /// Current page.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Whether a fact name passes the fact filters.
    ///
    /// Chips match exactly; the free-text filter matches case-insensitive
    /// substrings. Both must pass when both are set.
    pub fn matches_fact(&self, name: &str) -> bool {
        let chip_ok = self.active_fact_filters.is_empty()
            || self.active_fact_filters.iter().any(|chip| chip == name);
        let text_ok = self.fact_filter.is_empty()
            || name
                .to_lowercase()
                .contains(&self.fact_filter.to_lowercase());
        chip_ok && text_ok
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Add an item to the comparison, or remove it if already compared.
    ///
    /// The first item added becomes the reference. Removing the reference
    /// hands it to the earliest remaining item.
    pub fn toggle_compared(&mut self, id: Uuid) {
        if let Some(index) = self.compared.iter().position(|c| *c == id) {
            self.compared.remove(index);
            if self.reference == Some(id) {
                self.reference = self.compared.first().copied();
            }
        } else {
            self.compared.push(id);
            if self.reference.is_none() {
                self.reference = Some(id);
            }
        }
        self.pagination.page = 1;
    }

    /// Compare everything against `id`.
    pub fn set_reference(&mut self, id: Uuid) -> Result<(), FilterError> {
        if !self.compared.contains(&id) {
            return Err(FilterError::NotCompared(id));
        }
        self.reference = Some(id);
        Ok(())
    }

    /// "Clear all comparisons": drop every compared item and the reference,
    /// then clear the filters. The page size is kept.
    pub fn clear_comparison(&mut self) {
        self.compared.clear();
        self.reference = None;
        self.clear();
    }

    /// Flip one state chip.
    pub fn toggle_state_filter(&mut self, state: ComparisonState) {
        for filter in &mut self.state_filters {
            if filter.filter == state {
                filter.selected = !filter.selected;
            }
        }
        self.pagination.page = 1;
    }

    /// Show every state again.
    pub fn clear_all_state_chips(&mut self) {
        for filter in &mut self.state_filters {
            filter.selected = true;
        }
        self.pagination.page = 1;
    }

    /// Set the free-text fact filter.
    pub fn filter_by_fact(&mut self, text: impl Into<String>) {
        self.fact_filter = text.into();
        self.pagination.page = 1;
    }

    /// Add a fact chip, or remove it if already active.
    pub fn handle_fact_filter(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(index) = self.active_fact_filters.iter().position(|f| *f == name) {
            self.active_fact_filters.remove(index);
        } else {
            self.active_fact_filters.push(name);
        }
        self.pagination.page = 1;
    }

    /// Remove every fact chip.
    pub fn clear_all_fact_filters(&mut self) {
        self.active_fact_filters.clear();
        self.pagination.page = 1;
    }

    /// Remove a chip from the toolbar's chip group.
    ///
    /// With no id the whole group is cleared. A fact id that is not an active
    /// chip refers to the free-text filter chip, which is cleared instead.
    pub fn remove_chip(&mut self, kind: ChipKind, id: Option<&str>) {
        match (kind, id) {
            (ChipKind::State, None) => self.clear_all_state_chips(),
            (ChipKind::State, Some(label)) => {
                if let Some(state) = ComparisonState::ALL
                    .into_iter()
                    .find(|state| state.display() == label)
                {
                    self.toggle_state_filter(state);
                }
            }
            (ChipKind::Fact, None) => self.clear_all_fact_filters(),
            (ChipKind::Fact, Some(name)) => {
                if self.active_fact_filters.iter().any(|f| f == name) {
                    self.handle_fact_filter(name);
                } else {
                    self.filter_by_fact("");
                }
            }
        }
    }

    /// "Clear filters": drop fact filters and show every state.
    pub fn clear(&mut self) {
        self.active_fact_filters.clear();
        self.fact_filter.clear();
        self.clear_all_state_chips();
    }

    /// "Reset filters": back to defaults, page size included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move to another page or page size.
    pub fn update_pagination(&mut self, page: usize, per_page: usize) -> Result<(), FilterError> {
        if page == 0 {
            return Err(FilterError::ZeroPage);
        }
        if per_page == 0 {
            return Err(FilterError::ZeroPerPage);
        }
        self.pagination = Pagination { page, per_page };
        Ok(())
    }
}
