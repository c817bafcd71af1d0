//! # Edit-Baseline Reducer
//!
//! Reduces [`BaselineAction`]s into [`EditBaselineState`].
//!
//! Every transition computes its new values before assigning any of them, so
//! a failed action leaves the state exactly as it was. Selection and
//! expansion belong to the loaded tree and are reset whenever a request
//! delivers a new baseline.

use super::action::{BaselineAction, FactDraft, RequestPhase};
use crate::errors::{ProjectorError, UpstreamFetchError};
use crate::expansion::{toggle_expand, ExpansionSet};
use crate::export::{ExportError, ExportFormat, ExportStatus};
use crate::facts::{find_category, Baseline, Fact};
use crate::permissions::Permissions;
use crate::projector::FactTableView;
use crate::selection::{bulk_select, toggle_select, SelectionSet};
use crate::sort::{SortField, SortState};

/// Add/edit fact modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactModalState {
    /// Whether the modal is open
    pub opened: bool,
    /// Fields being edited
    pub draft: FactDraft,
}

/// What the edit-baseline screen should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Skeleton rows while the baseline is loading
    Loading,
    /// The baseline could not be loaded; offer a retry
    Error(UpstreamFetchError),
    /// The baseline has no facts; offer "add fact"
    Empty,
    /// The fact table, with the last failed edit shown above it
    Table {
        /// Rows and toolbar state
        view: FactTableView,
        /// Upstream error awaiting `ClearErrorData`
        alert: Option<UpstreamFetchError>,
    },
}

/// State of the edit-baseline screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBaselineState {
    permissions: Permissions,
    baseline: Option<Baseline>,
    facts: Vec<Fact>,
    expanded: ExpansionSet,
    selected: SelectionSet,
    sort: SortState,
    loading: bool,
    error: Option<UpstreamFetchError>,
    fact_modal: FactModalState,
    export_status: ExportStatus,
    notifications_enabled: bool,
}

impl EditBaselineState {
    /// Initial state for a user with `permissions`.
    pub fn new(permissions: Permissions) -> Self {
        Self {
            permissions,
            baseline: None,
            facts: Vec::new(),
            expanded: ExpansionSet::new(),
            selected: SelectionSet::new(),
            sort: SortState::new(),
            loading: false,
            error: None,
            fact_modal: FactModalState::default(),
            export_status: ExportStatus::Idle,
            notifications_enabled: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Loaded baseline, if any.
    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Fact tree in source order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Expanded categories.
    pub fn expanded(&self) -> &ExpansionSet {
        &self.expanded
    }

    /// Checked facts.
    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    /// Column sort state.
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last upstream error, shown until `ClearErrorData`.
    pub fn error(&self) -> Option<&UpstreamFetchError> {
        self.error.as_ref()
    }

    /// Fact modal state.
    pub fn fact_modal(&self) -> &FactModalState {
        &self.fact_modal
    }

    /// Export dropdown state.
    pub fn export_status(&self) -> ExportStatus {
        self.export_status
    }

    /// Drift notifications switch.
    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Current permissions.
    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    // =========================================================================
    // Derived
    // =========================================================================

    /// Table rows and toolbar aggregate for the current state.
    pub fn table_view(&self) -> FactTableView {
        FactTableView::build(
            &self.facts,
            self.sort,
            &self.expanded,
            &self.selected,
            self.permissions,
        )
    }

    /// What the screen should render.
    pub fn display(&self) -> DisplayState {
        if self.loading {
            return DisplayState::Loading;
        }
        match (&self.baseline, &self.error) {
            (None, Some(error)) => DisplayState::Error(error.clone()),
            (None, None) => DisplayState::Loading,
            (Some(_), _) if self.facts.is_empty() => DisplayState::Empty,
            (Some(_), alert) => DisplayState::Table {
                view: self.table_view(),
                alert: alert.clone(),
            },
        }
    }

    // =========================================================================
    // Reduce
    // =========================================================================

    /// Apply `action`.
    ///
    /// Errors mean the action referenced something the current tree does not
    /// contain (or the user may not select); the state is left unchanged.
    pub fn reduce(&mut self, action: BaselineAction) -> Result<(), ProjectorError> {
        tracing::debug!(action = action.name(), "reducing baseline action");

        match action {
            BaselineAction::ExpandParentFact { name } => {
                if find_category(&self.facts, &name).is_none() {
                    return Err(ProjectorError::CategoryNotFound { name });
                }
                self.expanded = toggle_expand(&self.expanded, &name);
            }
            BaselineAction::SelectFact { id, selected } => {
                self.require_write()?;
                self.selected = toggle_select(&self.facts, &self.selected, id, selected)?;
            }
            BaselineAction::BulkSelectFacts { selected } => {
                self.require_write()?;
                self.selected = bulk_select(&self.facts, selected);
            }
            BaselineAction::ToggleFactSort => {
                self.sort = self.sort.activate(SortField::Name);
            }
            BaselineAction::ToggleValueSort => {
                self.sort = self.sort.activate(SortField::Value);
            }
            BaselineAction::FetchBaselineData(phase)
            | BaselineAction::PatchBaseline(phase)
            | BaselineAction::DeleteBaselineData(phase) => self.apply_request(phase),
            BaselineAction::ClearEditBaselineData => {
                *self = Self::new(self.permissions);
            }
            BaselineAction::ClearErrorData => {
                self.error = None;
            }
            BaselineAction::ToggleFactModal => {
                let opened = !self.fact_modal.opened;
                self.fact_modal = FactModalState {
                    opened,
                    draft: if opened {
                        std::mem::take(&mut self.fact_modal.draft)
                    } else {
                        FactDraft::default()
                    },
                };
            }
            BaselineAction::SetFactData(draft) => {
                self.fact_modal.draft = draft;
            }
            BaselineAction::ExportBaselineDataToCsv(phase) => {
                self.apply_export(ExportFormat::Csv, phase);
            }
            BaselineAction::ExportBaselineDataToJson(phase) => {
                self.apply_export(ExportFormat::Json, phase);
            }
            BaselineAction::ResetBaselineDataExportStatus => {
                self.export_status = ExportStatus::Idle;
            }
            BaselineAction::ToggleNotificationsSwitch => {
                self.notifications_enabled = !self.notifications_enabled;
            }
        }

        Ok(())
    }

    fn require_write(&self) -> Result<(), ProjectorError> {
        if self.permissions.can_select() {
            Ok(())
        } else {
            Err(ProjectorError::ReadOnly)
        }
    }

    fn apply_request(&mut self, phase: RequestPhase<Baseline>) {
        match phase {
            RequestPhase::Pending => {
                self.loading = true;
            }
            RequestPhase::Fulfilled(baseline) => {
                let facts = baseline.fact_tree();
                tracing::debug!(
                    baseline = %baseline.id,
                    facts = facts.len(),
                    "baseline loaded"
                );
                self.facts = facts;
                self.baseline = Some(baseline);
                self.expanded = ExpansionSet::new();
                self.selected = SelectionSet::new();
                self.error = None;
                self.loading = false;
            }
            RequestPhase::Rejected(error) => {
                tracing::warn!(status = error.status, detail = %error.detail, "baseline request failed");
                self.error = Some(error);
                self.loading = false;
            }
        }
    }

    /// Record an export phase. Export transitions cannot fail.
    pub(crate) fn apply_export(
        &mut self,
        format: ExportFormat,
        phase: RequestPhase<(), ExportError>,
    ) {
        self.export_status = match phase {
            RequestPhase::Pending => ExportStatus::Pending(format),
            RequestPhase::Fulfilled(()) => ExportStatus::Fulfilled(format),
            RequestPhase::Rejected(error) => {
                tracing::warn!(%format, %error, "export failed");
                ExportStatus::Rejected(format)
            }
        };
    }
}

impl Default for EditBaselineState {
    fn default() -> Self {
        Self::new(Permissions::READ_ONLY)
    }
}
