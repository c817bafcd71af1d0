//! # Baseline Actions
//!
//! A closed enumeration of the events the edit-baseline screen dispatches.
//! Requests to the baseline service are split into phases so the reducer can
//! show skeleton rows while a request is in flight.
//!
//! ```text
//! UI event → BaselineAction → EditBaselineState::reduce → FactTableView
//! ```

use crate::errors::UpstreamFetchError;
use crate::export::{ExportError, ExportFormat};
use crate::facts::{Baseline, FactId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a request to the baseline service or an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestPhase<T, E = UpstreamFetchError> {
    /// Request sent, no answer yet
    Pending,
    /// Request succeeded with a payload
    Fulfilled(T),
    /// Request failed
    Rejected(E),
}

/// Fact being added or edited in the fact modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactDraft {
    /// Fact name field
    pub name: String,
    /// Fact value field; empty for categories
    pub value: String,
    /// Editing a category rather than a leaf
    pub is_category: bool,
    /// Editing a sub-fact of `parent`
    pub is_sub_fact: bool,
    /// Parent category name for sub-facts
    pub parent: Option<String>,
}

/// Every event the edit-baseline screen can dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineAction {
    // =========================================================================
    // Table
    // =========================================================================
    /// Expand or collapse a category row
    ExpandParentFact {
        /// Category name
        name: String,
    },

    /// Check or uncheck one row (categories propagate to sub-facts)
    SelectFact {
        /// Row id
        id: FactId,
        /// New checkbox state
        selected: bool,
    },

    /// Toolbar bulk-select checkbox
    BulkSelectFacts {
        /// New checkbox state for every row
        selected: bool,
    },

    /// Fact column header activated
    ToggleFactSort,

    /// Value column header activated
    ToggleValueSort,

    // =========================================================================
    // Baseline Service
    // =========================================================================
    /// Load the baseline being edited
    FetchBaselineData(RequestPhase<Baseline>),

    /// Save an edit (add / rename / change value)
    PatchBaseline(RequestPhase<Baseline>),

    /// Delete the selected facts
    DeleteBaselineData(RequestPhase<Baseline>),

    /// Leave the page: drop baseline, error and UI state
    ClearEditBaselineData,

    /// Dismiss the error banner before retrying
    ClearErrorData,

    // =========================================================================
    // Fact Modal
    // =========================================================================
    /// Open or close the add/edit fact modal
    ToggleFactModal,

    /// Populate the fact modal
    SetFactData(FactDraft),

    // =========================================================================
    // Toolbar
    // =========================================================================
    /// Export the full fact list as CSV
    ExportBaselineDataToCsv(RequestPhase<(), ExportError>),

    /// Export the full fact list as JSON
    ExportBaselineDataToJson(RequestPhase<(), ExportError>),

    /// Reset the export dropdown after a download
    ResetBaselineDataExportStatus,

    /// Drift notifications switch on the baseline header
    ToggleNotificationsSwitch,
}

impl BaselineAction {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExpandParentFact { .. } => "EXPAND_PARENT_FACT",
            Self::SelectFact { .. } => "SELECT_FACT",
            Self::BulkSelectFacts { .. } => "BULK_SELECT_FACTS",
            Self::ToggleFactSort => "TOGGLE_BASELINE_FACT_SORT",
            Self::ToggleValueSort => "TOGGLE_BASELINE_VALUE_SORT",
            Self::FetchBaselineData(_) => "FETCH_BASELINE_DATA",
            Self::PatchBaseline(_) => "PATCH_BASELINE",
            Self::DeleteBaselineData(_) => "DELETE_BASELINE_DATA",
            Self::ClearEditBaselineData => "CLEAR_EDIT_BASELINE_DATA",
            Self::ClearErrorData => "CLEAR_ERROR_DATA",
            Self::ToggleFactModal => "TOGGLE_FACT_MODAL",
            Self::SetFactData(_) => "SET_FACT_DATA",
            Self::ExportBaselineDataToCsv(_) => "EXPORT_BASELINE_DATA_TO_CSV",
            Self::ExportBaselineDataToJson(_) => "EXPORT_BASELINE_DATA_TO_JSON",
            Self::ResetBaselineDataExportStatus => "RESET_BASELINE_DATA_EXPORT_STATUS",
            Self::ToggleNotificationsSwitch => "TOGGLE_NOTIFICATIONS_SWITCH",
        }
    }

    /// Export action for `format` in `phase`.
    pub fn export(format: ExportFormat, phase: RequestPhase<(), ExportError>) -> Self {
        match format {
            ExportFormat::Csv => Self::ExportBaselineDataToCsv(phase),
            ExportFormat::Json => Self::ExportBaselineDataToJson(phase),
        }
    }
}
