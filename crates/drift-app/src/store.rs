//! # Baseline Store
//!
//! Thin reactive binding over [`EditBaselineState`]. Frontends receive a
//! store handle explicitly (no ambient registry), dispatch actions into it,
//! and subscribe to derived signals for rendering.
//!
//! Each dispatch reduces a copy of the state under the mutable's lock and
//! only publishes it on success, so subscribers never observe a partial or
//! failed update.

use crate::core::{BaselineAction, DisplayState, EditBaselineState, RequestPhase};
use crate::errors::ProjectorError;
use crate::export::{ExportError, ExportFormat, FactExporter};
use crate::permissions::Permissions;
use crate::projector::FactRow;
use crate::selection::SelectionSummary;
use futures_signals::signal::{Mutable, Signal};

/// Shared handle to the edit-baseline state.
#[derive(Clone)]
pub struct BaselineStore {
    state: Mutable<EditBaselineState>,
}

impl BaselineStore {
    /// Create a store with an empty state.
    pub fn new(permissions: Permissions) -> Self {
        Self::with_state(EditBaselineState::new(permissions))
    }

    /// Create a store seeded with `state`.
    pub fn with_state(state: EditBaselineState) -> Self {
        Self {
            state: Mutable::new(state),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Reduce `action` and notify subscribers.
    ///
    /// On error nothing is published and the error is returned to the caller,
    /// who should refresh the view from the authoritative fact tree.
    pub fn dispatch(&self, action: BaselineAction) -> Result<(), ProjectorError> {
        let name = action.name();
        let mut guard = self.state.lock_mut();

        let mut next = (*guard).clone();
        if let Err(error) = next.reduce(action) {
            tracing::warn!(action = name, %error, category = %error.category(), "action rejected");
            return Err(error);
        }

        *guard = next;
        Ok(())
    }

    /// Export the full fact list through `exporter`, tracking export status.
    pub fn export(
        &self,
        format: ExportFormat,
        exporter: &dyn FactExporter,
    ) -> Result<String, ExportError> {
        self.dispatch_export(format, RequestPhase::Pending);

        let facts = self.state.lock_ref().facts().to_vec();
        match exporter.export(format, &facts) {
            Ok(document) => {
                self.dispatch_export(format, RequestPhase::Fulfilled(()));
                Ok(document)
            }
            Err(error) => {
                self.dispatch_export(format, RequestPhase::Rejected(error.clone()));
                Err(error)
            }
        }
    }

    fn dispatch_export(&self, format: ExportFormat, phase: RequestPhase<(), ExportError>) {
        tracing::debug!(%format, "recording export phase");
        self.state.lock_mut().apply_export(format, phase);
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Clone of the current state.
    pub fn snapshot(&self) -> EditBaselineState {
        self.state.get_cloned()
    }

    /// Current display decision.
    pub fn display(&self) -> DisplayState {
        self.state.lock_ref().display()
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal of the screen's display decision.
    pub fn display_signal(&self) -> impl Signal<Item = DisplayState> + Send + Sync + 'static {
        self.state.signal_ref(EditBaselineState::display)
    }

    /// Signal of the projected rows (empty while loading or on error).
    pub fn rows_signal(&self) -> impl Signal<Item = Vec<FactRow>> + Send + Sync + 'static {
        self.state.signal_ref(|state| state.table_view().rows)
    }

    /// Signal of the toolbar selection aggregate.
    pub fn summary_signal(&self) -> impl Signal<Item = SelectionSummary> + Send + Sync + 'static {
        self.state.signal_ref(|state| state.table_view().summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Baseline, BaselineFact, Fact};
    use futures::executor::block_on;
    use futures::StreamExt;
    use futures_signals::signal::SignalExt;
    use uuid::Uuid;

    fn baseline() -> Baseline {
        Baseline {
            id: Uuid::nil(),
            display_name: "store".to_string(),
            fact_count: None,
            baseline_facts: vec![
                BaselineFact {
                    name: "arch".to_string(),
                    value: Some("x86_64".to_string()),
                    values: None,
                },
                BaselineFact {
                    name: "cpu".to_string(),
                    value: None,
                    values: Some(vec![BaselineFact {
                        name: "cores".to_string(),
                        value: Some("4".to_string()),
                        values: None,
                    }]),
                },
            ],
        }
    }

    fn loaded_store() -> BaselineStore {
        let store = BaselineStore::new(Permissions::READ_WRITE);
        store
            .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Fulfilled(baseline())))
            .unwrap();
        store
    }

    struct NamesExporter;

    impl FactExporter for NamesExporter {
        fn export(&self, format: ExportFormat, facts: &[Fact]) -> Result<String, ExportError> {
            match format {
                ExportFormat::Json => Ok(facts
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(",")),
                ExportFormat::Csv => Err(ExportError::Unsupported(format)),
            }
        }
    }

    #[test]
    fn rows_signal_tracks_dispatches() {
        let store = loaded_store();
        let mut rows = store.rows_signal().to_stream();

        let first = block_on(rows.next()).unwrap();
        assert_eq!(first.len(), 2);

        store
            .dispatch(BaselineAction::ExpandParentFact { name: "cpu".into() })
            .unwrap();
        let second = block_on(rows.next()).unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(second[2].name, "cores");
    }

    #[test]
    fn failed_dispatch_publishes_nothing() {
        let store = loaded_store();
        let before = store.snapshot();

        let err = store
            .dispatch(BaselineAction::SelectFact {
                id: 99,
                selected: true,
            })
            .unwrap_err();
        assert_eq!(err, ProjectorError::FactNotFound { id: 99 });
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn summary_signal_reflects_selection() {
        let store = loaded_store();
        store
            .dispatch(BaselineAction::SelectFact {
                id: 1,
                selected: true,
            })
            .unwrap();

        let summary = block_on(store.summary_signal().to_stream().next()).unwrap();
        assert_eq!(summary.selected_count, 1);
        assert_eq!(summary.total_facts, 2);
    }

    #[test]
    fn export_tracks_status() {
        let store = loaded_store();

        let document = store.export(ExportFormat::Json, &NamesExporter).unwrap();
        assert_eq!(document, "arch,cpu");
        assert_eq!(
            store.snapshot().export_status(),
            crate::export::ExportStatus::Fulfilled(ExportFormat::Json)
        );

        let err = store.export(ExportFormat::Csv, &NamesExporter).unwrap_err();
        assert_eq!(err, ExportError::Unsupported(ExportFormat::Csv));
        assert_eq!(
            store.snapshot().export_status(),
            crate::export::ExportStatus::Rejected(ExportFormat::Csv)
        );
    }

    #[test]
    fn export_status_is_published_to_subscribers() {
        let store = loaded_store();
        let mut statuses = store
            .state
            .signal_ref(EditBaselineState::export_status)
            .to_stream();
        assert_eq!(
            block_on(statuses.next()),
            Some(crate::export::ExportStatus::Idle)
        );

        store.export(ExportFormat::Json, &NamesExporter).unwrap();
        assert_eq!(
            block_on(statuses.next()),
            Some(crate::export::ExportStatus::Fulfilled(ExportFormat::Json))
        );
    }

    #[test]
    fn clones_share_state() {
        let store = BaselineStore::new(Permissions::READ_WRITE);
        let handle = store.clone();
        handle
            .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Fulfilled(baseline())))
            .unwrap();
        assert!(matches!(store.display(), DisplayState::Table { .. }));
    }
}
