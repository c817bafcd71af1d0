//! End-to-end flow through the store: load, expand, select, sort, reload.

#![allow(clippy::unwrap_used)]

use drift_app::{
    Baseline, BaselineAction, BaselineStore, DisplayState, FactTableView, Permissions,
    ProjectorError, RequestPhase, RowDepth, SortDirection, UpstreamFetchError,
};

const BASELINE: &str = r#"{
    "id": "6f1c8a52-1b9e-4c5e-9d7a-2a1f3c4d5e6f",
    "display_name": "scenario",
    "fact_count": 3,
    "baseline_facts": [
        { "name": "A", "value": "x" },
        { "name": "B", "values": [
            { "name": "B1", "value": "y" },
            { "name": "B2", "value": "z" }
        ] }
    ]
}"#;

fn baseline() -> Baseline {
    serde_json::from_str(BASELINE).unwrap()
}

fn loaded(permissions: Permissions) -> BaselineStore {
    let store = BaselineStore::new(permissions);
    store
        .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Pending))
        .unwrap();
    assert_eq!(store.display(), DisplayState::Loading);
    store
        .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Fulfilled(baseline())))
        .unwrap();
    store
}

fn table(store: &BaselineStore) -> FactTableView {
    match store.display() {
        DisplayState::Table { view, .. } => view,
        other => panic!("expected table, got {other:?}"),
    }
}

fn shape(view: &FactTableView) -> Vec<(&str, bool, bool, RowDepth)> {
    view.rows
        .iter()
        .map(|r| (r.name.as_str(), r.is_category, r.selected, r.depth))
        .collect()
}

#[test]
fn expanded_category_lists_sub_facts_after_it() {
    let store = loaded(Permissions::READ_WRITE);
    store
        .dispatch(BaselineAction::ExpandParentFact { name: "B".into() })
        .unwrap();

    let view = table(&store);
    assert_eq!(
        shape(&view),
        vec![
            ("A", false, false, RowDepth::TopLevel),
            ("B", true, false, RowDepth::TopLevel),
            ("B1", false, false, RowDepth::Nested),
            ("B2", false, false, RowDepth::Nested),
        ]
    );
    assert_eq!(view.total_facts, 3);
}

#[test]
fn selecting_category_checks_parent_and_children() {
    let store = loaded(Permissions::READ_WRITE);
    // B is id 1, its sub-facts 2 and 3
    store
        .dispatch(BaselineAction::SelectFact {
            id: 1,
            selected: true,
        })
        .unwrap();
    store
        .dispatch(BaselineAction::ExpandParentFact { name: "B".into() })
        .unwrap();

    let view = table(&store);
    assert!(view.rows.iter().skip(1).all(|r| r.selected));
    assert_eq!(view.summary.selected_count, 2);

    store
        .dispatch(BaselineAction::SelectFact {
            id: 3,
            selected: false,
        })
        .unwrap();
    let view = table(&store);
    assert!(!view.rows[1].selected, "category unchecks once a child is unchecked");
    assert!(view.rows[2].selected);
}

#[test]
fn sort_cycles_and_reload_keeps_sort() {
    let store = loaded(Permissions::READ_WRITE);
    for expected in [
        SortDirection::Ascending,
        SortDirection::Descending,
        SortDirection::None,
    ] {
        store.dispatch(BaselineAction::ToggleFactSort).unwrap();
        assert_eq!(table(&store).name_sort, expected);
    }

    store.dispatch(BaselineAction::ToggleFactSort).unwrap();
    store.dispatch(BaselineAction::ToggleFactSort).unwrap();
    store
        .dispatch(BaselineAction::DeleteBaselineData(RequestPhase::Fulfilled(baseline())))
        .unwrap();

    let view = table(&store);
    assert_eq!(view.name_sort, SortDirection::Descending);
    let names: Vec<_> = view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn read_only_store_rejects_selection_without_publishing() {
    let store = loaded(Permissions::READ_ONLY);
    let before = store.snapshot();

    let err = store
        .dispatch(BaselineAction::BulkSelectFacts { selected: true })
        .unwrap_err();
    assert_eq!(err, ProjectorError::ReadOnly);
    assert_eq!(store.snapshot(), before);
    assert!(!table(&store).selectable);
}

#[test]
fn failed_fetch_shows_error_until_retry() {
    let store = BaselineStore::new(Permissions::READ_WRITE);
    store
        .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Rejected(
            UpstreamFetchError::new(404, "baseline not found"),
        )))
        .unwrap();

    match store.display() {
        DisplayState::Error(error) => {
            assert_eq!(error.to_string(), "Error 404: baseline not found");
        }
        other => panic!("expected error, got {other:?}"),
    }

    store.dispatch(BaselineAction::ClearErrorData).unwrap();
    store
        .dispatch(BaselineAction::FetchBaselineData(RequestPhase::Fulfilled(baseline())))
        .unwrap();
    assert_eq!(table(&store).rows.len(), 2);
}
