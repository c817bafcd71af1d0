//! Show Command Handler
//!
//! Replays expand / select / sort interactions and renders the fact table as
//! plain text.

use super::{load_baseline, open_store};
use anyhow::Result;
use drift_app::drift::DriftFilterState;
use drift_app::{
    BaselineAction, BaselineStore, DisplayState, DriftConfig, FactId, FactRow, FactTableView,
    Permissions, RowDepth, SortDirection, SortField,
};
use std::fmt::Write as _;
use std::path::Path;

/// Interactions to replay before rendering.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Categories to expand, in order
    pub expand: Vec<String>,
    /// Fact ids to check, in order
    pub select: Vec<FactId>,
    /// Check every fact first
    pub select_all: bool,
    /// Column headers to activate, in order
    pub sort: Vec<SortField>,
    /// Drop write permission
    pub read_only: bool,
    /// Free-text fact name filter
    pub filter: Option<String>,
    /// 1-based page
    pub page: usize,
}

/// Load `baseline`, replay `options` and render the screen.
pub fn run(config: &DriftConfig, baseline: &Path, options: &ShowOptions) -> Result<String> {
    let permissions = if options.read_only {
        Permissions::READ_ONLY
    } else {
        Permissions::READ_WRITE
    };

    let store = open_store(load_baseline(baseline)?, permissions)?;
    replay(&store, options)?;

    let mut filters = DriftFilterState::new();
    if let Some(text) = &options.filter {
        filters.filter_by_fact(text.as_str());
    }
    filters.update_pagination(options.page, config.table.per_page)?;

    Ok(render(config, &store.display(), &filters))
}

/// Dispatch the interactions in `options` into `store`.
pub fn replay(store: &BaselineStore, options: &ShowOptions) -> Result<()> {
    for name in &options.expand {
        store.dispatch(BaselineAction::ExpandParentFact { name: name.clone() })?;
    }

    if options.select_all {
        store.dispatch(BaselineAction::BulkSelectFacts { selected: true })?;
    }
    for &id in &options.select {
        store.dispatch(BaselineAction::SelectFact { id, selected: true })?;
    }

    for field in &options.sort {
        let action = match field {
            SortField::Name => BaselineAction::ToggleFactSort,
            SortField::Value => BaselineAction::ToggleValueSort,
        };
        store.dispatch(action)?;
    }

    Ok(())
}

/// Render a display decision as text.
pub fn render(config: &DriftConfig, display: &DisplayState, filters: &DriftFilterState) -> String {
    match display {
        DisplayState::Loading => "░░░░░░░░░░░░░░░░\n".repeat(config.table.loading_rows),
        DisplayState::Error(error) => {
            format!("{error}\n{}\n", config.messages.fetch_error)
        }
        DisplayState::Empty => format!(
            "{}\n{}\n",
            config.messages.empty_baseline_title, config.messages.empty_baseline_message
        ),
        DisplayState::Table { view, alert } => match alert {
            Some(error) => format!("! {error}\n{}", render_table(view, filters)),
            None => render_table(view, filters),
        },
    }
}

fn sort_icon(direction: SortDirection) -> char {
    match direction {
        SortDirection::Ascending => '↑',
        SortDirection::Descending => '↓',
        SortDirection::None => '↕',
    }
}

/// Rows that pass the fact filter. Sub-facts follow their category.
fn visible_rows<'a>(rows: &'a [FactRow], filters: &DriftFilterState) -> Vec<&'a FactRow> {
    let mut parent_visible = false;
    rows.iter()
        .filter(|row| match row.depth {
            RowDepth::TopLevel => {
                parent_visible = filters.matches_fact(&row.name);
                parent_visible
            }
            RowDepth::Nested => parent_visible,
        })
        .collect()
}

fn render_table(view: &FactTableView, filters: &DriftFilterState) -> String {
    let visible = visible_rows(&view.rows, filters);
    let window = filters.pagination().window(visible.len());
    let width = visible
        .iter()
        .map(|row| row.name.chars().count() + 2 * usize::from(row.depth.level()))
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    let checkbox_pad = if view.selectable { "    " } else { "" };
    let _ = writeln!(
        out,
        "{checkbox_pad}  {:<width$} {} Value {}",
        "Fact",
        sort_icon(view.name_sort),
        sort_icon(view.value_sort),
    );

    for row in &visible[window.clone()] {
        let checkbox = match (view.selectable, row.selected) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        let icon = match (row.is_category, row.expanded) {
            (true, true) => '▾',
            (true, false) => '▸',
            (false, _) => ' ',
        };
        let name = match row.depth {
            RowDepth::TopLevel => row.name.clone(),
            RowDepth::Nested => format!("  {}", row.name),
        };
        let value = row.value.as_deref().unwrap_or("");
        let _ = writeln!(out, "{checkbox}{icon} {name:<width$}   {value}");
    }

    let _ = writeln!(
        out,
        "{} of {} selected | rows {}-{} of {}",
        view.summary.selected_count,
        view.total_facts,
        window.start + usize::from(!window.is_empty()),
        window.end,
        visible.len(),
    );
    out
}
