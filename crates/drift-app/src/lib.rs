//! # Drift App - Headless Baseline Fact Table Core
//!
//! This crate holds the pure logic behind the baseline editing and drift
//! comparison screens. Frontends fetch data and draw pixels; everything in
//! between lives here:
//!
//! - [`facts`]: the fact tree (leaf facts and categories of sub-facts)
//! - [`projector`]: fact tree + UI state → ordered table rows
//! - [`selection`] / [`expansion`] / [`sort`]: transient UI state and its transitions
//! - [`core`]: the action enumeration and the edit-baseline reducer
//! - [`drift`]: comparison toolbar filters and pagination
//! - [`store`]: a thin reactive binding over the reducer (feature `signals`)
//!
//! ## Flow
//!
//! ```text
//! Fetch → BaselineAction → Reduce → EditBaselineState → Project → Rows
//! ```
//!
//! The projector never mutates its inputs; every transition returns a new
//! value and the caller decides where to keep it.

#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod drift;
pub mod errors;
pub mod expansion;
pub mod export;
pub mod facts;
pub mod permissions;
pub mod projector;
pub mod selection;
pub mod sort;

#[cfg(feature = "signals")]
pub mod store;

pub use crate::core::{BaselineAction, DisplayState, EditBaselineState, FactDraft, RequestPhase};
pub use config::DriftConfig;
pub use errors::{ErrorCategory, ProjectorError, UpstreamFetchError};
pub use expansion::{toggle_expand, ExpansionSet};
pub use export::{ExportError, ExportFormat, ExportStatus, FactExporter};
pub use facts::{count_facts, find_fact, Baseline, BaselineFact, Fact, FactId, FactValue};
pub use permissions::Permissions;
pub use projector::{project, FactRow, FactTableView, RowDepth};
pub use selection::{bulk_select, selection_summary, toggle_select, SelectionSet, SelectionSummary};
pub use sort::{sort_facts, SortDirection, SortField, SortSpec, SortState};

#[cfg(feature = "signals")]
pub use store::BaselineStore;
