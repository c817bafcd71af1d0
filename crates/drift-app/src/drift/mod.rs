//! # Drift Comparison Toolbar
//!
//! Filter chips and pagination for the comparison table. The comparison
//! itself is computed server-side; this module only tracks what the user
//! asked to see.

mod filter;

pub use filter::{
    ChipKind, ComparisonState, DriftFilterState, FilterError, Pagination, StateFilter,
    DEFAULT_PER_PAGE,
};
