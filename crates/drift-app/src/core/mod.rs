//! # Core Application Module
//!
//! - [`BaselineAction`]: every event the edit-baseline screen can dispatch
//! - [`EditBaselineState`]: the state container those actions reduce into
//! - [`DisplayState`]: what the screen should render right now

mod action;
mod reducer;

pub use action::{BaselineAction, FactDraft, RequestPhase};
pub use reducer::{DisplayState, EditBaselineState, FactModalState};
