//! Baseline permissions gating the selection UI.

use serde::{Deserialize, Serialize};

/// What the current user may do with baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    /// May view baselines
    pub read: bool,
    /// May edit baselines (select, add, delete facts)
    pub write: bool,
}

impl Permissions {
    /// Read and write.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };

    /// Read only.
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
    };

    /// Whether checkboxes are offered at all.
    pub fn can_select(&self) -> bool {
        self.write
    }
}
