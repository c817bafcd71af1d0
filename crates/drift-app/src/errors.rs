//! Categorized errors
//!
//! Every error raised by the core maps onto an [`ErrorCategory`] so frontends
//! can pick a banner, a toast or a retry affordance without matching on
//! concrete variants.

use crate::facts::FactId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Categories
// ============================================================================

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by user)
    Input,
    /// Configuration errors (correctable by modifying settings)
    Config,
    /// Permission errors (the user may not perform this action)
    Capability,
    /// The referenced fact or category is not in the current tree
    NotFound,
    /// Upstream fetch failures (often transient)
    Network,
}

impl ErrorCategory {
    /// Check if this error category is user-correctable.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input | Self::Config)
    }

    /// Check if this error category is likely transient.
    ///
    /// A stale id is transient: refreshing the view from the authoritative
    /// fact tree resolves it.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network | Self::NotFound)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Config => "Config",
            Self::Capability => "Permission",
            Self::NotFound => "Not Found",
            Self::Network => "Network",
        }
    }

    /// Get a hint for the user on how to resolve this category of error.
    #[must_use]
    pub fn resolution_hint(&self) -> &'static str {
        match self {
            Self::Input => "Check your input and try again",
            Self::Config => "Review your configuration settings",
            Self::Capability => "This action requires write permission",
            Self::NotFound => "The table is out of date; refresh and try again",
            Self::Network => "Retry, and contact your administrator if the problem persists",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Projector Errors
// ============================================================================

/// Errors raised by selection and expansion transitions.
///
/// Each variant signals that the UI state and the fact tree have drifted
/// apart; callers log it and re-render from the authoritative tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectorError {
    /// No fact with this id exists in the current tree
    #[error("fact {id} not found in current fact tree")]
    FactNotFound { id: FactId },

    /// No category with this name exists in the current tree
    #[error("category '{name}' not found in current fact tree")]
    CategoryNotFound { name: String },

    /// Selection was attempted without write permission
    #[error("selecting facts requires write permission")]
    ReadOnly,
}

impl ProjectorError {
    /// Category used for frontend routing.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FactNotFound { .. } | Self::CategoryNotFound { .. } => ErrorCategory::NotFound,
            Self::ReadOnly => ErrorCategory::Capability,
        }
    }
}

// ============================================================================
// Upstream Errors
// ============================================================================

/// Failure reported by the fetch collaborator (e.g. a non-200 status).
///
/// The core only records it; the frontend renders it and must dispatch
/// `ClearErrorData` before retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Error {status}: {detail}")]
pub struct UpstreamFetchError {
    /// HTTP-like status code
    pub status: u16,
    /// Server-provided detail message
    pub detail: String,
}

impl UpstreamFetchError {
    /// Create a new upstream error.
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Category used for frontend routing.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self.status {
            401 | 403 => ErrorCategory::Capability,
            404 => ErrorCategory::NotFound,
            400 | 422 => ErrorCategory::Input,
            _ => ErrorCategory::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projector_errors_are_not_found_or_capability() {
        assert_eq!(
            ProjectorError::FactNotFound { id: 7 }.category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            ProjectorError::CategoryNotFound {
                name: "cpu".into()
            }
            .category(),
            ErrorCategory::NotFound
        );
        assert_eq!(ProjectorError::ReadOnly.category(), ErrorCategory::Capability);
    }

    #[test]
    fn upstream_error_display_matches_banner_text() {
        let err = UpstreamFetchError::new(500, "internal server error");
        assert_eq!(err.to_string(), "Error 500: internal server error");
        assert!(err.category().is_transient());
    }

    #[test]
    fn only_input_and_config_are_user_correctable() {
        let correctable: Vec<_> = [
            ErrorCategory::Input,
            ErrorCategory::Config,
            ErrorCategory::Capability,
            ErrorCategory::NotFound,
            ErrorCategory::Network,
        ]
        .into_iter()
        .filter(ErrorCategory::is_user_correctable)
        .collect();
        assert_eq!(correctable, vec![ErrorCategory::Input, ErrorCategory::Config]);
    }

    #[test]
    fn capability_hint_names_write_permission() {
        let category = ProjectorError::ReadOnly.category();
        assert_eq!(category.to_string(), "Permission");
        assert!(category.resolution_hint().contains("write permission"));
        assert!(!category.is_transient());
    }

    #[test]
    fn upstream_status_routes_to_category() {
        assert_eq!(UpstreamFetchError::new(403, "").category(), ErrorCategory::Capability);
        assert_eq!(UpstreamFetchError::new(404, "").category(), ErrorCategory::NotFound);
        assert_eq!(UpstreamFetchError::new(400, "").category(), ErrorCategory::Input);
        assert_eq!(UpstreamFetchError::new(503, "").category(), ErrorCategory::Network);
    }
}
