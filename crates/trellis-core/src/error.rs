//! Error types for Trellis.
//!
//! Only conditions a caller can meaningfully react to surface as errors.
//! Programming-contract violations (removing a child by an out-of-range
//! index, querying an unregistered grid anchor) panic instead: continuing
//! past them would corrupt tree invariants.

use crate::id::WidgetId;

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised by widget-tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The referenced widget does not exist (stale or foreign id).
    #[error("widget {0:?} is not in the tree")]
    UnknownWidget(WidgetId),

    /// Attempted to insert a widget that is already linked under a parent.
    ///
    /// Callers must remove a widget from its old parent before re-inserting
    /// it elsewhere.
    #[error("widget {0:?} already has a parent")]
    AlreadyParented(WidgetId),

    /// A popup was attached to a widget that is not a window.
    #[error("widget {0:?} is not a window and cannot own a popup")]
    NotAWindow(WidgetId),
}
