//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in
//! the workspace. Snapshot validation errors live here as well since every
//! consumer of a [`crate::WorldSnapshot`] can hit them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error enum with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Panics**: Missing data is modelled with `Option`; errors are reserved
//!   for inconsistent input

use crate::state::{EntityId, Side};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The next turn's fresh snapshot is expected to heal it
/// - **Validation**: Input was malformed and will not fix itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - skip this turn (or unit) and carry on.
    ///
    /// Examples: a referenced entity died between snapshot and evaluation
    Recoverable,

    /// Validation error - the input itself is unusable.
    ///
    /// Examples: castle missing from snapshot, duplicate identifiers
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all workspace errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Inconsistencies detected in a world snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot has no castle for side {side}")]
    MissingCastle { side: Side },

    #[error("entity {0} appears more than once in the snapshot")]
    DuplicateEntity(EntityId),

    #[error("map bounds {rows}x{cols} are not positive")]
    InvalidBounds { rows: i32, cols: i32 },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SnapshotError::MissingCastle { .. }
            | SnapshotError::DuplicateEntity(_)
            | SnapshotError::InvalidBounds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::MissingCastle { .. } => "SNAPSHOT_MISSING_CASTLE",
            SnapshotError::DuplicateEntity(_) => "SNAPSHOT_DUPLICATE_ENTITY",
            SnapshotError::InvalidBounds { .. } => "SNAPSHOT_INVALID_BOUNDS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_errors_are_not_recoverable() {
        let error = SnapshotError::DuplicateEntity(EntityId(3));
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert!(!error.severity().is_recoverable());
        assert_eq!(error.error_code(), "SNAPSHOT_DUPLICATE_ENTITY");
    }
}
