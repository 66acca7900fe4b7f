//! Errors raised while evaluating a turn.
//!
//! Missing data (no build site, no target) is never an error; it makes the
//! mission arbiter fall through to the next tier. These variants cover
//! snapshots the engine cannot reason about at all, and references that went
//! stale between planning and execution.

use game_core::{EntityId, ErrorSeverity, GameError, Side, SnapshotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TacticsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TacticsError {
    #[error("no {side} castle in snapshot")]
    MissingCastle { side: Side },

    #[error("entity {0} vanished from the snapshot")]
    UnknownEntity(EntityId),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl GameError for TacticsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TacticsError::MissingCastle { .. } => ErrorSeverity::Validation,
            TacticsError::UnknownEntity(_) => ErrorSeverity::Recoverable,
            TacticsError::Snapshot(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TacticsError::MissingCastle { .. } => "TACTICS_MISSING_CASTLE",
            TacticsError::UnknownEntity(_) => "TACTICS_UNKNOWN_ENTITY",
            TacticsError::Snapshot(inner) => inner.error_code(),
        }
    }
}
