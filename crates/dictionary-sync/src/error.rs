//! # Sync Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Connectivity   │  │     Table steps         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connectivity   │  │  ClearFailed            │ │
//! │  │  (same tier on  │  │  (open / ping   │  │  TransferFailed         │ │
//! │  │   both sides)   │  │   failed)       │  │  + RollbackOutcome      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is fatal: the engine stops at the first error and
//! re-running the sync is the recovery path.

use std::fmt;

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// What happened to the open transaction after a step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The transaction was rolled back; the target is as it was before the step.
    RolledBack,

    /// Rolling back failed too; the target may be partially modified.
    Failed(String),
}

impl RollbackOutcome {
    /// Returns true if the rollback went through.
    pub fn succeeded(&self) -> bool {
        matches!(self, RollbackOutcome::RolledBack)
    }
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackOutcome::RolledBack => write!(f, "Transaction rolled back successfully."),
            RollbackOutcome::Failed(reason) => {
                write!(f, "Transaction rollback failed ({}).", reason)
            }
        }
    }
}

/// Sync error type covering all possible sync failures.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Source and target resolve to the same database, or a tier is unusable.
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// A database could not be opened or did not answer the round-trip query.
    ///
    /// ## When This Occurs
    /// - Missing file or bad URL for a tier
    /// - Database locked by another process
    #[error("Could not connect to {host}: {reason}. Check the connection settings and try again.")]
    Connectivity { host: String, reason: String },

    /// Deleting the target rows failed.
    #[error("An error occurred attempting to clear {table} on {host}: {reason}. {rollback}")]
    ClearFailed {
        table: String,
        host: String,
        reason: String,
        rollback: RollbackOutcome,
    },

    /// Copying one table failed part way.
    #[error(
        "An error occurred attempting to copy {table} from {source_host} to {target_host}: {reason}. {rollback}"
    )]
    TransferFailed {
        table: String,
        source_host: String,
        target_host: String,
        reason: String,
        rollback: RollbackOutcome,
    },
}

impl SyncError {
    /// Table named by a clear or transfer failure.
    pub fn table(&self) -> Option<&str> {
        match self {
            SyncError::ClearFailed { table, .. } | SyncError::TransferFailed { table, .. } => {
                Some(table)
            }
            _ => None,
        }
    }

    /// Rollback outcome of a clear or transfer failure.
    pub fn rollback(&self) -> Option<&RollbackOutcome> {
        match self {
            SyncError::ClearFailed { rollback, .. }
            | SyncError::TransferFailed { rollback, .. } => Some(rollback),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_failed_message() {
        let err = SyncError::ClearFailed {
            table: "cmsDictionary".to_string(),
            host: "staging.db".to_string(),
            reason: "simulated write error".to_string(),
            rollback: RollbackOutcome::RolledBack,
        };

        assert_eq!(
            err.to_string(),
            "An error occurred attempting to clear cmsDictionary on staging.db: \
             simulated write error. Transaction rolled back successfully."
        );
        assert_eq!(err.table(), Some("cmsDictionary"));
        assert!(err.rollback().unwrap().succeeded());
    }

    #[test]
    fn test_transfer_failed_reports_rollback_failure() {
        let err = SyncError::TransferFailed {
            table: "cmsLanguageText".to_string(),
            source_host: "live.example.com".to_string(),
            target_host: "staging.example.com".to_string(),
            reason: "disk full".to_string(),
            rollback: RollbackOutcome::Failed("connection reset".to_string()),
        };

        assert!(err.to_string().ends_with("Transaction rollback failed (connection reset)."));
        assert!(!err.rollback().unwrap().succeeded());
    }

    #[test]
    fn test_connectivity_has_no_table() {
        let err = SyncError::Connectivity {
            host: "live.db".to_string(),
            reason: "unable to open database file".to_string(),
        };
        assert_eq!(err.table(), None);
        assert!(err.to_string().starts_with("Could not connect to live.db"));
    }
}
