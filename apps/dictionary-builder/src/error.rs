//! # Command Error Type
//!
//! Unified error type for the builder commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in a Command                             │
//! │                                                                         │
//! │  rebuild / remove / sync / options                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  No project?  ────── CommandError::Environment ──────────┐             │
//! │  Options?     ────── SettingsError ──────────────────────┤             │
//! │  Open tier?   ────── CommandError::Connectivity ─────────┤             │
//! │  Query?       ────── DbError ("Database error, ...") ────┤             │
//! │  Sync step?   ────── SyncError ──────────────────────────┤             │
//! │  Artifacts?   ────── CommandError::Aggregate ────────────┤             │
//! │                                                          ▼             │
//! │                                              OperationLog + stderr     │
//! │                                              exit code 1               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;

use dictionary_core::CoreError;
use dictionary_db::DbError;
use dictionary_sync::SyncError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Result type for commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors a command reports to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The host could not provide what the command needs.
    ///
    /// ## When This Occurs
    /// - No project directory could be resolved
    /// - The user pointed at a directory that does not exist
    #[error("{0}")]
    Environment(String),

    /// A tier database could not be opened.
    #[error("Could not connect to {host}: {reason}. Check the SQL connection preferences in the options file and try again.")]
    Connectivity { host: String, reason: String },

    /// The tier has no connection URL.
    #[error("No connection is configured for the {tier} tier. Check the SQL connection preferences in the options file and try again.")]
    MissingConnection { tier: String },

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// One artifact could not be rendered.
    #[error("Could not build the {label}: {source}")]
    Render {
        label: &'static str,
        #[source]
        source: CoreError,
    },

    /// A file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Several independent steps failed. Each message is reported.
    #[error("{}", AggregateDisplay(.0))]
    Aggregate(Vec<String>),
}

impl CommandError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CommandError::Io {
            path: path.into(),
            source,
        }
    }

    /// Folds a list of failures into one error.
    ///
    /// ## Returns
    /// * `None` - No failures
    /// * `Some(e)` - The single failure, or an aggregate of several
    pub fn collect(mut errors: Vec<CommandError>) -> Option<CommandError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(CommandError::Aggregate(
                errors.iter().map(ToString::to_string).collect(),
            )),
        }
    }
}

struct AggregateDisplay<'a>(&'a [String]);

impl fmt::Display for AggregateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DictionaryBuilder: ({}) errors occurred:", self.0.len())?;
        for (index, message) in self.0.iter().enumerate() {
            write!(f, "\n[Error {}]\n{}\n", index + 1, message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_format() {
        let err = CommandError::Aggregate(vec![
            "first failure".to_string(),
            "second failure".to_string(),
        ]);

        assert_eq!(
            err.to_string(),
            "DictionaryBuilder: (2) errors occurred:\n\
             \n[Error 1]\nfirst failure\n\
             \n[Error 2]\nsecond failure\n"
        );
    }

    #[test]
    fn test_collect() {
        assert!(CommandError::collect(Vec::new()).is_none());

        let single = CommandError::collect(vec![CommandError::Environment("one".into())]);
        assert!(matches!(single, Some(CommandError::Environment(_))));

        let many = CommandError::collect(vec![
            CommandError::Environment("one".into()),
            CommandError::Environment("two".into()),
        ]);
        match many {
            Some(CommandError::Aggregate(messages)) => assert_eq!(messages, vec!["one", "two"]),
            other => panic!("expected aggregate, got {:?}", other),
        }
    }

    #[test]
    fn test_database_error_envelope() {
        let err: CommandError = DbError::QueryFailed("no such table: cmsDictionary".into()).into();
        assert_eq!(err.to_string(), "Database error, no such table: cmsDictionary");
    }

    #[test]
    fn test_missing_connection_message() {
        let err = CommandError::MissingConnection {
            tier: "Live".to_string(),
        };
        assert!(err.to_string().starts_with("No connection is configured for the Live tier"));
    }
}
