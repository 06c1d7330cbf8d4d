//! # Remove Command
//!
//! Deletes the generated artifacts from the project. A file that is already
//! gone is not an error; a file that cannot be deleted is logged and the
//! rest are still attempted.

use std::io::ErrorKind;

use dictionary_core::naming::combine_path;
use dictionary_core::Artifact;
use tracing::warn;

use crate::commands::{load_options, require_project};
use crate::error::{CommandError, CommandResult};
use crate::host::Host;
use crate::output::OperationLog;

/// Counts from one remove run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveSummary {
    pub removed: usize,
    pub missing: usize,
    pub failed: usize,
}

impl RemoveSummary {
    pub fn total(&self) -> usize {
        Artifact::ALL.len()
    }
}

/// Deletes every artifact file.
///
/// ## Returns
/// * `Ok(summary)` - Every file was attempted; see `failed` for errors
/// * `Err(CommandError::Environment)` - No project selected
/// * `Err(CommandError::Settings)` - Options file unreadable
pub async fn remove(host: &dyn Host) -> CommandResult<RemoveSummary> {
    let log = OperationLog::start(host.output());
    log.line("Running operation...");

    let result = run(&log, host).await;
    if let Err(e) = &result {
        log.line(&e.to_string());
    }
    log.finish();

    result
}

async fn run(log: &OperationLog<'_>, host: &dyn Host) -> CommandResult<RemoveSummary> {
    let project = require_project(host, "Removal failed, project not found.")?;

    log.line("Resolving options...");
    let options = load_options(&project)?;

    log.line("Removing files...");
    log.blank();

    let mut summary = RemoveSummary::default();
    for artifact in Artifact::ALL {
        let relative = &options.artifacts.get(artifact).path;
        let path = combine_path(&project.directory, relative);

        log.line(&format!("Removing {}", relative));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                summary.removed += 1;
                log.line("File removed");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                summary.missing += 1;
                log.line("File not found");
            }
            Err(e) => {
                summary.failed += 1;
                warn!(?path, error = %e, "Could not remove artifact");
                log.line(&format!("Failed to remove file: {}", CommandError::io(&path, e)));
            }
        }
    }

    log.blank();
    if summary.failed == 0 {
        log.line(&format!(
            "Removed {}/{} files successfully.",
            summary.removed,
            summary.total()
        ));
    } else {
        log.line(&format!(
            "Removed {}/{} files with errors.",
            summary.removed,
            summary.total()
        ));
    }

    Ok(summary)
}
