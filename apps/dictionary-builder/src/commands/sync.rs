//! # Sync Command
//!
//! Replaces the dictionary tables of one tier with those of another.
//!
//! ```text
//! confirm ──no──► cancelled (nothing opened)
//!    │
//!   yes
//!    ▼
//! options ─► endpoints ─► SyncEngine::connect
//!                               │
//!            spawn(engine.run) ─┴─► SyncEvent ──mpsc──► operation log
//! ```

use dictionary_db::DbConfig;
use dictionary_sync::{SyncEndpoint, SyncEngine, SyncError, SyncReport};
use tokio::sync::mpsc;
use tracing::info;

use crate::commands::{load_options, require_project, tier_url};
use crate::error::{CommandError, CommandResult};
use crate::host::Host;
use crate::output::OperationLog;
use crate::settings::Tier;

/// Confirmation title for a sync between two tiers.
pub fn confirmation_title(from: Tier, to: Tier) -> String {
    format!("Synchronise the dictionary tables from <{}> to <{}>.", from, to)
}

/// Confirmation body for a sync into `to`.
pub fn confirmation_message(to: Tier) -> String {
    format!(
        "All existing data in the <{}> dictionary tables will be truncated prior to the import. \
         It is strongly recommended to backup the database first.\n\nDo you want to continue?",
        to
    )
}

/// Copies the dictionary tables from `from` to `to`.
///
/// ## Returns
/// * `Ok(Some(report))` - Sync completed
/// * `Ok(None)` - The user declined; nothing was opened or changed
/// * `Err(CommandError::Sync)` - Connectivity, clear or transfer failure
pub async fn sync(host: &dyn Host, from: Tier, to: Tier) -> CommandResult<Option<SyncReport>> {
    let log = OperationLog::start(host.output());
    log.line("Running operation...");

    let result = run(host, &log, from, to).await;

    match &result {
        Ok(Some(_)) => log.line("Synchronisation completed successfully."),
        Ok(None) => log.line("Synchronisation cancelled."),
        Err(e @ CommandError::Environment(_)) => log.line(&e.to_string()),
        Err(e) => {
            log.line(&e.to_string());
            log.line("Synchronisation failed.");
        }
    }
    log.finish();

    result
}

async fn run(
    host: &dyn Host,
    log: &OperationLog<'_>,
    from: Tier,
    to: Tier,
) -> CommandResult<Option<SyncReport>> {
    let project = require_project(host, "Synchronisation failed, project not found.")?;

    if from == to {
        return Err(SyncError::InvalidConfig(format!(
            "the source and target tier are both {}",
            from
        ))
        .into());
    }

    if !host.confirm(&confirmation_title(from, to), &confirmation_message(to)) {
        info!(%from, %to, "Sync declined");
        return Ok(None);
    }

    log.line("Resolving options...");
    let options = load_options(&project)?;
    let source = SyncEndpoint::new(DbConfig::new(tier_url(&options, from)?));
    let target = SyncEndpoint::new(DbConfig::new(tier_url(&options, to)?));

    log.line(&format!("Starting synchronisation from <{}> to <{}>...", from, to));

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let engine = SyncEngine::connect(source, target).await?.with_events(events_tx);

    let task = tokio::spawn(async move { engine.run().await });

    // The channel closes when the task drops the engine
    while let Some(event) = events_rx.recv().await {
        log.line(&event.to_string());
    }

    let report = task
        .await
        .map_err(|e| CommandError::Environment(format!("Synchronisation task failed: {}", e)))??;

    info!(
        %from,
        %to,
        copied = report.total_copied(),
        cleared = report.total_cleared(),
        "Sync finished"
    );
    Ok(Some(report))
}
