//! # Sync Engine
//!
//! Copies the localization tables from a source tier to a target tier.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SyncEngine::run()                                │
//! │                                                                         │
//! │  1. Validate    SELECT 1 on source, then target                        │
//! │       │         └── fail → Connectivity { host }                       │
//! │       ▼                                                                 │
//! │  2. Clear       ONE target transaction, foreign keys deferred          │
//! │       │         cmsLanguageText → cmsDictionary → umbracoLanguage      │
//! │       │         DELETE rows, reset sqlite_sequence                     │
//! │       │         └── fail → ROLLBACK, ClearFailed { table, rollback }   │
//! │       ▼                                                                 │
//! │  3. Transfer    ONE target transaction PER TABLE                       │
//! │                 umbracoLanguage → cmsDictionary → cmsLanguageText      │
//! │                 stream source rows → batched multi-row INSERT          │
//! │                 └── fail → ROLLBACK, TransferFailed { table, rollback }│
//! │                                                                         │
//! │  Progress: SyncEvent ──mpsc──► host output log                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are copied one after another, never in parallel, so every
//! referenced row exists before the rows that point at it.
//!
//! There is no cancellation. A failed run leaves the target either as it
//! was (clear failed) or with the tables before the failing one copied;
//! running the sync again is the recovery path.

use std::collections::BTreeMap;
use std::fmt;

use futures_util::TryStreamExt;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use dictionary_db::{
    Database, DictionaryRecord, LanguageRecord, LanguageTextRecord, TableRecord,
};

use crate::endpoint::SyncEndpoint;
use crate::error::{RollbackOutcome, SyncError, SyncResult};
use crate::tables::SyncTable;

// =============================================================================
// Constants
// =============================================================================

/// Rows per INSERT statement.
///
/// Four columns per row keeps a full batch under SQLite's 999 bind limit.
pub const DEFAULT_BATCH_SIZE: usize = 200;

// =============================================================================
// Events and Report
// =============================================================================

/// Progress notification sent while the engine runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A database answered the round-trip query.
    Connected { host: String },

    /// About to delete the rows of a target table.
    Clearing { table: SyncTable, host: String },

    /// Rows deleted (uncommitted until every table is cleared).
    Cleared { table: SyncTable, rows: u64 },

    /// About to copy a table.
    Transferring { table: SyncTable },

    /// Table copied and committed.
    Transferred { table: SyncTable, rows: u64 },
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::Connected { host } => write!(f, "Connected to {}", host),
            SyncEvent::Clearing { table, host } => {
                write!(f, "Clearing table [{}] on {}...", table, host)
            }
            SyncEvent::Cleared { table, rows } => {
                write!(f, "Cleared {} rows from [{}]", rows, table)
            }
            SyncEvent::Transferring { table } => write!(f, "Synchronising table [{}]...", table),
            SyncEvent::Transferred { table, rows } => {
                write!(f, "Copied {} rows into [{}]", rows, table)
            }
        }
    }
}

/// Row counts for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableReport {
    pub cleared: u64,
    pub copied: u64,
}

/// Outcome of a completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    tables: BTreeMap<SyncTable, TableReport>,
}

impl SyncReport {
    /// Counts for one table (zero if it was never touched).
    pub fn table(&self, table: SyncTable) -> TableReport {
        self.tables.get(&table).copied().unwrap_or_default()
    }

    /// Rows copied across all tables.
    pub fn total_copied(&self) -> u64 {
        self.tables.values().map(|t| t.copied).sum()
    }

    /// Rows deleted from the target across all tables.
    pub fn total_cleared(&self) -> u64 {
        self.tables.values().map(|t| t.cleared).sum()
    }

    fn entry(&mut self, table: SyncTable) -> &mut TableReport {
        self.tables.entry(table).or_default()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Makes the target's localization tables identical to the source's.
///
/// ## Usage
/// ```rust,ignore
/// let (tx, mut rx) = mpsc::unbounded_channel();
/// let engine = SyncEngine::connect(live, staging).await?.with_events(tx);
///
/// let task = tokio::spawn(async move { engine.run().await });
/// while let Some(event) = rx.recv().await {
///     log.write_line(&event.to_string());
/// }
/// let report = task.await??;
/// ```
#[derive(Debug)]
pub struct SyncEngine {
    source: Database,
    target: Database,
    source_host: String,
    target_host: String,
    events: Option<mpsc::UnboundedSender<SyncEvent>>,
    batch_size: usize,
}

impl SyncEngine {
    /// Creates an engine over two open databases.
    pub fn new(source: Database, target: Database) -> Self {
        SyncEngine {
            source,
            target,
            source_host: "source".to_string(),
            target_host: "target".to_string(),
            events: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Opens both endpoints.
    ///
    /// ## Returns
    /// * `Err(SyncError::InvalidConfig)` - Both sides are the same database
    /// * `Err(SyncError::Connectivity)` - A database could not be opened
    pub async fn connect(source: SyncEndpoint, target: SyncEndpoint) -> SyncResult<Self> {
        if let (Some(a), Some(b)) = (source.locator(), target.locator()) {
            if a == b {
                return Err(SyncError::InvalidConfig(format!(
                    "source and target are the same database ({})",
                    source.label
                )));
            }
        }

        let source_db = open(&source).await?;
        let target_db = open(&target).await?;

        Ok(SyncEngine::new(source_db, target_db).with_hosts(source.label, target.label))
    }

    /// Names used in events and errors.
    pub fn with_hosts(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_host = source.into();
        self.target_host = target.into();
        self
    }

    /// Sends progress events to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Rows per INSERT statement (minimum 1).
    pub fn batch_size(mut self, rows: usize) -> Self {
        self.batch_size = rows.max(1);
        self
    }

    /// Runs validate, clear and transfer.
    ///
    /// Stops at the first error; nothing after a failed step executes.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        info!(
            source = %self.source_host,
            target = %self.target_host,
            "Starting dictionary sync"
        );

        let mut report = SyncReport::default();

        self.validate().await?;
        self.clear_target(&mut report).await?;

        for table in SyncTable::TRANSFER_ORDER {
            self.emit(SyncEvent::Transferring { table });

            let rows = match table {
                SyncTable::Language => self.transfer::<LanguageRecord>(table).await?,
                SyncTable::Dictionary => self.transfer::<DictionaryRecord>(table).await?,
                SyncTable::LanguageText => self.transfer::<LanguageTextRecord>(table).await?,
            };

            report.entry(table).copied = rows;
            info!(table = %table, rows, "Table copied");
            self.emit(SyncEvent::Transferred { table, rows });
        }

        info!(rows = report.total_copied(), "Dictionary sync complete");
        Ok(report)
    }

    // =========================================================================
    // Steps
    // =========================================================================

    async fn validate(&self) -> SyncResult<()> {
        for (db, host) in [
            (&self.source, &self.source_host),
            (&self.target, &self.target_host),
        ] {
            db.health_check()
                .await
                .map_err(|e| SyncError::Connectivity {
                    host: host.clone(),
                    reason: e.to_string(),
                })?;

            debug!(host = %host, "Connection validated");
            self.emit(SyncEvent::Connected { host: host.clone() });
        }
        Ok(())
    }

    async fn clear_target(&self, report: &mut SyncReport) -> SyncResult<()> {
        let pool = self.target.pool();
        let has_sequence = has_sqlite_sequence(pool)
            .await
            .map_err(|e| SyncError::Connectivity {
                host: self.target_host.clone(),
                reason: reason(e),
            })?;

        let mut tx = pool.begin().await.map_err(|e| SyncError::Connectivity {
            host: self.target_host.clone(),
            reason: reason(e),
        })?;

        for table in SyncTable::CLEAR_ORDER {
            self.emit(SyncEvent::Clearing {
                table,
                host: self.target_host.clone(),
            });
            for fk in table.target().constraints {
                debug!(constraint = %fk, "Deferring foreign key");
            }

            match clear_table(&mut tx, table, has_sequence).await {
                Ok(rows) => {
                    report.entry(table).cleared = rows;
                    self.emit(SyncEvent::Cleared { table, rows });
                }
                Err(e) => {
                    let reason = reason(e);
                    warn!(table = %table, error = %reason, "Clearing table failed");
                    let rollback = rollback(tx).await;
                    return Err(SyncError::ClearFailed {
                        table: table.name().to_string(),
                        host: self.target_host.clone(),
                        reason,
                        rollback,
                    });
                }
            }
        }

        // A failed COMMIT leaves the transaction open; sqlx rolls it back
        // when the connection returns to the pool.
        tx.commit().await.map_err(|e| SyncError::ClearFailed {
            table: SyncTable::CLEAR_ORDER
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", "),
            host: self.target_host.clone(),
            reason: reason(e),
            rollback: RollbackOutcome::RolledBack,
        })?;

        info!(rows = report.total_cleared(), "Target tables cleared");
        Ok(())
    }

    async fn transfer<R: TableRecord>(&self, table: SyncTable) -> SyncResult<u64> {
        let mut tx = self
            .target
            .pool()
            .begin()
            .await
            .map_err(|e| self.transfer_failed(table, reason(e), RollbackOutcome::RolledBack))?;

        match self.copy_rows::<R>(&mut tx).await {
            Ok(rows) => {
                tx.commit().await.map_err(|e| {
                    self.transfer_failed(table, reason(e), RollbackOutcome::RolledBack)
                })?;
                Ok(rows)
            }
            Err(reason) => {
                warn!(table = %table, error = %reason, "Copying table failed");
                let rollback = rollback(tx).await;
                Err(self.transfer_failed(table, reason, rollback))
            }
        }
    }

    /// Streams the source table into the open target transaction.
    async fn copy_rows<R: TableRecord>(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
    ) -> Result<u64, String> {
        sqlx::query("PRAGMA defer_foreign_keys = ON")
            .execute(&mut **tx)
            .await
            .map_err(reason)?;

        let sql = R::select_sql();
        let mut rows = sqlx::query(&sql).fetch(self.source.pool());
        let mut batch: Vec<R> = Vec::with_capacity(self.batch_size);
        let mut copied = 0;

        while let Some(row) = rows.try_next().await.map_err(reason)? {
            batch.push(R::decode(&row).map_err(|e| e.to_string())?);

            if batch.len() >= self.batch_size {
                copied += insert_batch(tx, &mut batch).await.map_err(reason)?;
            }
        }
        copied += insert_batch(tx, &mut batch).await.map_err(reason)?;

        Ok(copied)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn transfer_failed(
        &self,
        table: SyncTable,
        reason: String,
        rollback: RollbackOutcome,
    ) -> SyncError {
        SyncError::TransferFailed {
            table: table.name().to_string(),
            source_host: self.source_host.clone(),
            target_host: self.target_host.clone(),
            reason,
            rollback,
        }
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(events) = &self.events {
            // Receiver gone means nobody is listening; the sync carries on.
            let _ = events.send(event);
        }
    }
}

async fn open(endpoint: &SyncEndpoint) -> SyncResult<Database> {
    Database::new(endpoint.config.clone())
        .await
        .map_err(|e| SyncError::Connectivity {
            host: endpoint.label.clone(),
            reason: e.to_string(),
        })
}

async fn has_sqlite_sequence(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
    )
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

async fn clear_table(
    tx: &mut Transaction<'static, Sqlite>,
    table: SyncTable,
    has_sequence: bool,
) -> Result<u64, sqlx::Error> {
    sqlx::query("PRAGMA defer_foreign_keys = ON")
        .execute(&mut **tx)
        .await?;

    let deleted = sqlx::query(&format!("DELETE FROM {}", table.name()))
        .execute(&mut **tx)
        .await?
        .rows_affected();

    if has_sequence {
        sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?1")
            .bind(table.name())
            .execute(&mut **tx)
            .await?;
    }

    Ok(deleted)
}

/// Sends one multi-row INSERT and empties `batch`.
async fn insert_batch<R: TableRecord>(
    tx: &mut Transaction<'static, Sqlite>,
    batch: &mut Vec<R>,
) -> Result<u64, sqlx::Error> {
    if batch.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(R::insert_prefix());
    builder.push_values(batch.drain(..), |tuple, record| record.push_tuple(tuple));

    let result = builder.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

async fn rollback(tx: Transaction<'static, Sqlite>) -> RollbackOutcome {
    match tx.rollback().await {
        Ok(()) => RollbackOutcome::RolledBack,
        Err(e) => RollbackOutcome::Failed(reason(e)),
    }
}

/// Database message without the driver's wrapping.
fn reason(err: sqlx::Error) -> String {
    match &err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        _ => err.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
