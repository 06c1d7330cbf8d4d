//! # dictionary-sync: Tier Synchronisation
//!
//! Copies the dictionary tables from one tier to another, typically Live
//! to Staging, so both serve the same keys and translations.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Architecture                                 │
//! │                                                                         │
//! │  SyncEndpoint (Live)          SyncEndpoint (Staging)                   │
//! │       │ label + DbConfig            │ label + DbConfig                  │
//! │       └──────────┬──────────────────┘                                   │
//! │                  ▼                                                      │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                SyncEngine (engine.rs)                            │  │
//! │  │  validate → clear target (1 tx) → transfer (1 tx per table)      │  │
//! │  └───────────────┬──────────────────────────────────┬───────────────┘  │
//! │                  │                                  │                   │
//! │                  ▼                                  ▼                   │
//! │  SyncEvent over mpsc                   SyncReport / SyncError          │
//! │  (progress lines for the host)         (rows per table / which table)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - The `SyncEngine` state machine
//! - [`tables`] - Table order and foreign keys
//! - [`endpoint`] - Endpoint labels and self-copy detection
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dictionary_sync::{SyncEndpoint, SyncEngine};
//! use dictionary_db::DbConfig;
//!
//! let live = SyncEndpoint::new(DbConfig::new("sqlite://data/live.db"));
//! let staging = SyncEndpoint::new(DbConfig::new("sqlite://data/staging.db"));
//!
//! let report = SyncEngine::connect(live, staging).await?.run().await?;
//! println!("{} rows copied", report.total_copied());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod endpoint;
pub mod engine;
pub mod error;
pub mod tables;

// =============================================================================
// Re-exports
// =============================================================================

pub use dictionary_db::host_label;
pub use endpoint::SyncEndpoint;
pub use engine::{SyncEngine, SyncEvent, SyncReport, TableReport, DEFAULT_BATCH_SIZE};
pub use error::{RollbackOutcome, SyncError, SyncResult};
pub use tables::{ForeignKeyConstraint, SyncTable, TableSyncTarget};
