//! # dictionary-db: Database Layer for the Dictionary Builder
//!
//! Access to the CMS localization tables in SQLite, using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dictionary Builder Data Flow                        │
//! │                                                                         │
//! │  rebuild command                    dictionary-sync                    │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dictionary-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ DictionaryRepo │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ LanguageRepo   │    │ 001_locali-  │  │   │
//! │  │   │ per tier      │    │ TextRepo       │    │ zation_tables│  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Development / Staging / Live SQLite databases                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema for dev and test databases
//! - [`error`] - Database error types
//! - [`repository`] - Repositories and raw table records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dictionary_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sqlite://data/live.db")).await?;
//! let entries = db.dictionary().entries().await?;
//! let languages = db.languages().all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{host_label, Database, DbConfig};

// Repository re-exports for convenience
pub use repository::dictionary::{DictionaryRecord, DictionaryRepository};
pub use repository::language::{LanguageRecord, LanguageRepository};
pub use repository::text::{LanguageTextRecord, LanguageTextRepository};
pub use repository::TableRecord;
