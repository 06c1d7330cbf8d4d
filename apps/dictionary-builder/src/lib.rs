//! # dictionary-builder: Command Line Host
//!
//! Wires the pure code generator and the sync engine to a project on disk.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        dictionary-builder                               │
//! │                                                                         │
//! │  cli ──► TerminalHost ──► commands ─┬─► rebuild ─► generator ─► files  │
//! │                                     ├─► remove  ──────────────► files  │
//! │                                     ├─► sync    ─► dictionary-sync     │
//! │                                     └─► options ─► settings (TOML)     │
//! │                                                                         │
//! │  settings ◄── crypto (AES-256-GCM passwords)                           │
//! │  output   ──► OperationLog ("DictionaryBuilder: ..." lines)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - `clap` argument definitions and dispatch
//! - [`commands`] - rebuild, remove, sync, options
//! - [`generator`] - Artifact plan, rendering, concurrent writes
//! - [`settings`] - Options file (load / save / validate / env overrides)
//! - [`crypto`] - Password encryption
//! - [`host`] - Project discovery and the `Host` trait
//! - [`output`] - Output channels and the operation log
//! - [`error`] - `CommandError`

pub mod cli;
pub mod commands;
pub mod crypto;
pub mod error;
pub mod generator;
pub mod host;
pub mod output;
pub mod settings;

pub use error::{CommandError, CommandResult};
pub use host::{Host, ProjectContext, TerminalHost};
pub use output::{ConsoleOutput, MemoryOutput, OperationLog, OutputChannel};
pub use settings::{Options, SettingsError, SettingsResult, Tier};

/// Sets up `tracing` output.
///
/// `RUST_LOG` takes precedence over the built-in filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dictionary=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
