//! # Builder Commands
//!
//! One module per command. Each takes a [`Host`] and writes its progress to
//! the host's output channel.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ← You are here (shared helpers)
//! ├── rebuild.rs  ← Generate the six artifacts from the source tier
//! ├── remove.rs   ← Delete generated artifacts
//! ├── sync.rs     ← Copy dictionary tables between tiers
//! └── options.rs  ← Create, show and edit the options file
//! ```

pub mod options;
pub mod rebuild;
pub mod remove;
pub mod sync;

use std::path::PathBuf;

use dictionary_core::naming::options_file_path;
use dictionary_db::{Database, DbConfig};
use dictionary_sync::host_label;
use tracing::debug;

use crate::error::{CommandError, CommandResult};
use crate::host::{Host, ProjectContext};
use crate::settings::{Options, Tier};

pub use options::{configure, OptionsAction};
pub use rebuild::rebuild;
pub use remove::remove;
pub use sync::sync;

/// The selected project, or an environment error with `failure` as message.
pub(crate) fn require_project(host: &dyn Host, failure: &str) -> CommandResult<ProjectContext> {
    host.project()
        .ok_or_else(|| CommandError::Environment(failure.to_string()))
}

/// Path of the options file for a project.
pub(crate) fn options_path(project: &ProjectContext) -> PathBuf {
    options_file_path(&project.solution_path)
}

/// Loads the options for a project.
pub(crate) fn load_options(project: &ProjectContext) -> CommandResult<Options> {
    Ok(Options::load(&options_path(project))?)
}

/// Database URL for a tier, credentials filled in.
pub(crate) fn tier_url(options: &Options, tier: Tier) -> CommandResult<String> {
    options
        .connection_url(tier)
        .ok_or_else(|| CommandError::MissingConnection {
            tier: tier.to_string(),
        })
}

/// Opens a tier database.
///
/// The database must already exist; nothing is created or migrated.
pub(crate) async fn open_tier(options: &Options, tier: Tier) -> CommandResult<Database> {
    let url = tier_url(options, tier)?;
    debug!(%tier, host = %host_label(&url), "Opening tier database");

    Database::new(DbConfig::new(url.clone()))
        .await
        .map_err(|e| CommandError::Connectivity {
            host: host_label(&url),
            reason: e.to_string(),
        })
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use uuid::Uuid;

    use super::*;
    use crate::output::{MemoryOutput, OutputChannel};

    /// Host with a fixed project, a canned confirmation answer and an
    /// in-memory log.
    pub struct MockHost {
        pub project: Option<ProjectContext>,
        pub answer: bool,
        pub prompts: AtomicUsize,
        pub output: MemoryOutput,
    }

    impl MockHost {
        pub fn new(project: Option<ProjectContext>) -> Self {
            MockHost {
                project,
                answer: true,
                prompts: AtomicUsize::new(0),
                output: MemoryOutput::new(),
            }
        }

        pub fn declining(mut self) -> Self {
            self.answer = false;
            self
        }

        pub fn prompt_count(&self) -> usize {
            self.prompts.load(Ordering::SeqCst)
        }
    }

    impl Host for MockHost {
        fn project(&self) -> Option<ProjectContext> {
            self.project.clone()
        }

        fn confirm(&self, _title: &str, _message: &str) -> bool {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.answer
        }

        fn output(&self) -> &dyn OutputChannel {
            &self.output
        }
    }

    pub fn project_in(dir: &Path) -> ProjectContext {
        ProjectContext {
            name: "Acme.Web".to_string(),
            directory: dir.join("Acme.Web"),
            solution_path: dir.join("Acme.sln"),
        }
    }

    /// Creates a migrated database file with a small dictionary.
    pub async fn seeded_database(path: &Path) -> Database {
        let db = Database::new(
            DbConfig::from_path(path)
                .create_if_missing(true)
                .run_migrations(true),
        )
        .await
        .unwrap();

        let english = db.languages().insert("en-GB", "English (United Kingdom)", true).await.unwrap();
        let french = db.languages().insert("fr-FR", "French (France)", false).await.unwrap();

        let general = Uuid::new_v4();
        db.dictionary().insert(general, None, "General").await.unwrap();
        let save = Uuid::new_v4();
        db.dictionary().insert(save, Some(general), "Save").await.unwrap();
        db.language_texts().insert(english, save, "Save").await.unwrap();
        db.language_texts().insert(french, save, "Enregistrer").await.unwrap();

        db
    }

    /// Writes options pointing the given tiers at database files.
    pub fn write_options(project: &ProjectContext, tiers: &[(Tier, &Path)]) -> Options {
        let mut options = Options::default();
        for (tier, path) in tiers {
            options.connections.get_mut(*tier).url = format!("sqlite://{}", path.display());
        }
        options.save(&options_path(project)).unwrap();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_require_project() {
        let host = MockHost::new(None);
        let err = require_project(&host, "Export failed, project not found.").unwrap_err();
        assert_eq!(err.to_string(), "Export failed, project not found.");
    }

    #[tokio::test]
    async fn test_open_tier_without_url() {
        let err = open_tier(&Options::default(), Tier::Live).await.unwrap_err();
        assert!(matches!(err, CommandError::MissingConnection { .. }));
    }

    #[tokio::test]
    async fn test_open_tier_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = Options::default();
        options.connections.staging.url = dir.path().join("missing.db").display().to_string();

        let err = open_tier(&options, Tier::Staging).await.unwrap_err();
        match err {
            CommandError::Connectivity { host, .. } => assert!(host.ends_with("missing.db")),
            other => panic!("expected connectivity error, got {:?}", other),
        }
    }

    /// Formatted log output shared with the subscriber.
    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_open_tier_never_logs_decrypted_password() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.db");
        let mut options = Options::default();
        options.connections.live.url =
            format!("sqlite://{}?user={{username}}&pw={{password}}", path.display());
        options.connections.live.username = "sa".to_string();
        options.set_password(Tier::Live, "TopSecret123");
        assert!(options
            .connection_url(Tier::Live)
            .unwrap()
            .contains("TopSecret123"));

        if let Err(err) = open_tier(&options, Tier::Live).await {
            assert!(!err.to_string().contains("TopSecret123"));
        }

        let output = String::from_utf8_lossy(&log.0.lock().unwrap()).into_owned();
        assert!(output.contains("Initializing database connection"));
        assert!(!output.contains("TopSecret123"));
    }
}
