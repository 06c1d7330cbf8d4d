//! # Rebuild Command
//!
//! Reads the dictionary from the source tier and regenerates the six C#
//! artifacts in the project.
//!
//! ```text
//! project ─► options ─► open source tier ─► entries + languages
//!                                                  │
//!              write (concurrent) ◄── render ◄─────┘
//! ```

use tracing::{info, warn};

use crate::commands::{load_options, open_tier, require_project};
use crate::error::{CommandError, CommandResult};
use crate::generator::{plan_artifacts, render_artifacts, write_files};
use crate::host::Host;
use crate::output::OperationLog;
use crate::settings::Tier;

/// Regenerates every artifact.
///
/// ## Arguments
/// * `host` - Project, confirmation and output provider
/// * `source` - Tier to read from, overriding the options file
///
/// ## Returns
/// * `Ok(())` - All six files written
/// * `Err(CommandError::Environment)` - No project selected
/// * `Err(CommandError::Aggregate)` - Several artifacts failed
pub async fn rebuild(host: &dyn Host, source: Option<Tier>) -> CommandResult<()> {
    let log = OperationLog::start(host.output());
    log.line("Running operation...");

    let result = run(host, &log, source).await;

    match &result {
        Ok(()) => log.line("Export completed successfully."),
        Err(e @ CommandError::Environment(_)) => log.line(&e.to_string()),
        Err(e @ CommandError::Aggregate(_)) => {
            host.output().write_line(&e.to_string());
            log.line("Export failed.");
        }
        Err(e) => {
            log.line(&e.to_string());
            log.line("Export failed.");
        }
    }
    log.finish();

    result
}

async fn run(host: &dyn Host, log: &OperationLog<'_>, source: Option<Tier>) -> CommandResult<()> {
    let project = require_project(host, "Export failed, project not found.")?;

    log.line("Resolving options...");
    let options = load_options(&project)?;
    let tier = source.unwrap_or(options.dictionary_source);
    let plans = plan_artifacts(&project, &options.artifacts)?;

    let db = open_tier(&options, tier).await?;
    let snapshot = async {
        let entries = db.dictionary().entries().await?;
        let languages = db.languages().all().await?;
        Ok::<_, CommandError>((entries, languages))
    }
    .await;
    db.close().await;
    let (entries, languages) = snapshot?;

    info!(
        %tier,
        entries = entries.len(),
        languages = languages.len(),
        "Read dictionary snapshot"
    );

    log.line("Building assets...");
    let outcome = render_artifacts(&plans, &entries, &languages, options.output.line_endings);

    for warning in &outcome.warnings {
        warn!(%warning, "Codegen warning");
        log.line(&format!("Warning: {}", warning));
    }

    let mut errors = outcome.errors;
    errors.extend(write_files(outcome.files).await);

    match CommandError::collect(errors) {
        None => Ok(()),
        Some(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use dictionary_core::Artifact;

    use super::*;
    use crate::commands::testing::*;
    use crate::settings::ArtifactSettings;

    #[tokio::test]
    async fn test_rebuild_without_project() {
        let host = MockHost::new(None);
        let err = rebuild(&host, None).await.unwrap_err();

        assert_eq!(err.to_string(), "Export failed, project not found.");
        assert!(host.output.contains("DictionaryBuilder: Export failed, project not found."));
        assert!(!host.output.contains("Resolving options..."));
        assert!(host.output.contains("Operation completed on"));
    }

    #[tokio::test]
    async fn test_rebuild_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_in(dir.path());
        let db_path = dir.path().join("development.db");
        seeded_database(&db_path).await.close().await;
        write_options(&project, &[(Tier::Development, db_path.as_path())]);

        let host = MockHost::new(Some(project.clone()));
        rebuild(&host, None).await.unwrap();

        for plan in plan_artifacts(&project, &ArtifactSettings::default()).unwrap() {
            assert!(plan.path.exists(), "{} not written", plan.relative_path);
        }

        let dictionary = std::fs::read_to_string(
            project.directory.join("Models/Dictionary/Dictionary.cs"),
        )
        .unwrap();
        assert!(dictionary.contains("General"));

        let culture = std::fs::read_to_string(
            project.directory.join("Models/Dictionary/UmbracoCulture.cs"),
        )
        .unwrap();
        assert!(culture.contains("EnglishGB"));

        let lines = host.output.lines();
        assert!(lines.iter().any(|l| l == "DictionaryBuilder: Building assets..."));
        assert_eq!(
            lines.iter().rev().nth(2).map(String::as_str),
            Some("DictionaryBuilder: Export completed successfully.")
        );
        assert_eq!(host.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_rebuild_source_override() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_in(dir.path());
        let staging = dir.path().join("staging.db");
        seeded_database(&staging).await.close().await;
        write_options(&project, &[(Tier::Staging, staging.as_path())]);

        let host = MockHost::new(Some(project.clone()));
        rebuild(&host, Some(Tier::Staging)).await.unwrap();
        assert!(project
            .directory
            .join(Artifact::Service.default_path().trim_start_matches('/'))
            .exists());
    }

    #[tokio::test]
    async fn test_rebuild_without_connection() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_in(dir.path());
        write_options(&project, &[]);

        let host = MockHost::new(Some(project));
        let err = rebuild(&host, None).await.unwrap_err();

        assert!(matches!(err, CommandError::MissingConnection { .. }));
        assert!(host.output.contains("Check the SQL connection preferences"));
        assert!(host.output.contains("DictionaryBuilder: Export failed."));
    }

    #[tokio::test]
    async fn test_rebuild_aggregates_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_in(dir.path());
        let db_path = dir.path().join("development.db");
        seeded_database(&db_path).await.close().await;
        write_options(&project, &[(Tier::Development, db_path.as_path())]);

        // Files where the Models and Services directories should be
        std::fs::create_dir_all(&project.directory).unwrap();
        std::fs::write(project.directory.join("Models"), "").unwrap();
        std::fs::write(project.directory.join("Services"), "").unwrap();

        let host = MockHost::new(Some(project));
        let err = rebuild(&host, None).await.unwrap_err();

        match &err {
            CommandError::Aggregate(messages) => assert_eq!(messages.len(), 5),
            other => panic!("expected aggregate, got {:?}", other),
        }
        assert!(err.to_string().starts_with("DictionaryBuilder: (5) errors occurred:"));
    }
}
