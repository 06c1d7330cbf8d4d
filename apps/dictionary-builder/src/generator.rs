//! # Artifact Generator
//!
//! Turns a database snapshot into files on disk.
//!
//! ```text
//! entries + languages ──► DictionaryTree ──► render × 6 ──► line endings
//!                                                                 │
//!                               JoinSet: create_dir_all + write ◄─┘
//!                                                                 │
//!                                      failures ──► Vec<CommandError>
//! ```
//!
//! Rendering is synchronous and happens before any file is touched. The
//! writes are independent and run concurrently.

use std::path::PathBuf;

use dictionary_core::naming::{combine_path, relative_directory, resolve_namespace};
use dictionary_core::{
    render, Artifact, ArtifactNamespaces, CodegenInput, CodegenWarning, DictionaryEntry,
    DictionaryTree, LanguageEntry,
};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::{CommandError, CommandResult};
use crate::host::ProjectContext;
use crate::settings::{ArtifactSettings, LineEndings};

/// Where one artifact goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub artifact: Artifact,

    /// Path as configured, relative to the project.
    pub relative_path: String,

    /// Absolute (or working-directory relative) file path.
    pub path: PathBuf,

    /// Resolved namespace.
    pub namespace: String,
}

/// Resolves the path and namespace of every artifact.
///
/// ## Returns
/// * `Ok(plans)` - One plan per artifact, in [`Artifact::ALL`] order
/// * `Err(CommandError::Core)` - A namespace template resolved to nothing
pub fn plan_artifacts(
    project: &ProjectContext,
    artifacts: &ArtifactSettings,
) -> CommandResult<Vec<ArtifactPlan>> {
    Artifact::ALL
        .into_iter()
        .map(|artifact| -> CommandResult<ArtifactPlan> {
            let options = artifacts.get(artifact);
            let namespace = resolve_namespace(
                &options.namespace,
                &project.name,
                &relative_directory(&options.path),
            )?;

            Ok(ArtifactPlan {
                artifact,
                relative_path: options.path.clone(),
                path: combine_path(&project.directory, &options.path),
                namespace,
            })
        })
        .collect()
}

/// Namespace lookup for the emitters.
pub fn namespaces(plans: &[ArtifactPlan]) -> ArtifactNamespaces {
    let mut namespaces = ArtifactNamespaces::defaults();
    for plan in plans {
        namespaces.set(plan.artifact, plan.namespace.clone());
    }
    namespaces
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub contents: String,
}

/// Result of rendering all artifacts.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub files: Vec<PendingFile>,
    pub warnings: Vec<CodegenWarning>,
    pub errors: Vec<CommandError>,
}

/// Renders every planned artifact.
///
/// A failing artifact is recorded in `errors` and the rest still render.
pub fn render_artifacts(
    plans: &[ArtifactPlan],
    entries: &[DictionaryEntry],
    languages: &[LanguageEntry],
    line_endings: LineEndings,
) -> RenderOutcome {
    let tree = DictionaryTree::build(entries);
    let namespaces = namespaces(plans);
    let input = CodegenInput {
        tree: &tree,
        languages,
        namespaces: &namespaces,
    };

    let mut outcome = RenderOutcome {
        warnings: tree.warnings().to_vec(),
        ..RenderOutcome::default()
    };

    for plan in plans {
        match render(plan.artifact, input) {
            Ok(rendered) => {
                debug!(artifact = %plan.artifact, bytes = rendered.source.len(), "Rendered artifact");
                outcome.warnings.extend(rendered.warnings);
                outcome.files.push(PendingFile {
                    artifact: plan.artifact,
                    path: plan.path.clone(),
                    contents: line_endings.apply(&rendered.source),
                });
            }
            Err(e) => {
                error!(artifact = %plan.artifact, error = %e, "Could not render artifact");
                outcome.errors.push(CommandError::Render {
                    label: plan.artifact.label(),
                    source: e,
                });
            }
        }
    }

    outcome
}

/// Writes files concurrently, creating parent directories and overwriting
/// existing files.
///
/// ## Returns
/// One error per file that could not be written. Empty on success.
pub async fn write_files(files: Vec<PendingFile>) -> Vec<CommandError> {
    let mut tasks = JoinSet::new();
    for file in files {
        tasks.spawn(write_file(file));
    }

    let mut errors = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => errors.push(e),
            Err(e) => errors.push(CommandError::Environment(format!(
                "Artifact writer task failed: {}",
                e
            ))),
        }
    }
    errors
}

async fn write_file(file: PendingFile) -> CommandResult<()> {
    if let Some(parent) = file.path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CommandError::io(parent, e))?;
    }

    tokio::fs::write(&file.path, file.contents.as_bytes())
        .await
        .map_err(|e| CommandError::io(&file.path, e))?;

    debug!(artifact = %file.artifact, path = ?file.path, "Wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn project(dir: &std::path::Path) -> ProjectContext {
        ProjectContext {
            name: "Acme.Web".to_string(),
            directory: dir.to_path_buf(),
            solution_path: dir.join("Acme.sln"),
        }
    }

    fn snapshot() -> (Vec<DictionaryEntry>, Vec<LanguageEntry>) {
        let general = DictionaryEntry::root(Uuid::new_v4(), "General");
        let save = DictionaryEntry::child_of(&general, Uuid::new_v4(), "Save").with_value("Save");
        let languages = vec![
            LanguageEntry::new(1, "en-GB", "English (United Kingdom)", true),
            LanguageEntry::new(2, "fr-FR", "French (France)", false),
        ];
        (vec![general, save], languages)
    }

    #[test]
    fn test_plan_uses_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let plans = plan_artifacts(&project(dir.path()), &ArtifactSettings::default()).unwrap();

        assert_eq!(plans.len(), 6);
        assert_eq!(
            plans[0].path,
            dir.path().join("Models").join("Dictionary").join("UmbracoCulture.cs")
        );
        assert_eq!(plans[0].namespace, "Umbraco.Core.Models.Language");
    }

    #[test]
    fn test_plan_resolves_project_templates() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifacts = ArtifactSettings::default();
        artifacts.use_project_namespaces();

        let plans = plan_artifacts(&project(dir.path()), &artifacts).unwrap();
        let service = plans.iter().find(|p| p.artifact == Artifact::Service).unwrap();
        assert_eq!(service.namespace, "Acme.Web.Services.Implement");
    }

    #[test]
    fn test_plan_rejects_empty_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifacts = ArtifactSettings::default();
        artifacts.service.namespace = "!!!".to_string();

        let result = plan_artifacts(&project(dir.path()), &artifacts);
        assert!(matches!(result, Err(CommandError::Core(_))));
    }

    #[test]
    fn test_render_collects_missing_default_language() {
        let dir = tempfile::tempdir().unwrap();
        let plans = plan_artifacts(&project(dir.path()), &ArtifactSettings::default()).unwrap();
        let (entries, _) = snapshot();
        let languages = vec![LanguageEntry::new(1, "en-GB", "English", false)];

        let outcome = render_artifacts(&plans, &entries, &languages, LineEndings::Lf);
        assert_eq!(outcome.files.len(), 5);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].to_string().contains("culture model"));
    }

    #[test]
    fn test_render_applies_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let plans = plan_artifacts(&project(dir.path()), &ArtifactSettings::default()).unwrap();
        let (entries, languages) = snapshot();

        let outcome = render_artifacts(&plans, &entries, &languages, LineEndings::Crlf);
        assert!(outcome.errors.is_empty());
        for file in &outcome.files {
            assert!(file.contents.contains("\r\n"));
            assert!(!file.contents.replace("\r\n", "").contains('\n'));
        }
    }

    #[tokio::test]
    async fn test_write_files_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Models").join("Dictionary").join("Dictionary.cs");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old").unwrap();

        let errors = write_files(vec![
            PendingFile {
                artifact: Artifact::DictionaryModel,
                path: path.clone(),
                contents: "new".to_string(),
            },
            PendingFile {
                artifact: Artifact::Service,
                path: dir.path().join("Services").join("Implement").join("DictionaryService.cs"),
                contents: "service".to_string(),
            },
        ])
        .await;

        assert!(errors.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert!(dir.path().join("Services/Implement/DictionaryService.cs").exists());
    }

    #[tokio::test]
    async fn test_write_files_reports_each_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is needed
        let blocker = dir.path().join("Models");
        std::fs::write(&blocker, "").unwrap();

        let errors = write_files(vec![
            PendingFile {
                artifact: Artifact::CultureModel,
                path: blocker.join("UmbracoCulture.cs"),
                contents: String::new(),
            },
            PendingFile {
                artifact: Artifact::DictionaryModel,
                path: blocker.join("Dictionary.cs"),
                contents: String::new(),
            },
        ])
        .await;

        assert_eq!(errors.len(), 2);
    }
}
