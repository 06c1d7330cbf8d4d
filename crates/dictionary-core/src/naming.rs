//! # Namespace & Path Resolution
//!
//! Placeholder substitution for namespace templates and the path joining
//! rules used for artifact and options file locations.
//!
//! ## Namespace Templates
//! ```text
//! template  "{project}.{path}"
//! project   "Acme.Web"
//! path      "Models/Dictionary"
//!              │
//!              ▼
//! "Acme.Web.Models.Dictionary"
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Suffix appended to the solution file stem for the options file.
pub const OPTIONS_FILE_SUFFIX: &str = ".UmbracoDictionaryBuilder.toml";

static NON_NAMESPACE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.]").unwrap());

static REPEATED_DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

static LEADING_DIGITS_AND_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.]+").unwrap());

/// Resolves a namespace template.
///
/// ## Arguments
/// * `template` - Namespace with optional `{project}` / `{path}` placeholders
/// * `project_name` - Name of the selected project
/// * `relative_dir` - Directory of the artifact relative to the project
///
/// ## Returns
/// The namespace with invalid characters stripped, repeated dots collapsed
/// and no leading digits or dots, or `CoreError::EmptyNamespace`.
pub fn resolve_namespace(
    template: &str,
    project_name: &str,
    relative_dir: &str,
) -> CoreResult<String> {
    let path = relative_dir.replace(['/', '\\'], ".");
    let substituted = template
        .replace("{project}", project_name)
        .replace("{path}", &path);

    let cleaned = NON_NAMESPACE_CHARS.replace_all(&substituted, "");
    let collapsed = REPEATED_DOTS.replace_all(&cleaned, ".");
    let namespace = LEADING_DIGITS_AND_DOTS
        .replace(&collapsed, "")
        .trim_end_matches('.')
        .to_string();

    if namespace.is_empty() {
        return Err(CoreError::EmptyNamespace {
            template: template.to_string(),
        });
    }

    Ok(namespace)
}

/// Joins a project-relative path onto a base directory.
///
/// A leading separator on `relative` is ignored, and both `/` and `\` are
/// treated as separators so settings written on one platform load on the
/// other.
pub fn combine_path(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

/// Directory portion of a project-relative artifact path, `/` separated.
///
/// `"/Models/Dictionary/Dictionary.cs"` → `"Models/Dictionary"`.
pub fn relative_directory(relative: &str) -> String {
    let segments: Vec<&str> = relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.split_last() {
        Some((_, directories)) => directories.join("/"),
        None => String::new(),
    }
}

/// Location of the options file for a solution.
///
/// `C:\src\Acme.sln` → `C:\src\Acme.UmbracoDictionaryBuilder.toml`.
pub fn options_file_path(solution_path: &Path) -> PathBuf {
    let mut file_name = solution_path
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    file_name.push(OPTIONS_FILE_SUFFIX);
    solution_path.with_file_name(file_name)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_namespace_placeholders() {
        let ns = resolve_namespace("{project}.{path}", "Acme.Web", "Models/Dictionary").unwrap();
        assert_eq!(ns, "Acme.Web.Models.Dictionary");
    }

    #[test]
    fn test_resolve_namespace_literal() {
        let ns =
            resolve_namespace("Umbraco.Core.Services", "Acme.Web", "Services/Implement").unwrap();
        assert_eq!(ns, "Umbraco.Core.Services");
    }

    #[test]
    fn test_resolve_namespace_strips_invalid_characters() {
        let ns = resolve_namespace("{project}.{path}", "2020 Acme-Site", "Models\\Shared Dictionary")
            .unwrap();
        assert_eq!(ns, "AcmeSite.Models.SharedDictionary");
    }

    #[test]
    fn test_resolve_namespace_empty_path_collapses_dots() {
        let ns = resolve_namespace("{project}.{path}", "Acme", "").unwrap();
        assert_eq!(ns, "Acme");
    }

    #[test]
    fn test_resolve_namespace_empty_result() {
        let err = resolve_namespace("{path}", "Acme", "").unwrap_err();
        assert_eq!(
            err,
            CoreError::EmptyNamespace {
                template: "{path}".to_string()
            }
        );
    }

    #[test]
    fn test_combine_path_ignores_leading_separator() {
        let base = Path::new("/work/Acme.Web");
        assert_eq!(
            combine_path(base, "/Models/Dictionary/Dictionary.cs"),
            PathBuf::from("/work/Acme.Web/Models/Dictionary/Dictionary.cs")
        );
        assert_eq!(
            combine_path(base, "\\Services\\IDictionaryService.cs"),
            PathBuf::from("/work/Acme.Web/Services/IDictionaryService.cs")
        );
    }

    #[test]
    fn test_relative_directory() {
        assert_eq!(
            relative_directory("/Models/Dictionary/Dictionary.cs"),
            "Models/Dictionary"
        );
        assert_eq!(relative_directory("Dictionary.cs"), "");
        assert_eq!(relative_directory(""), "");
    }

    #[test]
    fn test_options_file_path() {
        assert_eq!(
            options_file_path(Path::new("/src/Acme.sln")),
            PathBuf::from("/src/Acme.UmbracoDictionaryBuilder.toml")
        );
    }
}
