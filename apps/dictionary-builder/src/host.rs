//! # Host Environment
//!
//! What a command needs from its surroundings: the selected project, a way
//! to ask the user yes or no, and somewhere to write the operation log.
//!
//! ```text
//! ┌──────────────┐   project()   ┌──────────────────────────────────────┐
//! │   commands   │──────────────►│ ProjectContext { name, directory,    │
//! │              │               │                  solution_path }     │
//! │              │   confirm()   ├──────────────────────────────────────┤
//! │              │──────────────►│ stdin prompt, or --yes               │
//! │              │   output()    ├──────────────────────────────────────┤
//! │              │──────────────►│ ConsoleOutput / MemoryOutput         │
//! └──────────────┘               └──────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::output::{ConsoleOutput, OutputChannel};

/// The project the artifacts are generated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Project name, substituted for `{project}` in namespace templates.
    pub name: String,

    /// Project directory; artifact paths are relative to it.
    pub directory: PathBuf,

    /// Solution file; the options file sits next to it.
    pub solution_path: PathBuf,
}

impl ProjectContext {
    /// Resolves a project from a directory.
    ///
    /// ## Arguments
    /// * `directory` - Project directory, must exist
    /// * `name` - Project name, defaults to the directory name
    /// * `solution` - Solution file, defaults to the first `*.sln` in the
    ///   directory or its parent, else `<directory>/<name>.sln`
    ///
    /// ## Returns
    /// `None` when the directory does not exist or has no usable name.
    pub fn discover(
        directory: &Path,
        name: Option<String>,
        solution: Option<PathBuf>,
    ) -> Option<Self> {
        if !directory.is_dir() {
            debug!(?directory, "Project directory not found");
            return None;
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| directory_name(directory))?;

        let solution_path = solution
            .or_else(|| find_solution(directory))
            .or_else(|| directory.parent().and_then(find_solution))
            .unwrap_or_else(|| directory.join(format!("{}.sln", name)));

        Some(ProjectContext {
            name,
            directory: directory.to_path_buf(),
            solution_path,
        })
    }
}

fn directory_name(directory: &Path) -> Option<String> {
    let absolute = directory.canonicalize().ok()?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// First `*.sln` file in `directory`, by file name.
fn find_solution(directory: &Path) -> Option<PathBuf> {
    let mut solutions: Vec<PathBuf> = fs::read_dir(directory)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("sln"))
        })
        .collect();
    solutions.sort();
    solutions.into_iter().next()
}

// =============================================================================
// Host
// =============================================================================

/// Services the environment provides to commands.
pub trait Host: Send + Sync {
    /// The selected project, if any.
    fn project(&self) -> Option<ProjectContext>;

    /// Asks the user to confirm a destructive step.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Sink for the operation log.
    fn output(&self) -> &dyn OutputChannel;
}

/// Host backed by command line arguments and the terminal.
#[derive(Debug)]
pub struct TerminalHost {
    project: Option<ProjectContext>,
    assume_yes: bool,
    output: ConsoleOutput,
}

impl TerminalHost {
    pub fn new(project: Option<ProjectContext>, assume_yes: bool) -> Self {
        TerminalHost {
            project,
            assume_yes,
            output: ConsoleOutput,
        }
    }
}

impl Host for TerminalHost {
    fn project(&self) -> Option<ProjectContext> {
        self.project.clone()
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        println!("{}", title);
        println!();
        println!("{}", message);
        print!("[y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn output(&self) -> &dyn OutputChannel {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_finds_solution_in_parent() {
        let root = tempfile::tempdir().unwrap();
        let project_dir = root.path().join("Acme.Web");
        fs::create_dir(&project_dir).unwrap();
        fs::write(root.path().join("Acme.sln"), "").unwrap();

        let project = ProjectContext::discover(&project_dir, None, None).unwrap();
        assert_eq!(project.name, "Acme.Web");
        assert_eq!(project.solution_path, root.path().join("Acme.sln"));
    }

    #[test]
    fn test_discover_defaults_solution_to_project_name() {
        let root = tempfile::tempdir().unwrap();
        let project_dir = root.path().join("Site");
        fs::create_dir(&project_dir).unwrap();

        let project =
            ProjectContext::discover(&project_dir, Some("Acme.Site".to_string()), None).unwrap();
        assert_eq!(project.name, "Acme.Site");
        assert_eq!(project.solution_path, project_dir.join("Acme.Site.sln"));
    }

    #[test]
    fn test_discover_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        assert!(ProjectContext::discover(&root.path().join("missing"), None, None).is_none());
    }

    #[test]
    fn test_terminal_host_assume_yes() {
        let host = TerminalHost::new(None, true);
        assert!(host.confirm("title", "message"));
        assert!(host.project().is_none());
    }
}
