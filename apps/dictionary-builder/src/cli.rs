//! # Command Line Interface
//!
//! ```text
//! dictionary-builder [--project-dir DIR] [--project-name NAME] [--solution FILE] [--yes]
//!     rebuild [--source TIER]
//!     remove
//!     sync [--from TIER] [--to TIER]
//!     options init [--force] [--project-namespaces]
//!     options show [--json]
//!     options set-connection TIER [--url URL] [--username USER] [--password PASS]
//!     options set-source TIER
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{self, OptionsAction};
use crate::error::CommandResult;
use crate::host::{ProjectContext, TerminalHost};
use crate::settings::Tier;

/// Umbraco dictionary code generator and tier synchroniser
#[derive(Parser, Debug)]
#[command(name = "dictionary-builder")]
#[command(version, about = "Generate strongly typed C# dictionary accessors and sync dictionary tables")]
pub struct Cli {
    /// Project directory the artifact paths are relative to
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Project name used for `{project}` in namespace templates
    #[arg(long, global = true)]
    pub project_name: Option<String>,

    /// Solution file; the options file is stored next to it
    #[arg(long, global = true)]
    pub solution: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate the six artifacts from the source tier
    Rebuild {
        /// Tier to read from (defaults to the options file)
        #[arg(long)]
        source: Option<Tier>,
    },

    /// Delete the generated artifacts
    Remove,

    /// Copy the dictionary tables from one tier to another
    Sync {
        #[arg(long, default_value = "live")]
        from: Tier,

        #[arg(long, default_value = "staging")]
        to: Tier,
    },

    /// Manage the options file
    Options {
        #[command(subcommand)]
        action: OptionsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum OptionsCommand {
    /// Write the default options file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Use `{project}.{path}` as every namespace
        #[arg(long)]
        project_namespaces: bool,
    },

    /// Print the options with passwords masked
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Set a tier's connection
    SetConnection {
        tier: Tier,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Set the tier a rebuild reads from
    SetSource { tier: Tier },
}

impl From<OptionsCommand> for OptionsAction {
    fn from(command: OptionsCommand) -> Self {
        match command {
            OptionsCommand::Init {
                force,
                project_namespaces,
            } => OptionsAction::Init {
                force,
                project_namespaces,
            },
            OptionsCommand::Show { json } => OptionsAction::Show { json },
            OptionsCommand::SetConnection {
                tier,
                url,
                username,
                password,
            } => OptionsAction::SetConnection {
                tier,
                url,
                username,
                password,
            },
            OptionsCommand::SetSource { tier } => OptionsAction::SetSource { tier },
        }
    }
}

/// Builds the terminal host and runs the selected command.
pub async fn run(cli: Cli) -> CommandResult<()> {
    let project = ProjectContext::discover(&cli.project_dir, cli.project_name, cli.solution);
    let host = TerminalHost::new(project, cli.yes);

    match cli.command {
        Command::Rebuild { source } => commands::rebuild(&host, source).await,
        Command::Remove => commands::remove(&host).await.map(|_| ()),
        Command::Sync { from, to } => commands::sync(&host, from, to).await.map(|_| ()),
        Command::Options { action } => commands::configure(&host, action.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_defaults() {
        let cli = Cli::try_parse_from(["dictionary-builder", "sync", "--yes"]).unwrap();
        assert!(cli.yes);
        match cli.command {
            Command::Sync { from, to } => {
                assert_eq!(from, Tier::Live);
                assert_eq!(to, Tier::Staging);
            }
            other => panic!("expected sync, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rebuild_source() {
        let cli = Cli::try_parse_from([
            "dictionary-builder",
            "--project-dir",
            "src/Acme.Web",
            "rebuild",
            "--source",
            "staging",
        ])
        .unwrap();

        assert_eq!(cli.project_dir, PathBuf::from("src/Acme.Web"));
        assert!(matches!(
            cli.command,
            Command::Rebuild {
                source: Some(Tier::Staging)
            }
        ));
    }

    #[test]
    fn test_parse_set_connection() {
        let cli = Cli::try_parse_from([
            "dictionary-builder",
            "options",
            "set-connection",
            "live",
            "--url",
            "sqlite://live.db",
            "--password",
            "pw",
        ])
        .unwrap();

        let Command::Options { action } = cli.command else {
            panic!("expected options");
        };
        assert_eq!(
            OptionsAction::from(action),
            OptionsAction::SetConnection {
                tier: Tier::Live,
                url: Some("sqlite://live.db".to_string()),
                username: None,
                password: Some("pw".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert!(Cli::try_parse_from(["dictionary-builder", "sync", "--from", "qa"]).is_err());
    }
}
