//! # Options Command
//!
//! Creates, prints and edits the options file of the selected project.

use tracing::info;

use crate::commands::{options_path, require_project};
use crate::error::{CommandError, CommandResult};
use crate::host::Host;
use crate::settings::{Options, Tier};

/// What to do with the options file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsAction {
    /// Write the defaults.
    Init {
        /// Replace an existing file.
        force: bool,

        /// Use `{project}.{path}` for every namespace.
        project_namespaces: bool,
    },

    /// Print the effective options with passwords masked.
    Show { json: bool },

    /// Update one tier's connection. `None` fields are left as they are.
    SetConnection {
        tier: Tier,
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    },

    /// Change the tier a rebuild reads from.
    SetSource { tier: Tier },
}

/// Runs an options action against the project's options file.
pub fn configure(host: &dyn Host, action: OptionsAction) -> CommandResult<()> {
    let project = require_project(host, "Options unavailable, project not found.")?;
    let path = options_path(&project);
    let output = host.output();

    match action {
        OptionsAction::Init {
            force,
            project_namespaces,
        } => {
            if path.exists() && !force {
                return Err(CommandError::Environment(format!(
                    "Options file {} already exists. Use --force to overwrite it.",
                    path.display()
                )));
            }

            let mut options = Options::default();
            if project_namespaces {
                options.artifacts.use_project_namespaces();
            }
            options.save(&path)?;
            output.write_line(&format!("Options written to {}", path.display()));
        }

        OptionsAction::Show { json } => {
            let options = Options::load(&path)?.masked();
            let text = if json {
                serde_json::to_string_pretty(&options).map_err(|e| {
                    CommandError::Environment(format!("Options could not be printed: {}", e))
                })?
            } else {
                toml::to_string_pretty(&options).map_err(crate::settings::SettingsError::from)?
            };
            output.write_line(&format!("# {}", path.display()));
            output.write_line(text.trim_end());
        }

        OptionsAction::SetConnection {
            tier,
            url,
            username,
            password,
        } => {
            let mut options = Options::load_file(&path)?;
            {
                let connection = options.connections.get_mut(tier);
                if let Some(url) = url {
                    connection.url = url;
                }
                if let Some(username) = username {
                    connection.username = username;
                }
            }
            if let Some(password) = password {
                options.set_password(tier, &password);
            }
            options.validate()?;
            options.save(&path)?;

            info!(%tier, "Connection updated");
            output.write_line(&format!("{} connection saved to {}", tier, path.display()));
        }

        OptionsAction::SetSource { tier } => {
            let mut options = Options::load_file(&path)?;
            options.dictionary_source = tier;
            options.validate()?;
            options.save(&path)?;
            output.write_line(&format!("Dictionary source set to {}", tier));
        }
    }

    Ok(())
}
