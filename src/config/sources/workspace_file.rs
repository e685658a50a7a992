//! Workspace config file source: `config/config.toml` plus an optional
//! `config/<LAMBDA_HOOK_ENV>.toml` overlay.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable selecting the overlay file.
pub const ENV_NAME_VAR: &str = "LAMBDA_HOOK_ENV";

/// Directory under the workspace root holding config files.
const CONFIG_DIR: &str = "config";

/// Candidate config files for a workspace, lowest precedence first
///
/// The overlay is only listed when an environment name is given. Names that
/// would point outside the config directory are rejected.
pub fn config_files(
    workspace_root: &Path,
    env_name: Option<&str>,
) -> Result<Vec<PathBuf>, ConfigError> {
    let config_dir = workspace_root.join(CONFIG_DIR);
    let mut files = vec![config_dir.join("config.toml")];

    match env_name {
        None | Some("") => {}
        Some(name) if name.contains(|c| c == '/' || c == '\\') || name.starts_with('.') => {
            return Err(ConfigError::Message(format!(
                "Invalid {} value '{}'",
                ENV_NAME_VAR, name
            )));
        }
        Some(name) => files.push(config_dir.join(format!("{}.toml", name))),
    }

    Ok(files)
}

/// Add the workspace files that exist to `builder`, base file first.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env_name = std::env::var(ENV_NAME_VAR).ok();

    for path in config_files(workspace_root, env_name.as_deref())? {
        if path.is_file() {
            debug!(config_path = %path.display(), "Adding workspace configuration");
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }

    Ok(builder)
}
