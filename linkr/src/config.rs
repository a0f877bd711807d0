use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Directory that `save`/`load` file names are resolved against
    #[serde(default = "default_links_dir")]
    pub links_dir: String,

    /// File in `links_dir` loaded at startup
    #[serde(default = "default_file")]
    pub default_file: String,
}

fn default_links_dir() -> String {
    "links".to_string()
}

fn default_file() -> String {
    "links.lis".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            links_dir: default_links_dir(),
            default_file: default_file(),
        }
    }
}

impl Settings {
    pub fn links_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.links_dir).into_owned())
    }

    pub fn default_path(&self) -> PathBuf {
        self.links_dir().join(&self.default_file)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/linkr/config.toml"))
}

/// Directory for state such as the readline history
pub fn state_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("linkr"))
}

/// Load settings from the config file and environment variables.
///
/// An explicitly given `config_path` must exist and parse; the default
/// location is optional and silently skipped when unusable.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_config_file(path)?,
        None => default_config_path()
            .filter(|p| p.exists())
            .and_then(|p| match read_config_file(&p) {
                Ok(s) => Some(s),
                Err(e) => {
                    debug!("Ignoring config file {}: {}", p.display(), e);
                    None
                }
            })
            .unwrap_or_default(),
    };

    if let Ok(links_dir) = std::env::var("LINKR_LINKS_DIR") {
        trace!("Using LINKR_LINKS_DIR from environment: {}", links_dir);
        settings.links_dir = links_dir;
    }

    if let Ok(default_file) = std::env::var("LINKR_DEFAULT_FILE") {
        trace!("Using LINKR_DEFAULT_FILE from environment: {}", default_file);
        settings.default_file = default_file;
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    trace!("Loading config from: {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|e| DomainError::io(path, e))?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
