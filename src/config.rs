//! Preview surface configuration.
//!
//! Loaded from TOML. Every field has a default, so an absent file or an empty one yields
//! [`PreviewConfig::default`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PreviewError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Run without a notification channel: no signal subscription, notifications dropped
    pub headless: bool,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl PreviewConfig {
    /// Default location: `<config_dir>/storyview/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("storyview").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                PreviewError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PreviewError::file_error(format!("reading {}", path.display()), err)
            }
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load the config from the default location, falling back to defaults if there is none.
    pub fn discover() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
