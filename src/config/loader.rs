//! Configuration loader for panel documents on disk.
//!
//! Reads one or more YAML files, merges them field-by-field in order and
//! optionally narrows the result to one app section, as found in an
//! AppDaemon `apps.yaml`:
//!
//! ```yaml
//! nspanel-1:
//!   module: nspanel-lovelace-ui
//!   class: NsPanelLovelaceUIManager
//!   config:
//!     panelRecvTopic: "tele/tasmota_panel/RESULT"
//!     cards: [...]
//! ```

use super::merge::deep_merge_all;
use crate::error::{ConfigError, ConfigResult};
use crate::model::PanelConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "LUI_CONFIG_PATH";

/// File name looked up in the working and user config directories.
pub const CONFIG_FILE_NAME: &str = "apps.yaml";

/// Candidate locations for the configuration file, highest priority first.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Explicit file from `LUI_CONFIG_PATH`
    pub explicit: Option<PathBuf>,
    /// `./apps.yaml`
    pub project_file: Option<PathBuf>,
    /// `~/.config/lui-config/apps.yaml`
    pub user_file: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let project_file = Some(PathBuf::from(CONFIG_FILE_NAME));
        let user_file = dirs::config_dir().map(|d| d.join("lui-config").join(CONFIG_FILE_NAME));
        Self {
            explicit,
            project_file,
            user_file,
        }
    }

    /// Path to read: the explicit file whether or not it exists, otherwise
    /// the first discovered candidate that exists on disk.
    pub fn resolve(&self) -> Option<&Path> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit);
        }
        [&self.project_file, &self.user_file]
            .into_iter()
            .flatten()
            .map(PathBuf::as_path)
            .find(|path| path.exists())
    }
}

/// Reads and merges raw configuration documents.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    document: Value,
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load from the first discovered location, or an empty document if none
    /// exists (the model then runs on defaults alone).
    pub fn discover() -> ConfigResult<Self> {
        Self::from_config_paths(&ConfigPaths::discover())
    }

    /// Load from the path [`ConfigPaths::resolve`] picks. A missing explicit
    /// file is an error rather than a fall-through to discovery.
    pub fn from_config_paths(paths: &ConfigPaths) -> ConfigResult<Self> {
        match paths.resolve() {
            Some(path) => Self::from_path(path),
            None => {
                warn!("no configuration file found, using built-in defaults");
                Ok(Self {
                    document: Value::Null,
                    sources: Vec::new(),
                })
            }
        }
    }

    /// Load a single YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_paths([path])
    }

    /// Load several YAML files; later files override earlier ones.
    pub fn from_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> ConfigResult<Self> {
        let mut documents = Vec::new();
        let mut sources = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            let value: Value = serde_yaml::from_str(&content)?;
            debug!(path = %path.display(), "read configuration file");
            documents.push(value);
            sources.push(path.to_path_buf());
        }
        Ok(Self {
            document: deep_merge_all(documents)?,
            sources,
        })
    }

    /// Parse a YAML string as the whole document.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(Self {
            document: serde_yaml::from_str(text)?,
            sources: Vec::new(),
        })
    }

    /// Narrow the document to one app section.
    ///
    /// Accepts both `<section>.config` and a bare `<section>` mapping.
    pub fn section(mut self, name: &str) -> ConfigResult<Self> {
        let mut section = self
            .document
            .get_mut(name)
            .map(Value::take)
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))?;
        if let Some(config) = section.get_mut("config").filter(|v| v.is_object()) {
            section = config.take();
        }
        if !section.is_object() {
            return Err(ConfigError::not_a_mapping(format!("section '{name}'"), &section));
        }
        self.document = section;
        Ok(self)
    }

    /// The raw (unmerged with defaults) document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Files that were read, in merge order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Build the panel model from the loaded document.
    pub fn into_panel(self) -> ConfigResult<PanelConfig> {
        PanelConfig::load(self.document)
    }
}
