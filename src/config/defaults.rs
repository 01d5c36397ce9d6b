//! Embedded default panel configuration.

use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;

/// Raw text of the shipped defaults, embedded at build time from `./config/`.
pub const DEFAULTS_YAML: &str = include_str!("../../config/defaults.yaml");

/// Parse a fresh, owned copy of the default document.
///
/// Every call returns an independent tree, so merging into it can never
/// corrupt the defaults seen by a later load.
pub fn default_document() -> ConfigResult<Value> {
    let value: Value = serde_yaml::from_str(DEFAULTS_YAML)
        .map_err(|e| ConfigError::InvalidDefaults(e.to_string()))?;
    if !value.is_object() {
        return Err(ConfigError::InvalidDefaults(
            "top level is not a mapping".to_string(),
        ));
    }
    Ok(value)
}
