//! Deep merge functionality for YAML configurations.
//!
//! Implements field-by-field merging where the user document overrides the
//! built-in defaults. Sequences are replaced entirely, never merged by element.

use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;

/// Nesting limit for [`deep_merge`].
pub const MAX_MERGE_DEPTH: usize = 64;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects on both sides are merged recursively: keys in overlay override keys in base
/// - Any other overlay value (arrays, scalars, null) replaces the base value entirely
/// - Keys only present in base are left untouched
///
/// Overlay values are moved into the result, not copied.
///
/// # Example
/// ```
/// use serde_json::json;
/// use lui_config::config::deep_merge;
///
/// let base = json!({
///     "screensaver": { "key": "screensaver", "forecastSkip": 0 },
///     "cards": [{"type": "cardEntities"}]
/// });
/// let overlay = json!({
///     "screensaver": { "forecastSkip": 1 },
///     "cards": [{"type": "cardGrid"}]
/// });
/// let result = deep_merge(base, overlay).unwrap();
/// assert_eq!(result["screensaver"]["key"], "screensaver");
/// assert_eq!(result["screensaver"]["forecastSkip"], 1);
/// assert_eq!(result["cards"], json!([{"type": "cardGrid"}]));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> ConfigResult<Value> {
    merge_at_depth(base, overlay, 0)
}

fn merge_at_depth(base: Value, overlay: Value, depth: usize) -> ConfigResult<Value> {
    if depth > MAX_MERGE_DEPTH {
        return Err(ConfigError::MergeTooDeep {
            limit: MAX_MERGE_DEPTH,
        });
    }
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value @ Value::Object(_)) => {
                        merge_at_depth(base_value, overlay_value, depth + 1)?
                    }
                    _ => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Ok(Value::Object(base_map))
        }
        // Any other case: overlay replaces base entirely
        (_, overlay) => Ok(overlay),
    }
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Equivalent to folding `deep_merge` over the list.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> ConfigResult<Value> {
    values
        .into_iter()
        .try_fold(Value::Null, |acc, value| deep_merge(acc, value))
}
