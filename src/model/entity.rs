//! Entity records: one referenceable device or state shown on a card.

use super::ids::ObjectId;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Entity reference used when the raw entity was not a mapping.
pub const ERROR_REF: &str = "error";

/// Entity reference used when the raw mapping has no `entity` key.
pub const UNKNOWN_REF: &str = "unknown";

/// One entity surfaced on a card.
///
/// Built once from a raw mapping and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub id: ObjectId,
    /// Underlying device/state identifier, or a sentinel.
    pub entity_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_override: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_override: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_override: Option<Value>,
    /// Secondary entity used for status display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ref: Option<String>,
    /// Visibility predicates, kept raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond_state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond_state_not: Option<Value>,
    pub assumed_state: bool,
    pub extra_data: Map<String, Value>,
    #[serde(skip)]
    pub raw_source: Value,
}

impl Entity {
    /// Build an entity from one raw value.
    ///
    /// Never fails: a non-mapping input yields an entity whose
    /// `entity_ref` is [`ERROR_REF`] and whose other fields are defaults.
    pub fn from_raw(raw: &Value) -> Self {
        let id = ObjectId::generate();
        let Some(map) = raw.as_object() else {
            debug!(entity = %id, "entity config is not a mapping, check your entity configs");
            return Self::sentinel(id, raw.clone());
        };

        Self {
            id,
            entity_ref: map
                .get("entity")
                .map(ref_string)
                .unwrap_or_else(|| UNKNOWN_REF.to_string()),
            name_override: present(map, "name"),
            icon_override: present(map, "icon"),
            color_override: present(map, "color"),
            status_ref: present(map, "status").map(|v| ref_string(&v)),
            cond_state: present(map, "state"),
            cond_state_not: present(map, "state_not"),
            assumed_state: map
                .get("assumed_state")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            extra_data: map
                .get("data")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            raw_source: raw.clone(),
        }
    }

    fn sentinel(id: ObjectId, raw_source: Value) -> Self {
        Self {
            id,
            entity_ref: ERROR_REF.to_string(),
            name_override: None,
            icon_override: None,
            color_override: None,
            status_ref: None,
            cond_state: None,
            cond_state_not: None,
            assumed_state: false,
            extra_data: Map::new(),
            raw_source,
        }
    }

    /// Whether this entity came from malformed input.
    pub fn is_error(&self) -> bool {
        self.entity_ref == ERROR_REF
    }
}

/// Non-null value at `key`, cloned.
fn present(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).filter(|v| !v.is_null()).cloned()
}

/// Render an entity reference as text. Non-string scalars keep their
/// literal form (`light.1` stays a string, `42` becomes `"42"`).
pub(crate) fn ref_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => UNKNOWN_REF.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_entity() {
        let raw = json!({
            "entity": "light.kitchen",
            "name": "Kitchen",
            "icon": "mdi:lightbulb",
            "color": [255, 0, 0],
            "status": "binary_sensor.kitchen_window",
            "state": "on",
            "state_not": "unavailable",
            "assumed_state": true,
            "data": {"brightness": 80}
        });
        let entity = Entity::from_raw(&raw);
        assert_eq!(entity.entity_ref, "light.kitchen");
        assert_eq!(entity.name_override, Some(json!("Kitchen")));
        assert_eq!(entity.icon_override, Some(json!("mdi:lightbulb")));
        assert_eq!(entity.color_override, Some(json!([255, 0, 0])));
        assert_eq!(
            entity.status_ref.as_deref(),
            Some("binary_sensor.kitchen_window")
        );
        assert_eq!(entity.cond_state, Some(json!("on")));
        assert_eq!(entity.cond_state_not, Some(json!("unavailable")));
        assert!(entity.assumed_state);
        assert_eq!(entity.extra_data.get("brightness"), Some(&json!(80)));
        assert_eq!(entity.raw_source, raw);
    }

    #[test]
    fn test_defaults_when_absent() {
        let entity = Entity::from_raw(&json!({"name": "Only a name"}));
        assert_eq!(entity.entity_ref, UNKNOWN_REF);
        assert!(entity.icon_override.is_none());
        assert!(entity.status_ref.is_none());
        assert!(entity.cond_state.is_none());
        assert!(!entity.assumed_state);
        assert!(entity.extra_data.is_empty());
    }

    #[test]
    fn test_non_mapping_is_error_sentinel() {
        let entity = Entity::from_raw(&json!("not_a_mapping"));
        assert_eq!(entity.entity_ref, ERROR_REF);
        assert!(entity.is_error());
        assert!(entity.name_override.is_none());
        assert!(!entity.assumed_state);
        assert!(entity.extra_data.is_empty());
    }

    #[test]
    fn test_each_entity_gets_fresh_id() {
        let raw = json!({"entity": "light.a"});
        let a = Entity::from_raw(&raw);
        let b = Entity::from_raw(&raw);
        assert_ne!(a.id, b.id);
    }
}
