//! Card records: one navigable screen or typed display unit.

use super::entity::{ERROR_REF, Entity, UNKNOWN_REF, ref_string};
use super::ids::ObjectId;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Raw card keys that reference an entity without an `Entity` being built.
///
/// Each one holds a mapping whose own `entity` field names the reference.
pub const AUXILIARY_ENTITY_KEYS: [&str; 7] = [
    "weatherOverrideForecast1",
    "weatherOverrideForecast2",
    "weatherOverrideForecast3",
    "weatherOverrideForecast4",
    "statusIcon1",
    "statusIcon2",
    "alarmControl",
];

/// One card of the panel.
///
/// Everything except the navigation links is fixed at construction; the links
/// are written once by the model's linking pass.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_prev: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_next: Option<ObjectId>,
    pub hidden: bool,
    pub card_type: String,
    pub title: String,
    pub key: String,
    /// Legacy `{type}_{key}` identifier. Not guaranteed unique.
    pub slug: String,
    /// Set for cards showing exactly one entity (climate, media, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_entity: Option<Entity>,
    /// Set for cards showing a collection (grid, entities, ...).
    pub entity_list: Vec<Entity>,
    #[serde(skip)]
    pub raw_source: Value,
}

impl Card {
    /// Build a card from one raw mapping.
    pub fn from_raw(raw: &Value, hidden: bool) -> Self {
        if !raw.is_object() {
            warn!(
                found = crate::error::value_kind(raw),
                "card config is not a mapping, using defaults"
            );
        }

        let card_type = text_field(raw, "type");
        let key = text_field(raw, "key");

        // A single-entity card reads its entity fields from the card itself.
        let single_entity = raw
            .get("entity")
            .filter(|v| !v.is_null())
            .map(|_| Entity::from_raw(raw));

        let entity_list = if single_entity.is_some() {
            Vec::new()
        } else {
            raw.get("entities")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(Entity::from_raw).collect())
                .unwrap_or_default()
        };

        Self {
            id: ObjectId::generate(),
            nav_prev: None,
            nav_next: None,
            hidden,
            slug: make_slug(&card_type, &key),
            title: text_field(raw, "title"),
            card_type,
            key,
            single_entity,
            entity_list,
            raw_source: raw.clone(),
        }
    }

    /// Entities owned by this card: the single entity, or else the list.
    pub fn entities(&self) -> Vec<&Entity> {
        match &self.single_entity {
            Some(entity) => vec![entity],
            None => self.entity_list.iter().collect(),
        }
    }

    /// Every entity reference this card touches, in display order.
    ///
    /// Owned entities come first, each followed by its status reference,
    /// then references from [`AUXILIARY_ENTITY_KEYS`].
    pub fn entity_refs(&self) -> Vec<String> {
        let mut refs = Vec::new();
        for entity in self.entities() {
            refs.push(entity.entity_ref.clone());
            if let Some(status) = &entity.status_ref {
                refs.push(status.clone());
            }
        }
        refs.extend(self.auxiliary_refs());
        refs
    }

    /// References named by the auxiliary keys present on the raw card.
    pub fn auxiliary_refs(&self) -> Vec<String> {
        AUXILIARY_ENTITY_KEYS
            .iter()
            .filter_map(|key| self.raw_source.get(*key).filter(|v| !v.is_null()))
            .map(|slot| match slot {
                Value::Object(map) => map
                    .get("entity")
                    .map(ref_string)
                    .unwrap_or_else(|| UNKNOWN_REF.to_string()),
                _ => ERROR_REF.to_string(),
            })
            .collect()
    }

    /// Whether this card takes part in circular navigation.
    pub fn is_navigable(&self) -> bool {
        !self.hidden && self.nav_next.is_some()
    }
}

/// `{type}_{key}` with `.`, `~` and space replaced by `_`.
pub fn make_slug(card_type: &str, key: &str) -> String {
    format!("{card_type}_{key}").replace(['.', '~', ' '], "_")
}

fn text_field(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        None | Some(Value::Null) => UNKNOWN_REF.to_string(),
        Some(value) => ref_string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_card() {
        let card = Card::from_raw(&json!({}), false);
        assert_eq!(card.card_type, "unknown");
        assert_eq!(card.title, "unknown");
        assert_eq!(card.key, "unknown");
        assert_eq!(card.slug, "unknown_unknown");
        assert!(card.single_entity.is_none());
        assert!(card.entity_list.is_empty());
        assert!(card.nav_prev.is_none() && card.nav_next.is_none());
    }

    #[test]
    fn test_slug_substitution() {
        assert_eq!(make_slug("cardGrid", "living room"), "cardGrid_living_room");
        assert_eq!(make_slug("cardMedia", "media.player~1"), "cardMedia_media_player_1");
    }

    #[test]
    fn test_list_card() {
        let raw = json!({
            "type": "cardGrid",
            "title": "Lights",
            "key": "lights",
            "entities": [
                {"entity": "light.a", "status": "sensor.a"},
                {"entity": "light.b"}
            ]
        });
        let card = Card::from_raw(&raw, true);
        assert!(card.hidden);
        assert_eq!(card.slug, "cardGrid_lights");
        assert_eq!(card.entity_list.len(), 2);
        assert_eq!(card.entities().len(), 2);
        assert_eq!(card.entity_refs(), vec!["light.a", "sensor.a", "light.b"]);
    }

    #[test]
    fn test_single_entity_reads_card_keys() {
        let raw = json!({
            "type": "cardThermo",
            "entity": "climate.living",
            "name": "Living",
            "entities": [{"entity": "light.ignored"}]
        });
        let card = Card::from_raw(&raw, false);
        let entity = card.single_entity.as_ref().unwrap();
        assert_eq!(entity.entity_ref, "climate.living");
        assert_eq!(entity.name_override, Some(json!("Living")));
        assert!(card.entity_list.is_empty());
        assert_eq!(card.entity_refs(), vec!["climate.living"]);
    }

    #[test]
    fn test_auxiliary_refs_in_fixed_order() {
        let raw = json!({
            "type": "screensaver",
            "entity": "weather.home",
            "alarmControl": {"entity": "alarm_control_panel.house"},
            "statusIcon1": {"entity": "light.porch", "icon": "mdi:lamp"},
            "weatherOverrideForecast2": {"entity": "sensor.temp"},
            "weatherOverrideForecast1": null
        });
        let card = Card::from_raw(&raw, false);
        assert_eq!(
            card.entity_refs(),
            vec![
                "weather.home",
                "sensor.temp",
                "light.porch",
                "alarm_control_panel.house"
            ]
        );
    }

    #[test]
    fn test_malformed_entities_degrade() {
        let raw = json!({"type": "cardEntities", "entities": ["not_a_mapping", 3]});
        let card = Card::from_raw(&raw, false);
        assert_eq!(card.entity_list.len(), 2);
        assert!(card.entity_list.iter().all(Entity::is_error));
    }

    #[test]
    fn test_malformed_auxiliary_slots() {
        let raw = json!({
            "type": "screensaver",
            "weatherOverrideForecast1": {"entity": 7},
            "statusIcon2": {"icon": "x"},
            "alarmControl": "oops"
        });
        let card = Card::from_raw(&raw, false);
        assert!(card.single_entity.is_none());
        assert_eq!(card.auxiliary_refs(), vec!["7", "unknown", "error"]);
        assert_eq!(card.entity_refs(), vec!["7", "unknown", "error"]);
    }

    #[test]
    fn test_non_string_single_entity_ref() {
        let card = Card::from_raw(&json!({"type": "cardQR", "entity": 7}), false);
        assert_eq!(card.single_entity.as_ref().unwrap().entity_ref, "7");
        assert_eq!(card.entity_refs(), vec!["7"]);
    }

    #[test]
    fn test_non_mapping_card() {
        let card = Card::from_raw(&json!("oops"), false);
        assert_eq!(card.slug, "unknown_unknown");
        assert!(card.entity_refs().is_empty());
    }
}
