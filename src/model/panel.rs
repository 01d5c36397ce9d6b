//! The resolved panel configuration.
//!
//! Loading merges the user document over the embedded defaults, builds every
//! card, links the visible ones into a circular navigation order and indexes
//! cards and entities by identifier. The result is read-only; a reload builds
//! a new [`PanelConfig`] (see [`crate::config::ConfigStore`]).
//!
//! Navigation links are identifiers resolved through the card index rather
//! than references, so cards stay plain owned records in one `Vec`.

use super::card::Card;
use super::entity::Entity;
use super::ids::ObjectId;
use crate::config::{deep_merge, default_document};
use crate::error::{ConfigError, ConfigResult};
use crate::host::TemplateRenderer;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Prefix accepted (and ignored) on navigation targets.
pub const NAVIGATE_PREFIX: &str = "navigate.";

/// Where an indexed entity lives inside `cards`.
#[derive(Debug, Clone, Copy)]
enum EntitySlot {
    Single(usize),
    Listed(usize, usize),
}

/// Fully merged and cross-referenced panel configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    merged: Value,
    defaults: Value,
    /// Visible cards in document order, then hidden cards.
    cards: Vec<Card>,
    screensaver: Card,
    card_index: HashMap<ObjectId, usize>,
    entity_index: HashMap<ObjectId, EntitySlot>,
}

impl PanelConfig {
    /// Build the model from an already parsed user document.
    ///
    /// A `null` document (an empty YAML file) counts as no overrides.
    /// Malformed cards and entities degrade to sentinel values; only a
    /// non-mapping document or a structural merge failure is an error.
    pub fn load(raw: Value) -> ConfigResult<Self> {
        let raw = match raw {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => raw,
            other => return Err(ConfigError::not_a_mapping("configuration document", &other)),
        };
        debug!(config = %raw, "input config");

        let defaults = default_document()?;
        let merged = deep_merge(defaults.clone(), raw)?;
        debug!(config = %merged, "loaded config");

        let mut cards: Vec<Card> = sequence_at(&merged, &defaults, "cards")
            .iter()
            .map(|raw| Card::from_raw(raw, false))
            .collect();
        link_navigation(&mut cards);

        let screensaver = Card::from_raw(
            &lookup_with_fallback(&merged, &defaults, "screensaver")
                .filter(|v| v.is_object())
                .or_else(|| lookup(&defaults, "screensaver"))
                .cloned()
                .unwrap_or_default(),
            false,
        );

        cards.extend(
            sequence_at(&merged, &defaults, "hiddenCards")
                .iter()
                .map(|raw| Card::from_raw(raw, true)),
        );

        let card_index = cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.id.clone(), i))
            .collect();
        let entity_index = index_entities(&cards);

        let config = Self {
            merged,
            defaults,
            cards,
            screensaver,
            card_index,
            entity_index,
        };
        info!(
            visible = config.visible_cards().count(),
            hidden = config.hidden_cards().count(),
            entities = config.entity_index.len(),
            "panel config loaded"
        );
        Ok(config)
    }

    /// Parse YAML text and load it.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let raw: Value = serde_yaml::from_str(text)?;
        Self::load(raw)
    }

    /// Resolve a dotted path, falling back to the defaults when the merged
    /// document has no (non-null) value there.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_with_fallback(&self.merged, &self.defaults, path)
    }

    /// [`get`](Self::get) narrowed to a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// [`get`](Self::get) narrowed to a boolean.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// [`get`](Self::get) narrowed to an integer.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    /// Find a card by navigation target.
    ///
    /// Generated identifiers resolve through the card index only. Anything
    /// else matches a slug first, then a key, checking the screensaver after
    /// the regular cards at each step.
    pub fn search(&self, target: &str) -> Option<&Card> {
        let target = target.strip_prefix(NAVIGATE_PREFIX).unwrap_or(target);
        if ObjectId::is_generated(target) {
            return self.card(target);
        }
        self.find_card(|card| card.slug == target)
            .or_else(|| self.find_card(|card| card.key == target))
    }

    fn find_card(&self, matches: impl Fn(&Card) -> bool) -> Option<&Card> {
        self.cards
            .iter()
            .find(|&card| matches(card))
            .or_else(|| Some(&self.screensaver).filter(|&card| matches(card)))
    }

    /// The card shown when leaving the screensaver.
    ///
    /// Renders `screensaver.defaultCard` and searches for it, falling back to
    /// the first card. `None` only when there are no cards at all.
    pub fn default_card(&self, renderer: &dyn TemplateRenderer) -> Option<&Card> {
        self.default_card_target(renderer)
            .and_then(|target| self.search(&target))
            .or_else(|| self.cards.first())
    }

    fn default_card_target(&self, renderer: &dyn TemplateRenderer) -> Option<String> {
        let template = self.get("screensaver.defaultCard")?;
        match renderer.render_template(template) {
            Ok(Value::String(target)) => Some(target),
            Ok(Value::Null) => None,
            Ok(other) => {
                warn!(rendered = %other, "default card template did not render to a string");
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to render default card template");
                None
            }
        }
    }

    /// Card by generated identifier. The screensaver is not indexed.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.card_index.get(id).map(|&i| &self.cards[i])
    }

    /// Entity by generated identifier, covering every entity of `entities()`.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        match *self.entity_index.get(id)? {
            EntitySlot::Single(card) => self.cards[card].single_entity.as_ref(),
            EntitySlot::Listed(card, pos) => self.cards[card].entity_list.get(pos),
        }
    }

    /// Next card in navigation order.
    pub fn next_card(&self, card: &Card) -> Option<&Card> {
        card.nav_next.as_ref().and_then(|id| self.card(id.as_str()))
    }

    /// Previous card in navigation order.
    pub fn prev_card(&self, card: &Card) -> Option<&Card> {
        card.nav_prev.as_ref().and_then(|id| self.card(id.as_str()))
    }

    /// Every entity reference on every card, then on the screensaver.
    /// Duplicates are kept.
    pub fn entity_refs(&self) -> Vec<String> {
        self.cards
            .iter()
            .chain(std::iter::once(&self.screensaver))
            .flat_map(Card::entity_refs)
            .collect()
    }

    /// Every entity owned by a card (screensaver excluded).
    pub fn entities(&self) -> Vec<&Entity> {
        self.cards.iter().flat_map(Card::entities).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| !card.hidden)
    }

    pub fn hidden_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.hidden)
    }

    pub fn screensaver(&self) -> &Card {
        &self.screensaver
    }

    /// The user document merged over the defaults.
    pub fn merged(&self) -> &Value {
        &self.merged
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }
}

/// Link the non-hidden cards into one circular doubly-linked order.
/// Fewer than two visible cards leaves every link unset.
fn link_navigation(cards: &mut [Card]) {
    let visible: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| !card.hidden)
        .map(|(i, _)| i)
        .collect();
    let (Some(&first), Some(&last)) = (visible.first(), visible.last()) else {
        return;
    };
    if visible.len() < 2 {
        return;
    }

    for pair in visible.windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        cards[cur].nav_next = Some(cards[next].id.clone());
        cards[next].nav_prev = Some(cards[cur].id.clone());
    }
    cards[first].nav_prev = Some(cards[last].id.clone());
    cards[last].nav_next = Some(cards[first].id.clone());
}

fn index_entities(cards: &[Card]) -> HashMap<ObjectId, EntitySlot> {
    let mut index = HashMap::new();
    for (i, card) in cards.iter().enumerate() {
        if let Some(entity) = &card.single_entity {
            index.insert(entity.id.clone(), EntitySlot::Single(i));
        } else {
            for (pos, entity) in card.entity_list.iter().enumerate() {
                index.insert(entity.id.clone(), EntitySlot::Listed(i, pos));
            }
        }
    }
    index
}

/// Walk `path` through nested mappings. Missing keys, non-mapping
/// intermediates and null leaves all count as absent.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |value, key| value.as_object()?.get(key))
        .filter(|value| !value.is_null())
}

fn lookup_with_fallback<'a>(
    merged: &'a Value,
    defaults: &'a Value,
    path: &str,
) -> Option<&'a Value> {
    lookup(merged, path).or_else(|| lookup(defaults, path))
}

/// Sequence at `key`; anything that is not a sequence counts as empty.
fn sequence_at<'a>(merged: &'a Value, defaults: &'a Value, key: &str) -> &'a [Value] {
    match lookup_with_fallback(merged, defaults, key) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(key, found = crate::error::value_kind(other), "expected a sequence of cards");
            &[]
        }
        None => &[],
    }
}
