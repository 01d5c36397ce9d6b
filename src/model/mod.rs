//! Cards, entities and the resolved panel model built from them.

mod card;
mod entity;
mod ids;
mod panel;

pub use card::{AUXILIARY_ENTITY_KEYS, Card, make_slug};
pub use entity::{ERROR_REF, Entity, UNKNOWN_REF};
pub use ids::{ID_PREFIX, ObjectId};
pub use panel::{NAVIGATE_PREFIX, PanelConfig};
