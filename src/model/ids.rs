//! Process-unique identifiers for cards and entities.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Prefix shared by every generated identifier.
///
/// Navigation targets starting with this prefix are resolved by identifier
/// only, never by slug or key.
pub const ID_PREFIX: &str = "uuid";

/// Opaque identifier assigned to a card or entity at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh identifier of the form `uuid.<hex>`.
    pub fn generate() -> Self {
        Self(format!("{}.{}", ID_PREFIX, Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a navigation target looks like a generated identifier.
    pub fn is_generated(target: &str) -> bool {
        target.starts_with(ID_PREFIX)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_format() {
        let id = ObjectId::generate();
        let (prefix, hex) = id.as_str().split_once('.').unwrap();
        assert_eq!(prefix, ID_PREFIX);
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(ObjectId::is_generated(id.as_str()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<ObjectId> = (0..10_000).map(|_| ObjectId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_is_generated() {
        assert!(!ObjectId::is_generated("cardGrid_living"));
        assert!(ObjectId::is_generated("uuid.0190"));
    }
}
