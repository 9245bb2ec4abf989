//! Interned identifiers for nodes, ports and component kinds.
//!
//! Identifiers are compared and hashed on every event dispatch and registry
//! lookup, so [`Id`] stores an interned symbol instead of an owned string.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Identifier backed by a process-wide string interner.
///
/// # Examples
///
/// ```
/// use vantage_core::identifier::Id;
///
/// let node_id = Id::new("billing");
/// assert_eq!(node_id, "billing");
///
/// let generated = Id::from_anonymous(3);
/// assert_eq!(generated, "__3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a generated identifier for elements created without a name.
    ///
    /// # Arguments
    ///
    /// * `idx` - A unique index used to derive the identifier.
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Returns the interned string as an owned `String`.
    pub fn to_name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        f.write_str(name)
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_equal_names() {
        let id1 = Id::new("gateway");
        let id2 = Id::new("gateway");
        let id3 = Id::new("worker");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "gateway");
    }

    #[test]
    fn test_from_anonymous() {
        assert_eq!(Id::from_anonymous(0), Id::from_anonymous(0));
        assert_ne!(Id::from_anonymous(0), Id::from_anonymous(1));
        assert_eq!(Id::from_anonymous(7), "__7");
    }

    #[test]
    fn test_display_and_to_name() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
        assert_eq!(id.to_name(), "display_test");
    }

    #[test]
    fn test_from_str() {
        let id: Id = "parsed".parse().expect("parsing an Id is infallible");
        assert_eq!(id, Id::new("parsed"));
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("node-a");
        assert!(id == "node-a");
        assert!(id != "node-b");

        let owned = String::from("node-a");
        assert!(id == owned.as_str());
    }

    #[test]
    fn test_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(Id::new("key1"), 1);
        map.insert(Id::new("key2"), 2);

        assert_eq!(map.get(&Id::new("key1")), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
