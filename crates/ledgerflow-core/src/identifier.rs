//! Stable node keys backed by a global string interner.
//!
//! Chart nodes are declared and referenced by [`Id`]. Keys are cheap to copy
//! and compare, and they resolve back to their string form for logging and
//! error messages.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for node keys.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // A poisoned interner still holds valid symbols.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier for a chart node.
///
/// # Examples
///
/// ```
/// use ledgerflow_core::identifier::Id;
///
/// let revenue = Id::new("revenue");
/// assert_eq!(revenue, Id::new("revenue"));
/// assert_eq!(revenue, "revenue");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a key, interning it on first use.
    pub fn new(key: &str) -> Self {
        Self(interner().get_or_intern(key))
    }

    /// Returns the key this identifier was created from.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "revenue"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_same_key() {
        let id1 = Id::new("gross_profit");
        let id2 = Id::new("gross_profit");
        let id3 = Id::new("cogs");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_display_and_as_string() {
        let id = Id::new("operating_expenses");
        assert_eq!(id.to_string(), "operating_expenses");
        assert_eq!(id.as_string(), "operating_expenses");
    }

    #[test]
    fn test_partial_eq_str() {
        let id: Id = "net_profit".into();

        assert!(id == "net_profit");
        assert!(id != "net");

        let key = String::from("net_profit");
        assert!(id == key.as_str());
    }

    #[test]
    fn test_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(Id::new("taxes"), 2.118);

        assert_eq!(map.get(&Id::new("taxes")), Some(&2.118));
        assert_eq!(map.get(&Id::new("other")), None);
    }
}
