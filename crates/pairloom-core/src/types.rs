//! # Common Types
use std::fmt;

/// A token id assigned during training or carried from a pre-trained vocabulary.
///
/// Ids `0..initial_alphabet_size` are assigned to atomic symbols in order of
/// first appearance in the corpus; subsequent merges assign ids in merge
/// order. Ids are never reused within one [`crate::vocab::Vocabulary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Construct a `TokenId` from a raw `u32`.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw `u32` value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TokenId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A word id identifying which input word a token belongs to.
///
/// Used only to forbid cross-word pair formation; the numeric value is
/// otherwise opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WordId(pub u32);

impl WordId {
    /// Construct a `WordId` from a raw `u32`.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for WordId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WordId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An ordered pair of token ids: `(left, right)`.
///
/// Equal ids on both sides are permitted (e.g. `(a, a)` for a run of
/// identical symbols).
pub type Pair = (TokenId, TokenId);

#[cfg(feature = "ahash")]
mod hash_types {
    /// Type alias for hash maps used throughout this crate.
    pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

    /// Type alias for hash sets used throughout this crate.
    pub type CommonHashSet<V> = ahash::AHashSet<V>;
}
#[cfg(not(feature = "ahash"))]
mod hash_types {
    /// Type alias for hash maps used throughout this crate.
    pub type CommonHashMap<K, V> = std::collections::HashMap<K, V>;

    /// Type alias for hash sets used throughout this crate.
    pub type CommonHashSet<V> = std::collections::HashSet<V>;
}
pub use hash_types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_display_and_value() {
        let id = TokenId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{id}"), "42");
        assert_eq!(TokenId::from(7u32), TokenId::new(7));
    }

    #[test]
    fn test_word_id_ordering() {
        assert!(WordId::new(0) < WordId::new(1));
    }

    #[test]
    fn test_pair_equal_ids_allowed() {
        let a = TokenId::new(3);
        let pair: Pair = (a, a);
        assert_eq!(pair.0, pair.1);
    }
}
