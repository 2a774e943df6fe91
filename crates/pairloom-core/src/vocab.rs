//! # Vocabulary and Merge Tree

use crate::types::{CommonHashMap, Pair, TokenId};
use compact_str::CompactString;

/// An injective mapping between symbol strings and token ids.
///
/// Ids `0..initial_alphabet_size` are the atomic symbols seen while
/// building the initial stream, assigned in order of first appearance;
/// subsequent ids are assigned in merge order by the trainer.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    forward: CommonHashMap<CompactString, TokenId>,
    reverse: Vec<CompactString>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of symbols currently in the vocabulary.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Whether the vocabulary holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Look up the id for `symbol`, if present.
    pub fn id_of(
        &self,
        symbol: &str,
    ) -> Option<TokenId> {
        self.forward.get(symbol).copied()
    }

    /// Look up the symbol string for `id`, if present.
    pub fn symbol_of(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.reverse.get(id.value() as usize).map(CompactString::as_str)
    }

    /// Insert a new symbol, assigning it the next fresh id.
    ///
    /// ## Panics
    /// Panics (in debug builds) if `symbol` is already present; callers are
    /// expected to check [`Vocabulary::id_of`] first where that matters.
    pub fn insert(
        &mut self,
        symbol: CompactString,
    ) -> TokenId {
        debug_assert!(!self.forward.contains_key(symbol.as_str()), "duplicate vocabulary symbol");
        let id = TokenId::new(self.reverse.len() as u32);
        self.reverse.push(symbol.clone());
        self.forward.insert(symbol, id);
        id
    }

    /// Iterate over `(symbol, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenId)> {
        self.reverse.iter().enumerate().map(|(i, s)| (s.as_str(), TokenId::new(i as u32)))
    }
}

/// One executed merge: the pair that was merged, and the id assigned to the
/// resulting compound symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// The pair that was merged.
    pub pair: Pair,

    /// The id assigned to the new compound symbol.
    pub new_id: TokenId,
}

/// The ordered log of merges produced by training.
///
/// Replaying this sequence in order over a fresh [`crate::stream::TokenStream`]
/// reproduces training-time tokenization deterministically; see
/// [`crate::codec::encode`].
pub type MergeTree = Vec<MergeRecord>;
