//! # Pair Index
//!
//! A map from [`Pair`] to a bag of [`NodeIndex`]es that were, at some point,
//! the left endpoint of a live occurrence of that pair. The bag is
//! append-only and may contain stale entries; consumers validate each entry
//! against the live [`TokenStream`](crate::stream::TokenStream) before acting
//! on it, per the staleness policy enforced in [`crate::merge::apply_merge`].

use crate::types::{CommonHashMap, Pair};
use crate::stream::NodeIndex;

/// An append-only map from [`Pair`] to the nodes that were its left endpoint.
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
    bags: CommonHashMap<Pair, Vec<NodeIndex>>,
}

impl PairIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` to the bag for `key`. No deduplication is performed.
    pub fn append(
        &mut self,
        key: Pair,
        node: NodeIndex,
    ) {
        self.bags.entry(key).or_default().push(node);
    }

    /// Remove and return the bag for `key`, or an empty vector if absent.
    ///
    /// This crate's merge algorithm never appends to `key`'s bag again once
    /// it has been popped from the heap (every subsequent append targets a
    /// pair containing the freshly minted merge id, never the exact `(L, R)`
    /// just merged), so a consuming take is observationally equivalent to a
    /// non-removing snapshot here; see `DESIGN.md` Open Question OQ-3.
    pub fn take(
        &mut self,
        key: Pair,
    ) -> Vec<NodeIndex> {
        self.bags.remove(&key).unwrap_or_default()
    }

    /// The current size of `key`'s bag, including any stale entries.
    pub fn bag_len(
        &self,
        key: Pair,
    ) -> usize {
        self.bags.get(&key).map_or(0, Vec::len)
    }

    /// The number of distinct pair keys with a non-empty bag.
    pub fn len(&self) -> usize {
        self.bags.len()
    }

    /// Iterate over `(key, bag length)` for every tracked pair, without
    /// consuming any bags.
    ///
    /// Used by the trainer to seed the initial heap from a freshly built
    /// stream, where every bag is exactly the live occurrence count (no
    /// merges have happened yet, so there is nothing stale to validate).
    pub fn iter_bag_lens(&self) -> impl Iterator<Item = (Pair, usize)> + '_ {
        self.bags.iter().map(|(&key, bag)| (key, bag.len()))
    }

    /// Whether the index holds no pair keys.
    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}
