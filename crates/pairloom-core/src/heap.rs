//! # Indexed Max-Heap
//!
//! A binary max-heap over `(count, key)` entries augmented with a
//! `key -> position` index, so that in addition to `pop_max` the heap
//! supports `add`/`sub`/`delete` by key in `O(log n)`.
//!
//! Entries are ordered by count descending, ties broken by key ascending,
//! so that training over a fixed corpus is fully reproducible regardless
//! of insertion order.
//!
//! ## Style Hints
//!
//! This is a hand-rolled heap rather than a wrapped library max-heap:
//! delete-by-key and decrement-by-key are the entire point of this
//! structure, and no off-the-shelf heap crate exposes them.

use crate::errors::{PairloomError, PairloomResult};
use crate::types::CommonHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A key usable in an [`IndexedMaxHeap`].
pub trait HeapKey: Clone + Ord + Hash + Debug {}
impl<T> HeapKey for T where T: Clone + Ord + Hash + Debug {}

/// Whether entry `a` should sit closer to the root than entry `b`:
/// larger count wins; equal counts break ascending on key.
fn outranks<K: HeapKey>(
    a: &(u64, K),
    b: &(u64, K),
) -> bool {
    match a.0.cmp(&b.0) {
        std::cmp::Ordering::Equal => a.1 < b.1,
        other => other.is_gt(),
    }
}

/// An indexed binary max-heap of `(count, key)` entries.
///
/// ## Invariants
/// * Every key present in the index is present in the heap array at the
///   indicated position, and vice versa.
/// * Every heap entry has `count >= 1`; entries reaching zero are deleted.
/// * No child entry [`outranks`] its parent.
///
/// `pop_max` always returns the entry with the largest count; among equal
/// counts, the entry with the smaller key wins, giving a fully
/// deterministic, insertion-order-independent merge order.
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap<K: HeapKey> {
    /// Array of `(count, key)` entries maintaining the max-heap property on `count`.
    entries: Vec<(u64, K)>,

    /// Map from key to its current position in `entries`.
    positions: CommonHashMap<K, usize>,
}

impl<K: HeapKey> Default for IndexedMaxHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HeapKey> IndexedMaxHeap<K> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: CommonHashMap::default(),
        }
    }

    /// Create an empty heap with room for `capacity` keys without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: CommonHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// The number of distinct keys currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current count for `key`, if present.
    pub fn count_of(
        &self,
        key: &K,
    ) -> Option<u64> {
        self.positions.get(key).map(|&pos| self.entries[pos].0)
    }

    /// Increase `key`'s count by `delta`, inserting it at count `delta` if absent.
    ///
    /// ## Arguments
    /// * `key` - the pair identifier to add to.
    /// * `delta` - the amount to add; must be `>= 1`.
    pub fn add(
        &mut self,
        key: K,
        delta: u64,
    ) {
        debug_assert!(delta >= 1, "add delta must be >= 1");
        if let Some(&pos) = self.positions.get(&key) {
            self.entries[pos].0 += delta;
            self.sift_up(pos);
        } else {
            self.entries.push((delta, key.clone()));
            let pos = self.entries.len() - 1;
            self.positions.insert(key, pos);
            self.sift_up(pos);
        }
    }

    /// Decrease `key`'s count by `delta`, deleting the key if it reaches zero.
    ///
    /// ## Errors
    /// Returns [`PairloomError::MissingKey`] if `key` is not present, and
    /// [`PairloomError::InvalidDecrement`] if `delta` exceeds the current count.
    pub fn sub(
        &mut self,
        key: &K,
        delta: u64,
    ) -> PairloomResult<()> {
        let Some(&pos) = self.positions.get(key) else {
            return Err(PairloomError::MissingKey { key: format!("{key:?}") });
        };
        let current = self.entries[pos].0;
        match current.cmp(&delta) {
            std::cmp::Ordering::Greater => {
                self.entries[pos].0 -= delta;
                self.sift_down(pos);
                Ok(())
            }
            std::cmp::Ordering::Equal => self.delete(key),
            std::cmp::Ordering::Less => Err(PairloomError::InvalidDecrement {
                key: format!("{key:?}"),
                have: current,
                requested: delta,
            }),
        }
    }

    /// Remove `key` entirely, regardless of its current count.
    ///
    /// ## Errors
    /// Returns [`PairloomError::MissingKey`] if `key` is not present.
    pub fn delete(
        &mut self,
        key: &K,
    ) -> PairloomResult<()> {
        let Some(pos) = self.positions.remove(key) else {
            return Err(PairloomError::MissingKey { key: format!("{key:?}") });
        };
        let last = self.entries.len() - 1;
        if pos != last {
            self.entries.swap(pos, last);
            let (_, moved_key) = &self.entries[pos];
            self.positions.insert(moved_key.clone(), pos);
        }
        self.entries.pop();
        if pos < self.entries.len() {
            self.sift_up(pos);
            self.sift_down(pos);
        }
        Ok(())
    }

    /// Remove and return the entry with the largest count.
    ///
    /// ## Errors
    /// Returns [`PairloomError::Empty`] if the heap holds no keys.
    pub fn pop_max(&mut self) -> PairloomResult<(u64, K)> {
        if self.entries.is_empty() {
            return Err(PairloomError::Empty);
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let (count, key) = self.entries.pop().expect("checked non-empty above");
        self.positions.remove(&key);
        if !self.entries.is_empty() {
            let (_, moved_key) = &self.entries[0];
            self.positions.insert(moved_key.clone(), 0);
            self.sift_down(0);
        }
        Ok((count, key))
    }

    fn sift_up(
        &mut self,
        mut pos: usize,
    ) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !outranks(&self.entries[pos], &self.entries[parent]) {
                break;
            }
            self.swap_entries(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(
        &mut self,
        mut pos: usize,
    ) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            let mut largest = pos;
            if left < len && outranks(&self.entries[left], &self.entries[largest]) {
                largest = left;
            }
            if right < len && outranks(&self.entries[right], &self.entries[largest]) {
                largest = right;
            }
            if largest == pos {
                break;
            }
            self.swap_entries(largest, pos);
            pos = largest;
        }
    }

    fn swap_entries(
        &mut self,
        a: usize,
        b: usize,
    ) {
        self.entries.swap(a, b);
        let key_a = self.entries[a].1.clone();
        let key_b = self.entries[b].1.clone();
        self.positions.insert(key_a, a);
        self.positions.insert(key_b, b);
    }

    /// Iterate over all live `(count, key)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &(u64, K)> {
        self.entries.iter()
    }

    /// Check the max-heap and index invariants; panics on violation.
    ///
    /// Intended for tests: no child may `outrank` its parent, and
    /// `positions[key] == i` iff `entries[i].1 == key`.
    #[cfg(test)]
    fn check_invariants(&self) {
        for (pos, (_, key)) in self.entries.iter().enumerate() {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            if left < self.entries.len() {
                assert!(!outranks(&self.entries[left], &self.entries[pos]), "heap property violated at {pos}/{left}");
            }
            if right < self.entries.len() {
                assert!(!outranks(&self.entries[right], &self.entries[pos]), "heap property violated at {pos}/{right}");
            }
            assert_eq!(self.positions.get(key), Some(&pos), "index mismatch for {key:?}");
        }
        assert_eq!(self.positions.len(), self.entries.len());
    }
}
