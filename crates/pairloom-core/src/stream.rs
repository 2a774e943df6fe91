//! # Token Stream
//!
//! A doubly-linked sequence of token nodes, representing the current
//! segmentation of a corpus (or of a single batch of words being encoded).
//!
//! Nodes live in a single arena (`Vec<TokenNode>`); `prev`/`next` are
//! `Option<NodeIndex>` indices into that arena rather than pointers or
//! `Rc<RefCell<_>>` cells. Merging a node with its successor invalidates
//! the successor (its `tok_id` becomes `None`) but does not remove it from
//! the arena, since stale [`crate::pair_index::PairIndex`] bags may still
//! reference it by index; see `DESIGN.md` Open Question OQ-2.

use crate::types::{TokenId, WordId};
use compact_str::CompactString;

/// An index into a [`TokenStream`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub usize);

/// One node in a [`TokenStream`].
///
/// ## Invariants
/// * If `next` is `Some(n)`, `arena[n].prev == Some(self)`.
/// * If `prev` is `Some(p)`, `arena[p].next == Some(self)`.
/// * `word_id` is immutable for the node's lifetime.
/// * `tok_id` is `None` only for nodes that have been merged into their
///   predecessor; such a node is never reachable from the stream head.
#[derive(Debug, Clone)]
pub struct TokenNode {
    /// The textual content of this token.
    pub symbol: CompactString,

    /// This node's token id, or `None` if it has been merged away.
    pub tok_id: Option<TokenId>,

    /// Which input word this token belongs to.
    pub word_id: WordId,

    /// The previous node in the stream, if any.
    pub prev: Option<NodeIndex>,

    /// The next node in the stream, if any.
    pub next: Option<NodeIndex>,
}

/// A doubly-linked sequence of [`TokenNode`]s, arena-backed.
///
/// Initial length is `sum(|word_i|)` over the words used to build it; it is
/// strictly non-increasing thereafter, since every merge removes exactly
/// one live node (by invalidating it, not by shrinking the arena).
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    arena: Vec<TokenNode>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
}

impl TokenStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `capacity` nodes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// The stream's head node, if non-empty.
    pub fn head(&self) -> Option<NodeIndex> {
        self.head
    }

    /// The number of nodes ever allocated, including merged-away orphans.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// Borrow a node by index.
    pub fn node(
        &self,
        idx: NodeIndex,
    ) -> &TokenNode {
        &self.arena[idx.0]
    }

    /// Append a fresh node after the current tail.
    ///
    /// ## Arguments
    /// * `symbol` - the token's textual content.
    /// * `tok_id` - the token's id in the vocabulary.
    /// * `word_id` - which input word this token belongs to.
    ///
    /// ## Returns
    /// The new node's index.
    pub fn append(
        &mut self,
        symbol: CompactString,
        tok_id: TokenId,
        word_id: WordId,
    ) -> NodeIndex {
        let idx = NodeIndex(self.arena.len());
        self.arena.push(TokenNode {
            symbol,
            tok_id: Some(tok_id),
            word_id,
            prev: self.tail,
            next: None,
        });
        if let Some(tail) = self.tail {
            self.arena[tail.0].next = Some(idx);
        } else {
            self.head = Some(idx);
        }
        self.tail = Some(idx);
        idx
    }

    /// Merge the node at `idx` with its successor, replacing both with one
    /// compound token.
    ///
    /// `self.symbol` becomes `self.symbol ++ next.symbol`, `self.tok_id`
    /// becomes `new_id`, and `next` is unlinked from the live stream and
    /// marked invalid (`tok_id = None`). The orphaned node remains in the
    /// arena; any [`crate::pair_index::PairIndex`] bag still holding its
    /// index will detect it via the staleness check (its `tok_id` no longer
    /// matches any pair key it used to be a live endpoint of).
    ///
    /// ## Panics
    /// Panics if `idx`'s node has no successor; callers are expected to have
    /// already validated this.
    pub fn merge_with_next(
        &mut self,
        idx: NodeIndex,
        new_id: TokenId,
    ) {
        let next_idx = self.arena[idx.0].next.expect("merge_with_next requires a successor");
        let next_symbol = self.arena[next_idx.0].symbol.clone();
        let after = self.arena[next_idx.0].next;

        {
            let node = &mut self.arena[idx.0];
            node.symbol.push_str(&next_symbol);
            node.tok_id = Some(new_id);
            node.next = after;
        }
        self.arena[next_idx.0].tok_id = None;

        if let Some(after_idx) = after {
            self.arena[after_idx.0].prev = Some(idx);
        } else {
            self.tail = Some(idx);
        }
    }

    /// Iterate forward from the head, yielding `(symbol, tok_id, word_id)`
    /// for each live node.
    ///
    /// Forward traversal from the head always yields exactly the live
    /// tokens in order, regardless of orphaned nodes still referenced by a
    /// [`crate::pair_index::PairIndex`].
    pub fn iter(&self) -> TokenStreamIter<'_> {
        TokenStreamIter {
            stream: self,
            next: self.head,
        }
    }
}

/// Iterator over the live nodes of a [`TokenStream`], head to tail.
pub struct TokenStreamIter<'a> {
    stream: &'a TokenStream,
    next: Option<NodeIndex>,
}

impl<'a> Iterator for TokenStreamIter<'a> {
    type Item = (&'a str, TokenId, WordId);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.stream.node(idx);
        self.next = node.next;
        let tok_id = node.tok_id.expect("live stream nodes never carry the sentinel");
        Some((node.symbol.as_str(), tok_id, node.word_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_links_prev_next() {
        let mut stream = TokenStream::new();
        let a = stream.append("a".into(), TokenId::new(0), WordId::new(0));
        let b = stream.append("b".into(), TokenId::new(1), WordId::new(0));

        assert_eq!(stream.node(a).next, Some(b));
        assert_eq!(stream.node(b).prev, Some(a));
        assert_eq!(stream.head(), Some(a));
    }

    #[test]
    fn test_merge_with_next_concatenates_and_invalidates() {
        let mut stream = TokenStream::new();
        let a = stream.append("a".into(), TokenId::new(0), WordId::new(0));
        let b = stream.append("b".into(), TokenId::new(1), WordId::new(0));
        let c = stream.append("c".into(), TokenId::new(2), WordId::new(0));

        stream.merge_with_next(a, TokenId::new(3));

        assert_eq!(stream.node(a).symbol, "ab");
        assert_eq!(stream.node(a).tok_id, Some(TokenId::new(3)));
        assert_eq!(stream.node(a).next, Some(c));
        assert_eq!(stream.node(c).prev, Some(a));
        assert_eq!(stream.node(b).tok_id, None, "merged-away node carries the sentinel");

        let collected: Vec<_> = stream.iter().map(|(s, _, _)| s.to_string()).collect();
        assert_eq!(collected, vec!["ab", "c"]);
    }

    #[test]
    fn test_merge_at_tail_updates_tail() {
        let mut stream = TokenStream::new();
        let a = stream.append("a".into(), TokenId::new(0), WordId::new(0));
        stream.append("b".into(), TokenId::new(1), WordId::new(0));

        stream.merge_with_next(a, TokenId::new(2));

        // Appending again should attach after the new tail (`a`, now "ab").
        let c = stream.append("c".into(), TokenId::new(3), WordId::new(0));
        assert_eq!(stream.node(a).next, Some(c));
    }

    #[test]
    #[should_panic(expected = "merge_with_next requires a successor")]
    fn test_merge_without_successor_panics() {
        let mut stream = TokenStream::new();
        let a = stream.append("a".into(), TokenId::new(0), WordId::new(0));
        stream.merge_with_next(a, TokenId::new(1));
    }

    #[test]
    fn test_iter_groups_by_word_boundary() {
        let mut stream = TokenStream::new();
        stream.append("a".into(), TokenId::new(0), WordId::new(0));
        stream.append("b".into(), TokenId::new(1), WordId::new(0));
        stream.append("c".into(), TokenId::new(2), WordId::new(1));

        let word_ids: Vec<_> = stream.iter().map(|(_, _, w)| w).collect();
        assert_eq!(word_ids, vec![WordId::new(0), WordId::new(0), WordId::new(1)]);
    }
}
