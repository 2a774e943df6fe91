//! # Shared Merge Step
//!
//! `apply_merge` is the one routine that both training (the live merge
//! loop) and encoding (replaying a recorded merge tree) run:
//! given a pair key and the id assigned to its merge, walk every candidate
//! left-endpoint node recorded for that key, validate it is still live, and
//! merge it with its successor — patching the pair index (and, during
//! training, the heap) for the two new neighborhoods this creates.
//!
//! Training passes `Some(heap)` so pair counts stay in sync for future
//! `pop_max` calls; encoding passes `None`, since there is no heap to keep
//! consistent when merges are dictated by a pre-recorded merge tree rather
//! than discovered by count.

use crate::heap::IndexedMaxHeap;
use crate::pair_index::PairIndex;
use crate::stream::TokenStream;
use crate::types::{Pair, TokenId};

/// Execute one merge step: merge every live, validated occurrence of `pair`
/// in `stream` into a single token with id `new_id`.
///
/// ## Arguments
/// * `stream` - the token stream to mutate in place.
/// * `pair_index` - the pair index to patch; `pair`'s bag is fully drained.
/// * `heap` - `Some(heap)` during training to keep pair counts live;
///   `None` during merge-tree replay.
/// * `pair` - the `(left, right)` pair being merged.
/// * `new_id` - the token id assigned to the resulting compound symbol.
pub fn apply_merge(
    stream: &mut TokenStream,
    pair_index: &mut PairIndex,
    mut heap: Option<&mut IndexedMaxHeap<Pair>>,
    pair: Pair,
    new_id: TokenId,
) {
    let candidates = pair_index.take(pair);

    for n in candidates {
        let node = stream.node(n);
        let Some(n_tok_id) = node.tok_id else { continue };
        let Some(next_idx) = node.next else { continue };
        let n_word_id = node.word_id;
        let n_prev = node.prev;

        let next_node = stream.node(next_idx);
        let Some(next_tok_id) = next_node.tok_id else { continue };
        let next_word_id = next_node.word_id;
        let next_next = next_node.next;

        if (n_tok_id, next_tok_id) != pair {
            continue;
        }
        if n_word_id != next_word_id {
            // Defensive: bags are only ever populated when word ids matched
            // at insertion time, but re-check anyway in case a future
            // change to the append sites breaks that invariant.
            continue;
        }

        // (b): patch the left neighborhood, if `n` has a same-word predecessor.
        if let Some(p) = n_prev {
            let p_node = stream.node(p);
            if p_node.word_id == n_word_id {
                let p_tok_id = p_node.tok_id.expect("live predecessor never carries the sentinel");
                pair_index.append((p_tok_id, new_id), p);
                if let Some(h) = &mut heap {
                    h.add((p_tok_id, new_id), 1);
                    if (p_tok_id, n_tok_id) != pair {
                        h.sub(&(p_tok_id, n_tok_id), 1)
                            .expect("a live neighboring pair must already be tracked");
                    }
                }
            }
        }

        // (c): patch the right neighborhood, if `next` has a same-word successor.
        if let Some(q) = next_next {
            let q_node = stream.node(q);
            if next_word_id == q_node.word_id {
                let q_tok_id = q_node.tok_id.expect("live successor never carries the sentinel");
                pair_index.append((new_id, q_tok_id), n);
                if let Some(h) = &mut heap {
                    h.add((new_id, q_tok_id), 1);
                    if (next_tok_id, q_tok_id) != pair {
                        h.sub(&(next_tok_id, q_tok_id), 1)
                            .expect("a live neighboring pair must already be tracked");
                    }
                }
            }
        }

        stream.merge_with_next(n, new_id);
    }
}
