#![allow(missing_docs)]
//! Cross-structure invariants that hold across the full `build_stream` +
//! `apply_merge` loop a trainer drives: the heap's count for a pair key
//! is always an upper bound on the number of *live* occurrences of that
//! pair in the stream, since stale `PairIndex` entries can only cause
//! the heap to overestimate, never underestimate.

use pairloom_core::types::{CommonHashMap, Pair};
use pairloom_core::{apply_merge, build_stream, IndexedMaxHeap, TokenId, Vocabulary};

fn alphabet_vocab(words: &[&str]) -> Vocabulary {
    let mut vocab = Vocabulary::new();
    for word in words {
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            if vocab.id_of(ch.encode_utf8(&mut buf)).is_none() {
                vocab.insert(ch.encode_utf8(&mut buf).into());
            }
        }
    }
    vocab
}

/// Scan the live stream and count actual adjacent-pair occurrences,
/// exactly the quantity invariant 2 compares the heap's count against.
fn live_pair_counts(stream: &pairloom_core::TokenStream) -> CommonHashMap<Pair, u64> {
    let mut counts = CommonHashMap::default();
    let mut iter = stream.iter().peekable();
    while let Some((_, left_id, left_word)) = iter.next() {
        if let Some(&(_, right_id, right_word)) = iter.peek() {
            if left_word == right_word {
                *counts.entry((left_id, right_id)).or_insert(0) += 1;
            }
        }
    }
    counts
}

#[test]
fn heap_count_never_undercounts_live_occurrences() {
    let words = ["banana", "bandana", "anagram", "panorama", "aaaa", "aaaaaa"];
    let vocab = alphabet_vocab(&words);
    let (mut stream, mut pair_index) = build_stream(&vocab, &words).unwrap();

    let mut heap: IndexedMaxHeap<Pair> = IndexedMaxHeap::new();
    for (pair, count) in pair_index.iter_bag_lens() {
        if count > 0 {
            heap.add(pair, count as u64);
        }
    }

    let mut next_id = vocab.len() as u32;
    for _ in 0..15 {
        let Ok((_, pair)) = heap.pop_max() else { break };
        let new_id = TokenId::new(next_id);
        next_id += 1;
        apply_merge(&mut stream, &mut pair_index, Some(&mut heap), pair, new_id);

        for (live_pair, live_count) in live_pair_counts(&stream) {
            let heap_count = heap.count_of(&live_pair).unwrap_or(0);
            assert!(
                heap_count >= live_count,
                "heap undercounted {live_pair:?}: heap has {heap_count}, stream has {live_count} live"
            );
        }
    }
}

#[test]
fn live_stream_never_exposes_a_merged_away_node() {
    let words = ["aaaa", "abab", "low", "lower"];
    let vocab = alphabet_vocab(&words);
    let (mut stream, mut pair_index) = build_stream(&vocab, &words).unwrap();

    let mut heap: IndexedMaxHeap<Pair> = IndexedMaxHeap::new();
    for (pair, count) in pair_index.iter_bag_lens() {
        if count > 0 {
            heap.add(pair, count as u64);
        }
    }

    let mut next_id = vocab.len() as u32;
    while let Ok((_, pair)) = heap.pop_max() {
        let new_id = TokenId::new(next_id);
        next_id += 1;
        apply_merge(&mut stream, &mut pair_index, Some(&mut heap), pair, new_id);

        // Forward traversal from head only ever yields live nodes; if a
        // sentinel (merged-away) node were reachable, `TokenStream::iter`
        // would panic on its `expect` rather than silently yielding it.
        let _: Vec<_> = stream.iter().collect();
    }
}
