//! # Stream Construction, Encoding, and Decoding
//!
//! `build_stream` is shared by training (which builds a stream once, up
//! front, then mutates it merge by merge) and `encode` (which builds a fresh
//! stream per call and replays a previously recorded merge tree over it).

use crate::errors::{PairloomError, PairloomResult};
use crate::merge::apply_merge;
use crate::pair_index::PairIndex;
use crate::stream::TokenStream;
use crate::types::WordId;
use crate::vocab::{MergeTree, Vocabulary};

/// Build a fresh [`TokenStream`] and [`PairIndex`] from `words`, splitting
/// each word into its Unicode scalar values and looking each one up in
/// `vocab`.
///
/// ## Errors
/// Returns [`PairloomError::UnknownSymbol`] if any character has no entry in
/// `vocab` — callers are responsible for pre-tokenization and for ensuring
/// `vocab`'s initial alphabet covers every character their words can contain.
pub fn build_stream(
    vocab: &Vocabulary,
    words: &[&str],
) -> PairloomResult<(TokenStream, PairIndex)> {
    let mut stream = TokenStream::new();
    let mut pair_index = PairIndex::new();

    for (word_idx, word) in words.iter().enumerate() {
        let word_id = WordId::new(word_idx as u32);
        let mut prev = None;
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let symbol = ch.encode_utf8(&mut buf);
            let tok_id = vocab.id_of(symbol).ok_or_else(|| PairloomError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;
            let idx = stream.append(symbol.into(), tok_id, word_id);
            if let Some(prev_idx) = prev {
                let prev_tok_id = stream.node(prev_idx).tok_id.expect("just-appended node is live");
                pair_index.append((prev_tok_id, tok_id), prev_idx);
            }
            prev = Some(idx);
        }
    }

    Ok((stream, pair_index))
}

/// Tokenize `words` by replaying a previously trained `merge_tree` over a
/// fresh stream built from `vocab`.
///
/// Merges are replayed in recorded order; a merge whose pair no longer
/// occurs in this particular input is a no-op, exactly as it would be if
/// the pair index's bag for that key happened to be empty.
///
/// ## Errors
/// Returns [`PairloomError::UnknownSymbol`] if `words` contains a character
/// absent from `vocab`'s initial alphabet.
pub fn encode(
    vocab: &Vocabulary,
    merge_tree: &MergeTree,
    words: &[&str],
) -> PairloomResult<TokenStream> {
    let (mut stream, mut pair_index) = build_stream(vocab, words)?;

    for record in merge_tree {
        apply_merge(&mut stream, &mut pair_index, None, record.pair, record.new_id);
    }

    Ok(stream)
}

/// Reconstruct the original words from a tokenized [`TokenStream`] by
/// concatenating symbols within each word boundary.
pub fn decode(stream: &TokenStream) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut current_word = None;

    for (symbol, _tok_id, word_id) in stream.iter() {
        if current_word.is_some() && current_word != Some(word_id) {
            words.push(std::mem::take(&mut current));
        }
        current_word = Some(word_id);
        current.push_str(symbol);
    }
    if current_word.is_some() {
        words.push(current);
    }

    words
}
