//! # BPE Trainer

use pairloom_core::{
    apply_merge, build_stream, CommonHashSet, IndexedMaxHeap, MergeRecord, MergeTree, PairloomError, TokenStream,
    Vocabulary,
};

/// Errors produced while training a BPE vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// A character in the training corpus could not be resolved to a token
    /// id while building the initial stream.
    ///
    /// This should not happen in practice, since [`BpeTrainer::train`]
    /// builds its own initial vocabulary from the same corpus it streams,
    /// but is surfaced rather than unwrapped in case a caller supplies a
    /// pre-built [`Vocabulary`] that is missing characters.
    #[error(transparent)]
    Core(#[from] PairloomError),
}

/// Result type for `pairloom-training` operations.
pub type TrainerResult<T> = std::result::Result<T, TrainerError>;

/// How much progress logging [`BpeTrainer::train`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerboseLevel {
    /// No progress logging.
    Silent = 0,

    /// Log overall progress every 100 completed merges, at `info` level.
    #[default]
    Progress = 1,

    /// Additionally log every individual merge, at `trace` level.
    Trace = 2,
}

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone)]
pub struct BpeTrainerOptions {
    /// The maximum number of merges to perform.
    ///
    /// Training stops earlier than this if the corpus runs out of pairs to
    /// merge (every pair count reaches zero before `num_merges` is hit).
    pub num_merges: usize,

    /// How much progress logging to emit while training.
    pub verbose: VerboseLevel,
}

impl BpeTrainerOptions {
    /// Create new options targeting `num_merges` merges.
    ///
    /// ## Arguments
    /// * `num_merges` - the maximum number of merges to perform.
    ///
    /// ## Returns
    /// A new `BpeTrainerOptions` instance.
    pub fn new(num_merges: usize) -> Self {
        Self {
            num_merges,
            verbose: VerboseLevel::default(),
        }
    }

    /// Sets the number of merges to perform.
    ///
    /// ## Arguments
    /// * `num_merges` - the new merge budget.
    ///
    /// ## Returns
    /// The updated `BpeTrainerOptions` instance.
    pub fn with_num_merges(
        self,
        num_merges: usize,
    ) -> Self {
        Self { num_merges, ..self }
    }

    /// Sets the progress logging level.
    ///
    /// ## Arguments
    /// * `verbose` - the new verbosity level.
    ///
    /// ## Returns
    /// The updated `BpeTrainerOptions` instance.
    pub fn with_verbose(
        self,
        verbose: VerboseLevel,
    ) -> Self {
        Self { verbose, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    ///
    /// ## Returns
    /// A new `BpeTrainer` instance.
    pub fn init(self) -> BpeTrainer {
        BpeTrainer::new(self)
    }
}

/// The output of a completed training run.
#[derive(Debug, Clone)]
pub struct TrainOutput {
    /// The full vocabulary: the initial alphabet plus every merged symbol.
    pub vocab: Vocabulary,

    /// The ordered log of merges performed, replayable by
    /// [`pairloom_core::encode`].
    pub merge_tree: MergeTree,

    /// The trainer's own final token stream, built once from `words` and
    /// mutated in place by every executed merge. Replaying `merge_tree` via
    /// [`pairloom_core::encode`] over a fresh stream built from the same
    /// words must agree with this stream's token ids exactly.
    pub final_stream: TokenStream,
}

/// Trains a byte-pair-encoding vocabulary over a corpus of pre-tokenized words.
///
/// Pre-tokenization (splitting raw text into these words) is out of scope
/// here; callers supply already-segmented word strings.
pub struct BpeTrainer {
    /// Trainer options.
    pub options: BpeTrainerOptions,
}

impl BpeTrainer {
    /// Initializes a [`BpeTrainer`].
    ///
    /// ## Arguments
    /// * `options` - the trainer options.
    ///
    /// ## Returns
    /// A new `BpeTrainer` instance.
    pub fn new(options: BpeTrainerOptions) -> Self {
        Self { options }
    }

    /// Build the initial vocabulary for `words`: one symbol per distinct
    /// Unicode scalar value, assigned ids in order of first appearance.
    fn initial_vocab(
        &self,
        words: &[&str],
    ) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        let mut seen = CommonHashSet::default();
        for word in words {
            for ch in word.chars() {
                if seen.insert(ch) {
                    let mut buf = [0u8; 4];
                    vocab.insert(ch.encode_utf8(&mut buf).into());
                }
            }
        }
        vocab
    }

    /// Train a vocabulary over `words`.
    ///
    /// ## Arguments
    /// * `words` - pre-tokenized training corpus; each entry is treated as
    ///   one word, and pairs never form across a word boundary.
    ///
    /// ## Returns
    /// A `Result` containing the trained [`TrainOutput`] or an error.
    pub fn train(
        &self,
        words: &[&str],
    ) -> TrainerResult<TrainOutput> {
        let mut vocab = self.initial_vocab(words);
        log::info!("Initial alphabet: {} symbols", vocab.len());

        let (mut stream, mut pair_index) = build_stream(&vocab, words)?;
        log::info!("Built stream: {} nodes across {} words", stream.arena_len(), words.len());

        let mut heap: IndexedMaxHeap<pairloom_core::Pair> = IndexedMaxHeap::with_capacity(pair_index.len());
        for (pair, count) in pair_index.iter_bag_lens() {
            if count > 0 {
                heap.add(pair, count as u64);
            }
        }
        log::info!("Seeded heap with {} distinct pairs", heap.len());

        let mut merge_tree = MergeTree::with_capacity(self.options.num_merges);

        while merge_tree.len() < self.options.num_merges {
            let (count, pair) = match heap.pop_max() {
                Ok(entry) => entry,
                Err(PairloomError::Empty) => {
                    log::info!("Exhausted mergeable pairs after {} merges", merge_tree.len());
                    break;
                }
                Err(other) => return Err(other.into()),
            };

            let left = vocab.symbol_of(pair.0).expect("heap keys are always vocabulary symbols").to_string();
            let right = vocab.symbol_of(pair.1).expect("heap keys are always vocabulary symbols").to_string();
            let new_id = vocab.insert(format!("{left}{right}").into());

            apply_merge(&mut stream, &mut pair_index, Some(&mut heap), pair, new_id);
            merge_tree.push(MergeRecord { pair, new_id });

            if self.options.verbose == VerboseLevel::Trace {
                log::trace!("Merge {}: {left:?} + {right:?} -> {new_id} (count {count})", merge_tree.len());
            }
            if self.options.verbose != VerboseLevel::Silent && merge_tree.len() % 100 == 0 {
                log::info!("Finalized {} merges", merge_tree.len());
            }
        }

        log::info!("Finished training: {} merges, {} vocabulary symbols", merge_tree.len(), vocab.len());
        Ok(TrainOutput { vocab, merge_tree, final_stream: stream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_single_repeated_word_merges_left_to_right() {
        // A budget of 6 merges exhausts after just 1: "aaa" has only one
        // non-overlapping (a,a) occurrence to merge.
        let trainer = BpeTrainerOptions::new(6).init();
        let output = trainer.train(&["aaa"]).unwrap();
        assert_eq!(output.merge_tree.len(), 1, "only one non-overlapping (a,a) occurrence exists");

        let stream = pairloom_core::encode(&output.vocab, &output.merge_tree, &["aaa"]).unwrap();
        let symbols: Vec<_> = stream.iter().map(|(s, _, _)| s.to_string()).collect();
        assert_eq!(symbols, vec!["aa".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_train_low_lower_two_merges() {
        // Two initial pairs tie on count; either resolution still lets
        // encode/decode round-trip both words.
        let trainer = BpeTrainerOptions::new(2).init();
        let output = trainer.train(&["low", "lower"]).unwrap();
        assert_eq!(output.merge_tree.len(), 2);

        let decoded = pairloom_core::decode(
            &pairloom_core::encode(&output.vocab, &output.merge_tree, &["low", "lower"]).unwrap(),
        );
        assert_eq!(decoded, vec!["low".to_string(), "lower".to_string()]);
    }

    #[test]
    fn test_train_repeated_two_char_word_single_merge() {
        // Three repeats of the same two-symbol word share a single pair.
        let trainer = BpeTrainerOptions::new(1).init();
        let output = trainer.train(&["ab", "ab", "ab"]).unwrap();
        assert_eq!(output.merge_tree.len(), 1);
        assert_eq!(output.merge_tree[0].pair, (pairloom_core::TokenId::new(0), pairloom_core::TokenId::new(1)));
    }

    #[test]
    fn test_train_stops_early_when_pairs_exhausted() {
        // Requesting far more merges than the corpus can supply must stop
        // cleanly rather than error or loop.
        let trainer = BpeTrainerOptions::new(100).init();
        let output = trainer.train(&["ab"]).unwrap();
        assert_eq!(output.merge_tree.len(), 1, "a single two-symbol word has exactly one mergeable pair");
    }

    #[test]
    fn test_train_num_merges_zero_is_noop() {
        let trainer = BpeTrainerOptions::new(0).init();
        let output = trainer.train(&["abc"]).unwrap();
        assert!(output.merge_tree.is_empty());
        assert_eq!(output.vocab.len(), 3);
    }

    #[test]
    fn test_train_abab_three_merges() {
        // "abab" merges (a,b) twice into [ab, ab], then merges those into
        // one compound token; a round trip must still recover the word.
        let trainer = BpeTrainerOptions::new(3).init();
        let output = trainer.train(&["abab"]).unwrap();
        assert!(output.merge_tree.len() <= 3);

        let decoded =
            pairloom_core::decode(&pairloom_core::encode(&output.vocab, &output.merge_tree, &["abab"]).unwrap());
        assert_eq!(decoded, vec!["abab".to_string()]);
    }

    #[test]
    fn test_deterministic_tie_break_is_reproducible() {
        // The heap's ascending-key tie-break makes training a pure function
        // of its input: two runs over the same corpus must agree exactly.
        let words = ["the", "cat", "sat", "on", "the", "mat"];
        let a = BpeTrainerOptions::new(5).init().train(&words).unwrap();
        let b = BpeTrainerOptions::new(5).init().train(&words).unwrap();
        assert_eq!(a.merge_tree, b.merge_tree);
    }

    #[test]
    fn test_final_stream_matches_merge_tree_replay() {
        let words = ["low", "lower"];
        let output = BpeTrainerOptions::new(2).init().train(&words).unwrap();

        let final_ids: Vec<_> = output.final_stream.iter().map(|(_, id, _)| id).collect();
        let replayed = pairloom_core::encode(&output.vocab, &output.merge_tree, &words).unwrap();
        let replayed_ids: Vec<_> = replayed.iter().map(|(_, id, _)| id).collect();

        assert_eq!(final_ids, replayed_ids);
    }
}
