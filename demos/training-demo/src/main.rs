//! Trains a small byte-pair-encoding vocabulary over a built-in word list
//! and prints the resulting merges.
//!
//! Loading a real corpus from disk is out of scope for this workspace; see
//! the crate-level docs on `pairloom-training` for where that would plug in.

use pairloom_training::{BpeTrainerOptions, VerboseLevel};

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog", "the", "dog", "barks",
    "the", "fox", "runs", "low", "lower", "lowest", "newest", "widest",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    log::info!("Training over a built-in word list of {} words", WORDS.len());
    let t0 = std::time::Instant::now();

    let options = BpeTrainerOptions::new(30).with_verbose(VerboseLevel::Progress);
    let output = options.init().train(WORDS)?;

    let elapsed = t0.elapsed();
    println!("trained in {elapsed:.2?}");
    println!("vocabulary size: {}", output.vocab.len());
    println!("merges performed: {}", output.merge_tree.len());

    for (i, record) in output.merge_tree.iter().enumerate() {
        let left = output.vocab.symbol_of(record.pair.0).unwrap_or("?");
        let right = output.vocab.symbol_of(record.pair.1).unwrap_or("?");
        let merged = output.vocab.symbol_of(record.new_id).unwrap_or("?");
        println!("  merge {i}: {left:?} + {right:?} -> {merged:?}");
    }

    let stream = pairloom_core::encode(&output.vocab, &output.merge_tree, WORDS)?;
    let decoded = pairloom_core::decode(&stream);
    assert_eq!(decoded, WORDS.iter().map(|w| w.to_string()).collect::<Vec<_>>());
    println!("round-trip check passed");

    Ok(())
}
