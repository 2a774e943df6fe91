#![warn(missing_docs, unused)]
//! # `pairloom-training` Incremental BPE Trainer
//!
//! Drives [`pairloom_core`]'s indexed max-heap, token stream, and pair
//! index to learn a byte-pair-encoding vocabulary from a corpus of
//! pre-tokenized words.
//!
//! ## Training
//!
//! ```rust,no_run
//! use pairloom_training::BpeTrainerOptions;
//!
//! fn example() -> Result<(), pairloom_training::TrainerError> {
//!     let output = BpeTrainerOptions::new(100).init().train(&["low", "lower", "newest"])?;
//!     println!("learned {} merges", output.merge_tree.len());
//!     Ok(())
//! }
//! ```
//!
//! Encoding and decoding against a trained vocabulary live in
//! [`pairloom_core::codec`], not here: this crate produces a
//! [`TrainOutput`], and `pairloom_core::encode`/`pairloom_core::decode`
//! consume it.

mod trainer;

pub use trainer::{BpeTrainer, BpeTrainerOptions, TrainOutput, TrainerError, TrainerResult, VerboseLevel};
