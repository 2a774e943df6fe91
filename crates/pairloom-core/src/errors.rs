//! # Error Types

/// Errors from pairloom-core operations.
#[derive(Debug, thiserror::Error)]
pub enum PairloomError {
    /// `IndexedMaxHeap::pop_max` was called on an empty heap.
    ///
    /// The trainer treats this as the normal end-of-training signal and does
    /// not propagate it; callers that drive the heap directly should treat
    /// it as "nothing left to merge."
    #[error("heap is empty")]
    Empty,

    /// `IndexedMaxHeap::sub` was called with a decrement larger than the
    /// key's current count.
    #[error("cannot decrement key {key} by {requested} (current count is {have})")]
    InvalidDecrement {
        /// The debug representation of the key whose count underflowed.
        key: String,
        /// The key's current count.
        have: u64,
        /// The decrement that was requested.
        requested: u64,
    },

    /// `IndexedMaxHeap::sub`/`delete` was called on a key that is not present.
    #[error("key {key} is not present in the heap")]
    MissingKey {
        /// The debug representation of the missing key.
        key: String,
    },

    /// `encode` was asked to tokenize a character absent from the vocabulary.
    #[error("symbol {symbol:?} is not present in the vocabulary")]
    UnknownSymbol {
        /// The symbol that could not be resolved to a token id.
        symbol: String,
    },
}

/// Result type for pairloom-core operations.
pub type PairloomResult<T> = std::result::Result<T, PairloomError>;
