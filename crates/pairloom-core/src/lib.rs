#![warn(missing_docs, unused)]
//! # `pairloom-core` Incremental BPE Building Blocks
//!
//! This crate is the algorithmic core of an incremental byte-pair-encoding
//! trainer: three coupled data structures, and the encode/decode machinery
//! that replays a recorded merge sequence.
//!
//! ## Core Types
//! * [`heap::IndexedMaxHeap`] - a binary max-heap keyed by an arbitrary
//!   ordered, hashable key, supporting `add`/`sub`/`delete` by key in
//!   addition to a deterministic, tie-broken `pop_max`.
//! * [`stream::TokenStream`] - an arena-backed doubly-linked list of token
//!   nodes representing the current segmentation of a corpus.
//! * [`pair_index::PairIndex`] - an append-only map from adjacent token
//!   pairs to the stream nodes that were, at some point, their left
//!   endpoint.
//! * [`vocab::Vocabulary`] and [`vocab::MergeTree`] - the symbol table and
//!   the ordered log of merges that a trainer produces and an encoder
//!   replays.
//!
//! ## Encoding and Decoding
//!
//! [`codec::encode`] tokenizes words by replaying a [`vocab::MergeTree`]
//! over a freshly built [`stream::TokenStream`]; [`codec::decode`] walks a
//! stream back into its constituent words. Both share the same merge
//! routine, [`merge::apply_merge`], that the training crate uses to drive
//! the heap.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]

//! ## Feature flags
//!
//! - **`ahash`** *(enabled by default)* - use [`ahash`] for this crate's
//!   internal hash maps and sets instead of the standard library's SipHash
//!   implementation.
//! - **`testing`** - no-op marker feature, present so downstream crates can
//!   gate additional test-only helpers on `pairloom-core/testing` without
//!   forcing `dev-dependencies` onto non-test builds.

pub mod codec;
pub mod errors;
pub mod heap;
pub mod merge;
pub mod pair_index;
pub mod stream;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use codec::{build_stream, decode, encode};
#[doc(inline)]
pub use errors::{PairloomError, PairloomResult};
#[doc(inline)]
pub use heap::IndexedMaxHeap;
#[doc(inline)]
pub use merge::apply_merge;
#[doc(inline)]
pub use pair_index::PairIndex;
#[doc(inline)]
pub use stream::{NodeIndex, TokenNode, TokenStream};
#[doc(inline)]
pub use types::{CommonHashMap, CommonHashSet, Pair, TokenId, WordId};
#[doc(inline)]
pub use vocab::{MergeRecord, MergeTree, Vocabulary};
