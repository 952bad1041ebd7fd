//! Data structures for Niihau.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Iterative traversal, so deep keys cannot exhaust the stack
//! - Ownership-only node graphs without shared or parent pointers

pub mod niihau_trie;

// Re-export common data structures
pub use niihau_trie::{
    Cursor, Iter, KeyMatch, NiihauTrie, NiihauTrieConfig, NiihauTrieError, NiihauTrieResult,
};
