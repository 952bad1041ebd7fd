//! Niihau Library
//!
//! An ordered set of strings stored in a radix prefix tree. Besides the usual
//! set operations it answers prefix-scoped questions (count, emptiness,
//! iteration and removal of every key starting with a prefix) and supports
//! union, difference and subset comparison between sets.
//!
//! The library is designed to be used by the `niihau` binary, but can also be
//! used as a dependency by other projects. The trie itself lives in
//! [`data_structures::niihau_trie`]; the remaining modules provide the
//! configuration, key input, output and error handling around it.

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod input;
pub mod output;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{KeyMatch, NiihauTrie, NiihauTrieConfig};

/// Version information for Niihau.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
