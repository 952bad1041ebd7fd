// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for Niihau Trie.
//!
//! Lookups, insertion and removal are total and never fail. The only
//! reportable misuse is stepping a cursor beyond either end of its range.

/// Errors that can occur in Niihau Trie operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NiihauTrieError {
    /// A cursor already past the last key was moved forward.
    #[error("Cursor is past the end of its range")]
    PastTheEnd,

    /// A cursor already before the first key was moved backward.
    #[error("Cursor is before the start of its range")]
    BeforeStart,
}

/// Result type for Niihau Trie operations
pub type NiihauTrieResult<T> = Result<T, NiihauTrieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NiihauTrieError::PastTheEnd;
        assert_eq!(err.to_string(), "Cursor is past the end of its range");

        let err = NiihauTrieError::BeforeStart;
        assert_eq!(err.to_string(), "Cursor is before the start of its range");
    }
}
