//! Key input error module.
//!
//! Errors raised while reading keys from files or standard input.

use thiserror::Error;

/// Errors that can occur while reading keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A key is longer than the configured maximum.
    #[error("Key on line {line} is {len} bytes long, limit is {max}")]
    KeyTooLong {
        /// One-based line number
        line: usize,
        /// Length of the key in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Standard input was named as a source more than once.
    #[error("Standard input (\"-\") given {count} times, it can only be read once")]
    StdinRepeated {
        /// How often it was named
        count: usize,
    },

    /// A line is not valid UTF-8.
    #[error("Line {line} is not valid UTF-8")]
    InvalidUtf8 {
        /// One-based line number
        line: usize,
    },
}
