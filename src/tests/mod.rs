//! Test modules for Niihau.
//!
//! This module contains the crate-internal test suites:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Key input rules
//! - Property-based tests of the trie against a `BTreeSet` model
//!
//! Unit tests for individual trie components live next to the code in
//! `data_structures::niihau_trie`.

pub mod input_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_set_strategy, key_strategy, TestFixture};
