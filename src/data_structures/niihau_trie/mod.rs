// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Niihau Trie Implementation
//!
//! This module provides an ordered set of strings stored in a radix prefix
//! tree. Besides the usual set operations it answers prefix-scoped questions:
//! how many keys start with a prefix, whether any does, and iteration over
//! exactly those keys.
//!
//! # Structure
//!
//! * Every node owns its children; the root always exists and stands for the
//!   empty string.
//! * Edges carry multi-character labels. Chains of single-child, non-terminal
//!   nodes are merged, so the tree only has nodes where keys end or branch.
//! * Each node counts the keys in its subtree, which makes
//!   [`count_prefix`](NiihauTrie::count_prefix) proportional to the prefix
//!   length instead of the subtree size.
//!
//! # Example
//!
//! ```
//! use niihau_lib::data_structures::niihau_trie::NiihauTrie;
//!
//! let mut trie: NiihauTrie = ["car", "care", "cart", "dog"].into_iter().collect();
//!
//! assert_eq!(trie.count_prefix("car"), 3);
//! assert!(trie.contains_prefix("ca"));
//! assert!(!trie.contains("ca"));
//!
//! trie.remove("car");
//! assert_eq!(trie.iter().collect::<Vec<_>>(), ["care", "cart", "dog"]);
//! ```
//!
//! # Concurrency
//!
//! The trie is a plain owned value. Mutation needs `&mut`, so sharing one
//! between threads requires an external lock chosen by the caller.

mod algebra;
mod cursor;
mod error;
mod iter;
mod node;

use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

pub use cursor::Cursor;
pub use error::{NiihauTrieError, NiihauTrieResult};
pub use iter::Iter;
use node::{common_prefix_len, TrieNode};

/// Configuration options for the Niihau Trie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NiihauTrieConfig {
    /// Whether keys are stored and looked up as given. When false, keys are
    /// lowercased on the way in and on every lookup.
    pub case_sensitive: bool,
}

impl NiihauTrieConfig {
    fn normalize<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if self.case_sensitive {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_lowercase())
        }
    }
}

impl Default for NiihauTrieConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Whether a key argument names one key or every key starting with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    /// The key itself.
    Exact,
    /// Every key that has the argument as a prefix.
    Prefix,
}

/// Niihau Trie is an ordered set of strings stored as a radix prefix tree.
///
/// Key features:
/// * Keys iterate in lexicographic order, forward or backward
/// * Prefix-scoped counting, emptiness checks, iteration and removal
/// * Union, difference and subset comparisons between tries
/// * Optional case-insensitive keys
#[derive(Clone, Default)]
pub struct NiihauTrie {
    /// The root node of the trie
    root: TrieNode,

    /// Configuration options
    config: NiihauTrieConfig,
}

impl NiihauTrie {
    /// Creates a new empty `NiihauTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(NiihauTrieConfig::default())
    }

    /// Creates a new empty `NiihauTrie` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: NiihauTrieConfig) -> Self {
        Self {
            root: TrieNode::root(),
            config,
        }
    }

    /// Creates a trie holding `keys`, duplicates ignored.
    ///
    /// # Arguments
    ///
    /// * `keys` - The keys to insert.
    /// * `config` - Configuration for the trie.
    pub fn from_keys<I, K>(keys: I, config: NiihauTrieConfig) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut trie = Self::with_config(config);
        trie.extend(keys);
        trie
    }

    /// Returns the configuration of this trie.
    pub fn config(&self) -> &NiihauTrieConfig {
        &self.config
    }

    /// Returns the number of keys in the trie.
    pub fn len(&self) -> usize {
        self.root.terminal_count
    }

    /// Checks if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of keys starting with `prefix`.
    ///
    /// The empty prefix counts every key.
    pub fn count_prefix<P>(&self, prefix: P) -> usize
    where
        P: AsRef<str>,
    {
        let prefix = self.config.normalize(prefix.as_ref());
        self.find_subtree(&prefix)
            .map_or(0, |(node, _)| node.terminal_count)
    }

    /// Checks that no key starts with `prefix`.
    pub fn is_prefix_empty<P>(&self, prefix: P) -> bool
    where
        P: AsRef<str>,
    {
        self.count_prefix(prefix) == 0
    }

    /// Checks if `key` is stored in the trie.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        self.holds(&key)
    }

    /// Checks if the descent along `prefix` reaches a node, terminal or not.
    ///
    /// The root always exists, so the empty prefix is always contained, even
    /// in an empty trie. For any other prefix this means some stored key
    /// starts with it.
    pub fn contains_prefix<P>(&self, prefix: P) -> bool
    where
        P: AsRef<str>,
    {
        let prefix = self.config.normalize(prefix.as_ref());
        self.find_subtree(&prefix).is_some()
    }

    /// Checks for `key` as a whole key or as a prefix, depending on `mode`.
    pub fn contains_match<K>(&self, key: K, mode: KeyMatch) -> bool
    where
        K: AsRef<str>,
    {
        match mode {
            KeyMatch::Exact => self.contains(key),
            KeyMatch::Prefix => self.contains_prefix(key),
        }
    }

    /// Inserts a key into the trie.
    ///
    /// # Returns
    ///
    /// `true` if the key was new, `false` if it was already present (in
    /// which case nothing changes).
    pub fn insert<K>(&mut self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        self.insert_normalized(&key)
    }

    /// Inserts a key and returns a cursor positioned at it.
    pub fn insert_with_cursor<K>(&mut self, key: K) -> Cursor<'_>
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        self.insert_normalized(&key);
        Cursor::lower_bound(&self.root, &key)
    }

    /// Removes a key from the trie.
    ///
    /// # Returns
    ///
    /// `true` if the key was removed, `false` if it wasn't found.
    pub fn remove<K>(&mut self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        self.remove_normalized(&key)
    }

    /// Removes every key starting with `prefix`.
    ///
    /// # Returns
    ///
    /// The number of keys removed.
    pub fn remove_prefix<P>(&mut self, prefix: P) -> usize
    where
        P: AsRef<str>,
    {
        let prefix = self.config.normalize(prefix.as_ref());
        self.remove_prefix_normalized(&prefix)
    }

    /// Removes `key` (or every key under it, for [`KeyMatch::Prefix`]) and
    /// returns a cursor at the first key after the removed range.
    ///
    /// The cursor is past the end when nothing follows, or when nothing was
    /// removed.
    pub fn remove_with_cursor<K>(&mut self, key: K, mode: KeyMatch) -> Cursor<'_>
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        let removed = match mode {
            KeyMatch::Exact => self.remove_normalized(&key),
            KeyMatch::Prefix => self.remove_prefix_normalized(&key) > 0,
        };

        if removed {
            Cursor::lower_bound(&self.root, &key)
        } else {
            Cursor::past_end(Some(&self.root), String::new())
        }
    }

    /// Clears all keys from the trie. The root node itself is kept.
    pub fn clear(&mut self) {
        tracing::trace!(keys = self.len(), "clearing trie");
        self.root.children.clear();
        self.root.is_terminal = false;
        self.root.terminal_count = 0;
    }

    /// Returns an iterator over all keys in lexicographic order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(Some(&self.root), String::new())
    }

    /// Returns an iterator over the keys starting with `prefix`, in
    /// lexicographic order.
    pub fn iter_prefix<P>(&self, prefix: P) -> Iter<'_>
    where
        P: AsRef<str>,
    {
        let (bound, base) = self.bound_of(prefix.as_ref());
        Iter::new(bound, base)
    }

    /// Cursor at the smallest key starting with `prefix`, or past the end if
    /// there is none.
    pub fn cursor_first<P>(&self, prefix: P) -> Cursor<'_>
    where
        P: AsRef<str>,
    {
        let (bound, base) = self.bound_of(prefix.as_ref());
        Cursor::first(bound, base)
    }

    /// Cursor at the largest key starting with `prefix`, or before the start
    /// if there is none.
    pub fn cursor_last<P>(&self, prefix: P) -> Cursor<'_>
    where
        P: AsRef<str>,
    {
        let (bound, base) = self.bound_of(prefix.as_ref());
        Cursor::last(bound, base)
    }

    /// Cursor just past the last key starting with `prefix`.
    ///
    /// Stepping back from it yields the largest such key; the cursor never
    /// reaches keys outside the prefix.
    pub fn cursor_past_end<P>(&self, prefix: P) -> Cursor<'_>
    where
        P: AsRef<str>,
    {
        let (bound, base) = self.bound_of(prefix.as_ref());
        Cursor::past_end(bound, base)
    }

    /// Cursor just before the first key starting with `prefix`.
    pub fn cursor_before_start<P>(&self, prefix: P) -> Cursor<'_>
    where
        P: AsRef<str>,
    {
        let (bound, base) = self.bound_of(prefix.as_ref());
        Cursor::before_start(bound, base)
    }

    /// Cursor over the whole trie at the smallest key that is `>= key`.
    pub fn lower_bound<K>(&self, key: K) -> Cursor<'_>
    where
        K: AsRef<str>,
    {
        let key = self.config.normalize(key.as_ref());
        Cursor::lower_bound(&self.root, &key)
    }

    /// Writes every key starting with `prefix` to `writer`, one per line, in
    /// lexicographic order.
    pub fn write_keys<P, W>(&self, prefix: P, writer: &mut W) -> io::Result<()>
    where
        P: AsRef<str>,
        W: io::Write,
    {
        for key in self.iter_prefix(prefix) {
            writeln!(writer, "{key}")?;
        }
        Ok(())
    }

    /// Exact lookup of an already normalized key.
    fn holds(&self, key: &str) -> bool {
        let mut node = &self.root;
        let mut rest = key;

        while let Some(first) = rest.chars().next() {
            let Some(child) = node.children.get(&first) else {
                return false;
            };
            let Some(tail) = rest.strip_prefix(child.label.as_str()) else {
                return false;
            };
            node = &**child;
            rest = tail;
        }

        node.is_terminal
    }

    /// Finds the subtree holding every key that starts with `prefix`.
    ///
    /// Returns the subtree root and the number of prefix bytes consumed above
    /// its edge label. A prefix ending inside an edge label addresses the
    /// node below that edge.
    fn find_subtree(&self, prefix: &str) -> Option<(&TrieNode, usize)> {
        let mut node = &self.root;
        let mut above = 0;
        let mut rest = prefix;

        while let Some(first) = rest.chars().next() {
            let child = node.children.get(&first)?;
            let start = prefix.len() - rest.len();

            if let Some(tail) = rest.strip_prefix(child.label.as_str()) {
                node = &**child;
                above = start;
                rest = tail;
            } else if child.label.starts_with(rest) {
                return Some((&**child, start));
            } else {
                return None;
            }
        }

        Some((node, above))
    }

    /// Subtree and its full key, for prefix-bounded cursors.
    fn bound_of(&self, prefix: &str) -> (Option<&TrieNode>, String) {
        let prefix = self.config.normalize(prefix);
        match self.find_subtree(&prefix) {
            Some((node, above)) => (Some(node), format!("{}{}", &prefix[..above], node.label)),
            None => (None, prefix.into_owned()),
        }
    }

    fn insert_normalized(&mut self, key: &str) -> bool {
        if self.holds(key) {
            return false;
        }

        // The key is new, so every node on its path gains one key.
        let mut node = &mut self.root;
        let mut rest = key;
        loop {
            node.terminal_count += 1;

            let Some(first) = rest.chars().next() else {
                node.is_terminal = true;
                return true;
            };

            let child = match node.children.entry(first) {
                Entry::Vacant(slot) => {
                    slot.insert(Box::new(TrieNode::leaf(rest)));
                    return true;
                }
                Entry::Occupied(slot) => slot.into_mut(),
            };

            let common = common_prefix_len(&child.label, rest);
            if common < child.label.len() {
                child.split_label(common);
            }

            rest = &rest[common..];
            node = &mut **child;
        }
    }

    fn remove_normalized(&mut self, key: &str) -> bool {
        if !self.holds(key) {
            return false;
        }

        let mut node = &mut self.root;
        let mut is_root = true;
        let mut rest = key;
        loop {
            node.terminal_count -= 1;

            let Some(first) = rest.chars().next() else {
                node.is_terminal = false;
                if !is_root {
                    node.absorb_only_child();
                }
                return true;
            };

            // A child whose only key is this one goes away whole.
            let last_below = node
                .children
                .get(&first)
                .map_or(true, |child| child.terminal_count == 1);
            if last_below {
                node.children.remove(&first);
                if !is_root {
                    node.absorb_only_child();
                }
                return true;
            }

            let Some(child) = node.children.get_mut(&first) else {
                return true;
            };
            rest = &rest[child.label.len()..];
            node = &mut **child;
            is_root = false;
        }
    }

    fn remove_prefix_normalized(&mut self, prefix: &str) -> usize {
        let removed = self
            .find_subtree(prefix)
            .map_or(0, |(node, _)| node.terminal_count);
        if removed == 0 {
            return 0;
        }
        if prefix.is_empty() {
            self.clear();
            return removed;
        }

        tracing::debug!(prefix, removed, "removing prefix range");

        let mut node = &mut self.root;
        let mut is_root = true;
        let mut rest = prefix;
        loop {
            node.terminal_count -= removed;

            let Some(first) = rest.chars().next() else {
                return removed;
            };

            // The first child holding nothing but the doomed keys is detached.
            let (label_len, doomed) = match node.children.get(&first) {
                Some(child) => (child.label.len(), child.terminal_count == removed),
                None => return removed,
            };
            if doomed {
                node.children.remove(&first);
                if !is_root {
                    node.absorb_only_child();
                }
                return removed;
            }

            let Some(child) = node.children.get_mut(&first) else {
                return removed;
            };
            rest = &rest[label_len..];
            node = &mut **child;
            is_root = false;
        }
    }

    /// Panics if the node graph breaks a structural invariant.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        fn walk(node: &TrieNode, is_root: bool) -> usize {
            if !is_root {
                assert!(!node.label.is_empty(), "non-root node with empty label");
                assert!(
                    node.is_terminal || node.children.len() >= 2,
                    "pass-through node {:?} was not merged",
                    node.label
                );
            }

            let mut count = usize::from(node.is_terminal);
            for (first, child) in &node.children {
                assert_eq!(child.first_char(), Some(*first), "child filed under wrong char");
                count += walk(child, false);
            }
            assert_eq!(count, node.terminal_count, "stale terminal count");
            count
        }

        assert!(self.root.label.is_empty(), "root carries a label");
        walk(&self.root, true);
    }
}

impl fmt::Debug for NiihauTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Writes every key on its own line, in lexicographic order.
impl fmt::Display for NiihauTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.iter() {
            writeln!(f, "{key}")?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>> Extend<K> for NiihauTrie {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: AsRef<str>> FromIterator<K> for NiihauTrie {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_keys(keys, NiihauTrieConfig::default())
    }
}

impl<K: AsRef<str>, const N: usize> From<[K; N]> for NiihauTrie {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a NiihauTrie {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;
    use std::thread;

    fn keys(trie: &NiihauTrie) -> Vec<String> {
        trie.iter().collect()
    }

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = NiihauTrie::new();

        // Test initial state
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);

        // Test insertion
        assert!(trie.insert("hello"));
        assert_eq!(trie.len(), 1);
        assert!(!trie.is_empty());

        // Test retrieval
        assert!(trie.contains("hello"));
        assert!(!trie.contains("nonexistent"));
        assert!(!trie.contains("hell"));
        assert!(trie.contains_prefix("hell"));

        // Test idempotent insertion
        assert!(!trie.insert("hello"));
        assert_eq!(trie.len(), 1);

        // Test removal
        assert!(trie.remove("hello"));
        assert!(trie.is_empty());
        assert!(!trie.remove("hello"));
        trie.check_invariants();
    }

    #[test]
    fn test_empty_prefix_reaches_root() {
        let mut trie = NiihauTrie::new();
        assert!(trie.contains_prefix(""));
        assert!(trie.contains_match("", KeyMatch::Prefix));
        assert!(!trie.contains_match("", KeyMatch::Exact));
        assert!(trie.is_prefix_empty(""));
        assert!(!trie.contains_prefix("a"));

        trie.insert("ab");
        trie.remove("ab");
        assert!(trie.contains_prefix(""));
        assert!(!trie.contains_prefix("a"));
    }

    #[test]
    fn test_trie_prefix_search() {
        let trie: NiihauTrie = ["apple", "application", "apply", "banana"].into_iter().collect();

        let results: Vec<String> = trie.iter_prefix("app").collect();
        assert_eq!(results, ["apple", "application", "apply"]);
        assert_eq!(trie.count_prefix("app"), 3);
        assert_eq!(trie.count_prefix("appl"), 3);
        assert_eq!(trie.count_prefix("apple"), 1);

        // Test with no matches
        assert_eq!(trie.iter_prefix("orange").count(), 0);
        assert!(trie.is_prefix_empty("orange"));
        assert!(trie.is_prefix_empty("applz"));
        trie.check_invariants();
    }

    #[test]
    fn test_car_care_cart_dog() {
        let mut trie: NiihauTrie = ["car", "care", "cart", "dog"].into_iter().collect();

        assert_eq!(trie.count_prefix("car"), 3);
        assert!(trie.contains_match("car", KeyMatch::Prefix));
        assert!(trie.contains("care"));
        assert!(!trie.contains("ca"));
        assert!(!trie.contains_match("ca", KeyMatch::Exact));

        assert!(trie.remove("car"));
        assert!(!trie.contains("car"));
        assert!(trie.contains("care"));
        assert_eq!(trie.len(), 3);
        trie.check_invariants();
    }

    #[test]
    fn test_removal_merges_and_prunes() {
        let mut trie: NiihauTrie = ["romane", "romanus", "romulus", "rubens"].into_iter().collect();
        trie.check_invariants();

        assert!(trie.remove("romanus"));
        trie.check_invariants();
        assert!(trie.remove("romulus"));
        trie.check_invariants();
        assert_eq!(keys(&trie), ["romane", "rubens"]);

        assert!(trie.remove("rubens"));
        assert!(trie.remove("romane"));
        trie.check_invariants();
        assert!(trie.root.children.is_empty());
    }

    #[test]
    fn test_insert_splits_edges() {
        let mut trie = NiihauTrie::new();
        trie.insert("testing");
        trie.insert("test");
        trie.insert("team");
        trie.insert("toast");
        trie.check_invariants();

        assert_eq!(keys(&trie), ["team", "test", "testing", "toast"]);
        assert!(!trie.contains("tes"));
        assert!(trie.contains_prefix("tes"));
    }

    #[test]
    fn test_empty_key() {
        let mut trie = NiihauTrie::new();
        assert!(!trie.contains(""));
        assert!(trie.is_prefix_empty(""));

        assert!(trie.insert(""));
        assert!(trie.contains(""));
        assert_eq!(trie.len(), 1);
        assert_eq!(keys(&trie), [""]);

        trie.insert("x");
        assert!(trie.remove(""));
        assert_eq!(keys(&trie), ["x"]);
        trie.check_invariants();
    }

    #[test]
    fn test_remove_prefix() {
        let mut trie: NiihauTrie =
            ["car", "care", "cart", "cat", "dog", "do"].into_iter().collect();

        assert_eq!(trie.remove_prefix("car"), 3);
        trie.check_invariants();
        assert_eq!(keys(&trie), ["cat", "do", "dog"]);

        // idempotent
        assert_eq!(trie.remove_prefix("car"), 0);
        assert_eq!(trie.remove_prefix("zebra"), 0);

        // prefix ending inside an edge label
        assert_eq!(trie.remove_prefix("ca"), 1);
        trie.check_invariants();
        assert_eq!(keys(&trie), ["do", "dog"]);

        assert_eq!(trie.remove_prefix("dog"), 1);
        trie.check_invariants();
        assert_eq!(keys(&trie), ["do"]);

        assert_eq!(trie.remove_prefix(""), 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut trie: NiihauTrie = ["a", "b", ""].into_iter().collect();
        trie.clear();
        assert!(trie.is_empty());
        assert!(!trie.contains(""));
        trie.clear();
        assert!(trie.is_empty());
        assert!(trie.insert("again"));
        trie.check_invariants();
    }

    #[test]
    fn test_remove_with_cursor() {
        let mut trie: NiihauTrie =
            ["car", "care", "cart", "cat", "dog"].into_iter().collect();

        let cursor = trie.remove_with_cursor("care", KeyMatch::Exact);
        assert_eq!(cursor.key(), Some("cart"));

        let cursor = trie.remove_with_cursor("car", KeyMatch::Prefix);
        assert_eq!(cursor.key(), Some("cat"));

        let cursor = trie.remove_with_cursor("missing", KeyMatch::Exact);
        assert!(cursor.is_past_end());

        let cursor = trie.remove_with_cursor("dog", KeyMatch::Exact);
        assert!(cursor.is_past_end());

        assert_eq!(keys(&trie), ["cat"]);
    }

    #[test]
    fn test_insert_with_cursor() {
        let mut trie: NiihauTrie = ["b", "d"].into_iter().collect();

        let mut cursor = trie.insert_with_cursor("c");
        assert_eq!(cursor.key(), Some("c"));
        cursor.move_next().unwrap();
        assert_eq!(cursor.key(), Some("d"));

        let cursor = trie.insert_with_cursor("b");
        assert_eq!(cursor.key(), Some("b"));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_case_insensitive_config() {
        let config = NiihauTrieConfig {
            case_sensitive: false,
        };
        let mut trie = NiihauTrie::with_config(config);

        assert!(trie.insert("Content-Type"));
        assert!(!trie.insert("CONTENT-TYPE"));
        assert!(trie.contains("content-type"));
        assert_eq!(trie.count_prefix("CONTENT"), 1);
        assert_eq!(keys(&trie), ["content-type"]);
        assert_eq!(trie.iter_prefix("Content").count(), 1);

        assert!(trie.remove("Content-TYPE"));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original: NiihauTrie = ["one", "two", "three"].into_iter().collect();
        let mut copy = original.clone();

        copy.insert("four");
        copy.remove("one");

        assert_eq!(keys(&original), ["one", "three", "two"]);
        assert_eq!(keys(&copy), ["four", "three", "two"]);
        copy.check_invariants();
    }

    #[test]
    fn test_take_leaves_empty_trie() {
        let mut source: NiihauTrie = ["x", "y"].into_iter().collect();
        let moved = std::mem::take(&mut source);

        assert_eq!(moved.len(), 2);
        assert!(source.is_empty());
        assert!(source.insert("z"));
    }

    #[test]
    fn test_display_and_write_keys() {
        let trie: NiihauTrie = ["b", "a", "ab"].into_iter().collect();
        assert_eq!(trie.to_string(), "a\nab\nb\n");

        let mut out = Vec::new();
        trie.write_keys("a", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nab\n");

        assert_eq!(format!("{trie:?}"), r#"{"a", "ab", "b"}"#);
    }

    #[test]
    fn test_unicode_keys() {
        let trie: NiihauTrie = ["naïve", "naive", "日本", "日本語", "zebra"].into_iter().collect();
        trie.check_invariants();

        let mut expected = vec!["naïve", "naive", "日本", "日本語", "zebra"];
        expected.sort();
        assert_eq!(keys(&trie), expected);
        assert_eq!(trie.count_prefix("日"), 2);
        assert_eq!(trie.count_prefix("na"), 2);
    }

    /// The trie itself is not synchronized; callers share it behind a lock.
    #[test]
    fn test_trie_behind_external_lock() {
        const THREAD_COUNT: usize = 8;
        const OPS_PER_THREAD: usize = 50;

        let trie = Arc::new(RwLock::new(NiihauTrie::new()));
        let mut handles = Vec::with_capacity(THREAD_COUNT);

        for thread_id in 0..THREAD_COUNT {
            let trie_ref = Arc::clone(&trie);
            handles.push(thread::spawn(move || {
                for j in 0..OPS_PER_THREAD {
                    let key = format!("key_{thread_id}_{j}");
                    trie_ref.write().insert(&key);
                    assert!(trie_ref.read().contains(&key));
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        let trie = trie.read();
        assert_eq!(trie.len(), THREAD_COUNT * OPS_PER_THREAD);
        assert_eq!(trie.count_prefix("key_3_"), OPS_PER_THREAD);
        trie.check_invariants();
    }
}
