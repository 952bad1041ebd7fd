// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bidirectional cursor over the keys of a Niihau Trie.
//!
//! A cursor is confined to one subtree, its *bound*: the whole trie, or the
//! subtree addressed by a prefix. Besides sitting on a key it can be past the
//! end or before the start of that bound. Stepping off either end returns an
//! error instead of wandering into keys outside the bound.
//!
//! Nodes have no parent pointers, so the cursor keeps the path from the bound
//! down to the current node, and the key spelled by that path in a running
//! buffer.

use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};
use std::ptr;

use super::error::{NiihauTrieError, NiihauTrieResult};
use super::node::TrieNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeStart,
    AtKey,
    PastEnd,
}

/// A position in the ordered key sequence of a [`NiihauTrie`](super::NiihauTrie).
///
/// Created by [`cursor_first`](super::NiihauTrie::cursor_first),
/// [`cursor_last`](super::NiihauTrie::cursor_last),
/// [`cursor_past_end`](super::NiihauTrie::cursor_past_end),
/// [`cursor_before_start`](super::NiihauTrie::cursor_before_start) and
/// [`lower_bound`](super::NiihauTrie::lower_bound). The cursor borrows the
/// trie, so the trie cannot be mutated while it is alive.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// Subtree the cursor is confined to, `None` when the prefix is absent
    bound: Option<&'a TrieNode>,

    /// Full key of the bound node
    base: String,

    /// Nodes from the bound down to the current node
    path: Vec<&'a TrieNode>,

    /// Key spelled by `path`
    key: String,

    position: Position,
}

impl<'a> Cursor<'a> {
    fn new(bound: Option<&'a TrieNode>, base: String, position: Position) -> Self {
        Self {
            bound,
            key: base.clone(),
            base,
            path: Vec::new(),
            position,
        }
    }

    pub(crate) fn past_end(bound: Option<&'a TrieNode>, base: String) -> Self {
        Self::new(bound, base, Position::PastEnd)
    }

    pub(crate) fn before_start(bound: Option<&'a TrieNode>, base: String) -> Self {
        Self::new(bound, base, Position::BeforeStart)
    }

    pub(crate) fn first(bound: Option<&'a TrieNode>, base: String) -> Self {
        let mut cursor = Self::past_end(bound, base);
        cursor.seek_first();
        cursor
    }

    pub(crate) fn last(bound: Option<&'a TrieNode>, base: String) -> Self {
        let mut cursor = Self::before_start(bound, base);
        cursor.seek_last();
        cursor
    }

    /// Cursor over the whole trie at the smallest key that is `>= key`.
    pub(crate) fn lower_bound(root: &'a TrieNode, key: &str) -> Self {
        let mut cursor = Self::past_end(Some(root), String::new());
        if cursor.reset().is_none() {
            return cursor;
        }

        let mut rest = key;
        while let Some(node) = cursor.current() {
            let Some(first) = rest.chars().next() else {
                break;
            };

            let Some(child) = node.children.get(&first) else {
                cursor.skip_siblings_after(first);
                return cursor;
            };

            if let Some(tail) = rest.strip_prefix(child.label.as_str()) {
                cursor.push(child);
                rest = tail;
            } else if child.label.as_str() > rest {
                // every key below `child` sorts after `key`
                cursor.push(child);
                cursor.descend_first();
                return cursor;
            } else {
                cursor.skip_siblings_after(first);
                return cursor;
            }
        }

        // the path spells `key` exactly
        cursor.descend_first();
        cursor
    }

    /// Returns the key at the cursor, or `None` past the end or before the
    /// start.
    pub fn key(&self) -> Option<&str> {
        match self.position {
            Position::AtKey => Some(&self.key),
            _ => None,
        }
    }

    /// Whether the cursor sits after the last key of its range.
    pub fn is_past_end(&self) -> bool {
        self.position == Position::PastEnd
    }

    /// Whether the cursor sits before the first key of its range.
    pub fn is_before_start(&self) -> bool {
        self.position == Position::BeforeStart
    }

    /// Advances to the next key in lexicographic order.
    ///
    /// From the last key of the range the cursor moves past the end; from
    /// before the start it moves to the first key.
    ///
    /// # Errors
    ///
    /// [`NiihauTrieError::PastTheEnd`] if the cursor is already past the end.
    pub fn move_next(&mut self) -> NiihauTrieResult<()> {
        match self.position {
            Position::PastEnd => Err(NiihauTrieError::PastTheEnd),
            Position::BeforeStart => {
                self.seek_first();
                Ok(())
            }
            Position::AtKey => {
                let first_child = self
                    .current()
                    .and_then(|node| node.children.values().next());
                match first_child {
                    Some(child) => {
                        self.push(child);
                        self.descend_first();
                    }
                    None => self.advance_past_subtree(),
                }
                Ok(())
            }
        }
    }

    /// Steps back to the previous key in lexicographic order.
    ///
    /// From the first key of the range the cursor moves before the start;
    /// from past the end it moves to the last key.
    ///
    /// # Errors
    ///
    /// [`NiihauTrieError::BeforeStart`] if the cursor is already before the
    /// start.
    pub fn move_prev(&mut self) -> NiihauTrieResult<()> {
        match self.position {
            Position::BeforeStart => Err(NiihauTrieError::BeforeStart),
            Position::PastEnd => {
                self.seek_last();
                Ok(())
            }
            Position::AtKey => {
                self.retreat();
                Ok(())
            }
        }
    }

    /// Rewinds to the bound. Returns it if it holds at least one key.
    fn reset(&mut self) -> Option<&'a TrieNode> {
        self.path.clear();
        self.key.clear();
        self.key.push_str(&self.base);

        let bound = self.bound?;
        self.path.push(bound);
        (bound.terminal_count > 0).then_some(bound)
    }

    fn seek_first(&mut self) {
        match self.reset() {
            Some(_) => self.descend_first(),
            None => self.position = Position::PastEnd,
        }
    }

    fn seek_last(&mut self) {
        match self.reset() {
            Some(_) => self.descend_last(),
            None => self.position = Position::BeforeStart,
        }
    }

    fn current(&self) -> Option<&'a TrieNode> {
        self.path.last().copied()
    }

    fn push(&mut self, node: &'a TrieNode) {
        self.key.push_str(&node.label);
        self.path.push(node);
    }

    // Never pops the bound itself.
    fn pop(&mut self) -> Option<&'a TrieNode> {
        if self.path.len() <= 1 {
            return None;
        }
        let node = self.path.pop()?;
        self.key.truncate(self.key.len() - node.label.len());
        Some(node)
    }

    /// Walks down to the first key in the current node's subtree.
    fn descend_first(&mut self) {
        while let Some(node) = self.current() {
            if node.is_terminal {
                self.position = Position::AtKey;
                return;
            }
            match node.children.values().next() {
                Some(child) => self.push(child),
                None => break,
            }
        }
        self.position = Position::PastEnd;
    }

    /// Walks down to the last key in the current node's subtree.
    fn descend_last(&mut self) {
        while let Some(node) = self.current() {
            match node.children.values().next_back() {
                Some(child) => self.push(child),
                None => break,
            }
        }

        self.position = match self.current() {
            Some(node) if node.is_terminal => Position::AtKey,
            _ => Position::BeforeStart,
        };
    }

    /// Moves to the first child of the current node labelled after `first`,
    /// or past the current node's subtree when there is none.
    fn skip_siblings_after(&mut self, first: char) {
        let next = self.current().and_then(|node| {
            node.children
                .range((Excluded(first), Unbounded))
                .next()
                .map(|(_, child)| child)
        });

        match next {
            Some(sibling) => {
                self.push(sibling);
                self.descend_first();
            }
            None => self.advance_past_subtree(),
        }
    }

    /// Leaves the current subtree for the first key after it in the bound.
    fn advance_past_subtree(&mut self) {
        while let Some(child) = self.pop() {
            let (Some(parent), Some(first)) = (self.current(), child.first_char()) else {
                break;
            };

            if let Some((_, sibling)) = parent.children.range((Excluded(first), Unbounded)).next() {
                self.push(sibling);
                self.descend_first();
                return;
            }
        }
        self.position = Position::PastEnd;
    }

    /// Moves to the key that precedes the current node in pre-order.
    fn retreat(&mut self) {
        while let Some(child) = self.pop() {
            let (Some(parent), Some(first)) = (self.current(), child.first_char()) else {
                break;
            };

            if let Some((_, sibling)) = parent.children.range(..first).next_back() {
                self.push(sibling);
                self.descend_last();
                return;
            }

            if parent.is_terminal {
                self.position = Position::AtKey;
                return;
            }
        }
        self.position = Position::BeforeStart;
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_bound = match (self.bound, other.bound) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => self.base == other.base,
            _ => false,
        };

        same_bound
            && self.position == other.position
            && (self.position != Position::AtKey || self.key == other.key)
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("bound", &self.base)
            .field("position", &self.position)
            .field("key", &self.key())
            .finish()
    }
}
