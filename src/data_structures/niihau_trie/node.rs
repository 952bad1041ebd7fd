// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Niihau Trie.
//!
//! Nodes are the storage unit of the trie. Each node owns its children
//! exclusively; there are no parent pointers and no shared ownership, so a
//! subtree can be detached and dropped as a single value.

use std::collections::BTreeMap;

/// A node in the Niihau Trie.
///
/// Each non-root node is reached through a non-empty edge `label`. Chains of
/// single-child, non-terminal nodes are merged into one label (radix
/// compaction), so every non-root node is either terminal or a branch point.
#[derive(Debug)]
pub(crate) struct TrieNode {
    /// Edge label leading into this node (empty for the root)
    pub label: String,

    /// Children keyed by the first character of their label
    pub children: BTreeMap<char, Box<TrieNode>>,

    /// Whether the path to this node spells a stored key
    pub is_terminal: bool,

    /// Number of terminal nodes in this subtree, this node included
    pub terminal_count: usize,
}

impl TrieNode {
    /// Creates the empty, non-terminal root node.
    pub fn root() -> Self {
        Self {
            label: String::new(),
            children: BTreeMap::new(),
            is_terminal: false,
            terminal_count: 0,
        }
    }

    /// Creates a terminal leaf reached through `label`.
    pub fn leaf(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            children: BTreeMap::new(),
            is_terminal: true,
            terminal_count: 1,
        }
    }

    /// First character of the edge label, `None` for the root.
    pub fn first_char(&self) -> Option<char> {
        self.label.chars().next()
    }

    /// Splits the edge label at byte offset `at`.
    ///
    /// This node keeps `label[..at]` and becomes a non-terminal branch point
    /// whose only child carries the rest of the label together with the old
    /// terminal flag, children and count. `at` must be a char boundary
    /// strictly inside the label.
    pub fn split_label(&mut self, at: usize) {
        debug_assert!(at > 0 && at < self.label.len());

        let tail = self.label.split_off(at);
        let lower = TrieNode {
            label: tail,
            children: std::mem::take(&mut self.children),
            is_terminal: self.is_terminal,
            terminal_count: self.terminal_count,
        };

        self.is_terminal = false;
        if let Some(first) = lower.first_char() {
            self.children.insert(first, Box::new(lower));
        }
    }

    /// Merges this node with its only child when it is a non-terminal
    /// pass-through. Must not be called on the root.
    pub fn absorb_only_child(&mut self) {
        if self.is_terminal || self.children.len() != 1 {
            return;
        }

        let mut child = match self.children.pop_first() {
            Some((_, child)) => child,
            None => return,
        };

        self.label.push_str(&child.label);
        self.children = std::mem::take(&mut child.children);
        self.is_terminal = child.is_terminal;
        // terminal_count is unchanged: the child held every terminal below us
    }
}

impl Clone for TrieNode {
    // Deep copy without recursion: list the subtree in pre-order, then
    // rebuild it back to front so every node's children are finished (and
    // sitting on top of `built`) by the time the node itself is copied.
    fn clone(&self) -> Self {
        let mut order: Vec<(usize, &TrieNode)> = Vec::new();
        let mut walk = vec![(0usize, self)];
        while let Some((depth, node)) = walk.pop() {
            order.push((depth, node));
            walk.extend(node.children.values().map(|child| (depth + 1, &**child)));
        }

        let mut built: Vec<(usize, TrieNode)> = Vec::with_capacity(order.len());
        for (depth, node) in order.into_iter().rev() {
            let mut copy = TrieNode {
                label: node.label.clone(),
                children: BTreeMap::new(),
                is_terminal: node.is_terminal,
                terminal_count: node.terminal_count,
            };

            while matches!(built.last(), Some((child_depth, _)) if *child_depth == depth + 1) {
                if let Some((_, child)) = built.pop() {
                    if let Some(first) = child.first_char() {
                        copy.children.insert(first, Box::new(child));
                    }
                }
            }

            built.push((depth, copy));
        }

        built.pop().map(|(_, root)| root).unwrap_or_default()
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::root()
    }
}

impl Drop for TrieNode {
    // Tear the subtree down with an explicit stack so that long chains of
    // nodes do not recurse once per level.
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }

        let mut pending: Vec<Box<TrieNode>> = Vec::new();
        pending.extend(std::mem::take(&mut self.children).into_values());

        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
            // `node` is now childless and drops without recursing
        }
    }
}

/// Length in bytes of the longest common prefix of `a` and `b`, always on a
/// char boundary of both.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}
