// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Iterator over the keys of a Niihau Trie.

use std::iter::FusedIterator;

use super::cursor::Cursor;
use super::node::TrieNode;

/// An iterator over the keys of a [`NiihauTrie`](super::NiihauTrie), in
/// lexicographic order.
///
/// Created by [`iter`](super::NiihauTrie::iter) and
/// [`iter_prefix`](super::NiihauTrie::iter_prefix). Keys are rebuilt from
/// edge labels as the iterator walks, so items are owned `String`s. Use
/// `.rev()` for descending order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    front: Cursor<'a>,
    back: Cursor<'a>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(bound: Option<&'a TrieNode>, base: String) -> Self {
        Self {
            remaining: bound.map_or(0, |node| node.terminal_count),
            front: Cursor::before_start(bound, base.clone()),
            back: Cursor::past_end(bound, base),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.front.move_next().ok()?;
        self.remaining -= 1;
        self.front.key().map(str::to_owned)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.back.move_prev().ok()?;
        self.remaining -= 1;
        self.back.key().map(str::to_owned)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
