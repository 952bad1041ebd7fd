// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Set algebra between Niihau Tries.
//!
//! Tries compare as sets of stored keys: `a <= b` means every key of `a` is
//! in `b`. Two tries where neither contains the other are incomparable, so
//! the ordering is partial.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::NiihauTrie;

impl NiihauTrie {
    /// Inserts every key of `other` into this trie.
    ///
    /// Keys pass through this trie's normalization, so a case-insensitive
    /// trie lowercases what it takes from a case-sensitive one.
    ///
    /// # Returns
    ///
    /// The number of keys that were new.
    pub fn union_with(&mut self, other: &NiihauTrie) -> usize {
        let before = self.len();
        for key in other.iter() {
            self.insert(&key);
        }

        let added = self.len() - before;
        tracing::debug!(added, total = self.len(), "merged trie");
        added
    }

    /// Removes every key of `other` from this trie.
    ///
    /// # Returns
    ///
    /// The number of keys removed.
    pub fn difference_with(&mut self, other: &NiihauTrie) -> usize {
        let before = self.len();
        for key in other.iter() {
            if self.is_empty() {
                break;
            }
            self.remove(&key);
        }

        let removed = before - self.len();
        tracing::debug!(removed, total = self.len(), "subtracted trie");
        removed
    }

    /// Whether every key of this trie is also in `other`.
    pub fn is_subset_of(&self, other: &NiihauTrie) -> bool {
        self.len() <= other.len() && self.iter().all(|key| other.holds(&key))
    }

    /// Whether this trie is a subset of `other` and strictly smaller.
    pub fn is_proper_subset_of(&self, other: &NiihauTrie) -> bool {
        self.len() < other.len() && self.is_subset_of(other)
    }

    /// Whether every key of `other` is also in this trie.
    pub fn is_superset_of(&self, other: &NiihauTrie) -> bool {
        other.is_subset_of(self)
    }

    /// Whether this trie is a superset of `other` and strictly larger.
    pub fn is_proper_superset_of(&self, other: &NiihauTrie) -> bool {
        other.is_proper_subset_of(self)
    }
}

impl PartialEq for NiihauTrie {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for NiihauTrie {}

impl PartialOrd for NiihauTrie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => (self == other).then_some(Ordering::Equal),
            Ordering::Less => self.is_subset_of(other).then_some(Ordering::Less),
            Ordering::Greater => other.is_subset_of(self).then_some(Ordering::Greater),
        }
    }
}

impl AddAssign<&NiihauTrie> for NiihauTrie {
    fn add_assign(&mut self, rhs: &NiihauTrie) {
        self.union_with(rhs);
    }
}

impl SubAssign<&NiihauTrie> for NiihauTrie {
    fn sub_assign(&mut self, rhs: &NiihauTrie) {
        self.difference_with(rhs);
    }
}

impl Add<&NiihauTrie> for NiihauTrie {
    type Output = NiihauTrie;

    fn add(mut self, rhs: &NiihauTrie) -> NiihauTrie {
        self += rhs;
        self
    }
}

impl Sub<&NiihauTrie> for NiihauTrie {
    type Output = NiihauTrie;

    fn sub(mut self, rhs: &NiihauTrie) -> NiihauTrie {
        self -= rhs;
        self
    }
}

impl Add<&NiihauTrie> for &NiihauTrie {
    type Output = NiihauTrie;

    fn add(self, rhs: &NiihauTrie) -> NiihauTrie {
        self.clone() + rhs
    }
}

impl Sub<&NiihauTrie> for &NiihauTrie {
    type Output = NiihauTrie;

    fn sub(self, rhs: &NiihauTrie) -> NiihauTrie {
        self.clone() - rhs
    }
}
