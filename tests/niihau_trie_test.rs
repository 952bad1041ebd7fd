// Copyright (c) 2025 Niihau Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for Niihau Trie.
//! Exercises the public API the way a dependent crate would.

use std::io::Cursor as IoCursor;

use niihau_lib::config::input::InputConfig;
use niihau_lib::config::output::{OutputConfig, OutputFormat};
use niihau_lib::data_structures::{KeyMatch, NiihauTrie, NiihauTrieConfig, NiihauTrieError};
use niihau_lib::input::KeyReader;
use niihau_lib::output::{write_listing, Relation};

fn keys(trie: &NiihauTrie) -> Vec<String> {
    trie.into_iter().collect()
}

#[test]
fn test_prefix_queries_and_removal() {
    let mut trie = NiihauTrie::new();
    for key in ["car", "care", "cart", "dog"] {
        assert!(trie.insert(key));
    }

    assert_eq!(trie.count_prefix("car"), 3);
    assert!(trie.contains_prefix("car"));
    assert!(trie.contains("care"));
    assert!(!trie.contains("ca"));

    assert!(trie.remove("car"));
    assert!(!trie.contains("car"));
    assert!(trie.contains("care"));
    assert_eq!(trie.len(), 3);
}

#[test]
fn test_union_then_difference() {
    let a = NiihauTrie::from(["a", "ab"]);
    let b = NiihauTrie::from(["ab", "b"]);

    let sum = &a + &b;
    assert_eq!(keys(&sum), ["a", "ab", "b"]);

    let rest = sum - &b;
    assert_eq!(keys(&rest), ["a"]);
}

#[test]
fn test_subset_ordering() {
    let a = NiihauTrie::from(["a"]);
    let b = NiihauTrie::from(["a", "b"]);

    assert!(a < b);
    assert!(!(b < a));
    assert!(a <= a.clone());
    assert_eq!(a, a.clone());
    assert_eq!(Relation::between(&b, &a), Relation::Superset);
}

#[test]
fn test_empty_trie() {
    let trie = NiihauTrie::default();

    assert!(trie.is_empty());
    assert_eq!(trie.len(), 0);
    assert_eq!(trie.cursor_first(""), trie.cursor_past_end(""));
    assert_eq!(trie.iter().next(), None);
}

#[test]
fn test_cursor_errors_at_the_ends() {
    let trie = NiihauTrie::from(["only"]);

    let mut cursor = trie.cursor_first("");
    cursor.move_next().unwrap();
    assert_eq!(cursor.move_next(), Err(NiihauTrieError::PastTheEnd));

    let mut cursor = trie.cursor_before_start("");
    assert_eq!(cursor.move_prev(), Err(NiihauTrieError::BeforeStart));
}

#[test]
fn test_erase_returns_following_key() {
    let mut trie = NiihauTrie::from(["apple", "apricot", "banana", "blueberry"]);

    let cursor = trie.remove_with_cursor("ap", KeyMatch::Prefix);
    assert_eq!(cursor.key(), Some("banana"));
    assert_eq!(keys(&trie), ["banana", "blueberry"]);
}

#[test]
fn test_read_and_list_keys() {
    let config = InputConfig {
        comment_prefix: Some("//".to_string()),
        ..InputConfig::default()
    };
    let mut trie = NiihauTrie::with_config(NiihauTrieConfig {
        case_sensitive: false,
    });

    let added = KeyReader::new(&config)
        .read_into(IoCursor::new("// fruit\nKiwi\nkiwi\nLime\n"), &mut trie)
        .unwrap();
    assert_eq!(added, 2);

    let output = OutputConfig {
        format: OutputFormat::Json,
        pretty: false,
    };
    let mut out = Vec::new();
    write_listing(trie.iter().rev(), &output, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[\"lime\",\"kiwi\"]\n");
}

#[test]
fn test_long_nested_keys() {
    let mut trie = NiihauTrie::new();
    let long: String = "ab".repeat(50_000);

    // nested prefixes, one node per key
    for end in (2000..=long.len()).step_by(2000) {
        trie.insert(&long[..end]);
    }
    let copy = trie.clone();
    assert_eq!(copy.len(), trie.len());
    assert_eq!(trie.count_prefix("abab"), trie.len());

    trie.clear();
    assert!(trie.is_empty());
}
