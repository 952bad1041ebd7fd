//! Tests for key input.
//!
//! This module checks how lines become keys under different input settings.

use crate::config::input::InputConfig;
use crate::data_structures::niihau_trie::{NiihauTrie, NiihauTrieConfig};
use crate::error::input::InputError;
use crate::error::NiihauError;
use crate::input::KeyReader;
use crate::tests::TestFixture;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use test_case::test_case;

fn read(text: &str, config: &InputConfig) -> Result<Vec<String>, NiihauError> {
    let mut trie = NiihauTrie::new();
    KeyReader::new(config).read_into(Cursor::new(text), &mut trie)?;
    Ok(trie.iter().collect())
}

#[test_case("a\nb\n", &["a", "b"] ; "plain lines")]
#[test_case("a\r\nb\r\n", &["a", "b"] ; "crlf endings")]
#[test_case("b\na\nb\n", &["a", "b"] ; "duplicates collapse")]
#[test_case("  a  \n\n\t\nb", &["a", "b"] ; "trimmed and blank lines skipped")]
#[test_case("", &[] ; "empty input")]
fn test_default_input_rules(text: &str, expected: &[&str]) {
    assert_eq!(read(text, &InputConfig::default()).unwrap(), expected);
}

#[test_case(true, true, &["", "x"] ; "blank kept when not skipping")]
#[test_case(false, false, &[" x "] ; "untrimmed blank skipped")]
fn test_whitespace_settings(keep_blank: bool, trim: bool, expected: &[&str]) {
    let config = InputConfig {
        trim_whitespace: trim,
        skip_blank_lines: !keep_blank,
        ..InputConfig::default()
    };
    assert_eq!(read(" x \n\n", &config).unwrap(), expected);
}

#[test]
fn test_comment_lines_are_skipped() {
    let config = InputConfig {
        comment_prefix: Some("#".to_string()),
        ..InputConfig::default()
    };
    let keys = read("# header\nkey\n  # indented\nkey#2\n", &config).unwrap();
    assert_eq!(keys, ["key", "key#2"]);
}

#[test]
fn test_key_too_long_reports_line() {
    let config = InputConfig {
        max_key_len: 4,
        ..InputConfig::default()
    };
    let err = read("ok\nfine\ntoolong\n", &config).unwrap_err();
    assert!(matches!(
        err,
        NiihauError::Input(InputError::KeyTooLong {
            line: 3,
            len: 7,
            max: 4
        })
    ));
}

#[test]
fn test_invalid_utf8_reports_line() {
    let mut trie = NiihauTrie::new();
    let bytes: &[u8] = b"good\n\xff\xfe\n";
    let err = KeyReader::new(&InputConfig::default())
        .read_into(bytes, &mut trie)
        .unwrap_err();

    assert!(matches!(
        err,
        NiihauError::Input(InputError::InvalidUtf8 { line: 2 })
    ));
    // keys before the bad line were already taken
    assert!(trie.contains("good"));
}

#[test]
fn test_read_into_counts_new_keys() {
    let config = InputConfig::default();
    let reader = KeyReader::new(&config);
    let mut trie: NiihauTrie = ["a"].into_iter().collect();

    let added = reader.read_into(Cursor::new("a\nb\nc\nb\n"), &mut trie).unwrap();
    assert_eq!(added, 2);
    assert_eq!(trie.len(), 3);
}

#[test]
fn test_load_merges_files() {
    let fixture = TestFixture::new().unwrap();
    let first = fixture.create_file("first.txt", "Car\ndog\n").unwrap();
    let second = fixture.create_file("second.txt", "CART\ncar\n").unwrap();

    let config = InputConfig::default();
    let trie = KeyReader::new(&config)
        .load(
            &[first, second],
            NiihauTrieConfig {
                case_sensitive: false,
            },
        )
        .unwrap();

    assert_eq!(trie.iter().collect::<Vec<_>>(), ["car", "cart", "dog"]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let fixture = TestFixture::new().unwrap();
    let missing = fixture.temp_dir.path().join("nope.txt");

    let config = InputConfig::default();
    let err = KeyReader::new(&config)
        .load(&[missing], NiihauTrieConfig::default())
        .unwrap_err();
    assert!(matches!(err, NiihauError::Io(_)));
}

#[test]
fn test_stdin_named_twice_is_rejected() {
    let config = InputConfig::default();
    let reader = KeyReader::new(&config);

    let err = reader
        .load_pair(Path::new("-"), Path::new("-"), NiihauTrieConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        NiihauError::Input(InputError::StdinRepeated { count: 2 })
    ));

    let err = reader
        .load(
            &[PathBuf::from("-"), PathBuf::from("-")],
            NiihauTrieConfig::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        NiihauError::Input(InputError::StdinRepeated { count: 2 })
    ));
}

#[test]
fn test_load_pair_reads_both_files() {
    let fixture = TestFixture::new().unwrap();
    let a = fixture.create_file("a.txt", "x
y
").unwrap();
    let b = fixture.create_file("b.txt", "y
").unwrap();

    let config = InputConfig::default();
    let (first, second) = KeyReader::new(&config)
        .load_pair(&a, &b, NiihauTrieConfig::default())
        .unwrap();
    assert_eq!(first.len(), 2);
    assert!(second.is_subset_of(&first));
    assert!(crate::input::ensure_single_stdin([a.as_path(), Path::new("-")]).is_ok());
}
