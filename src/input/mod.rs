//! Key input for Niihau.
//!
//! Keys are read one per line from files or standard input. Line endings
//! (`\n` or `\r\n`) are stripped; everything else is governed by
//! [`InputConfig`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::input::InputConfig;
use crate::data_structures::niihau_trie::{NiihauTrie, NiihauTrieConfig};
use crate::error::input::InputError;
use crate::error::NiihauResult;

/// Source name that stands for standard input.
pub const STDIN_SOURCE: &str = "-";

/// Turns lines of text into keys according to an [`InputConfig`].
#[derive(Debug, Clone, Copy)]
pub struct KeyReader<'c> {
    config: &'c InputConfig,
}

impl<'c> KeyReader<'c> {
    /// Creates a reader using `config`.
    pub fn new(config: &'c InputConfig) -> Self {
        Self { config }
    }

    /// Applies the input rules to a single line.
    ///
    /// # Arguments
    ///
    /// * `line` - Line content without its terminator
    /// * `line_no` - One-based line number, used in errors
    ///
    /// # Returns
    ///
    /// The key, `None` for skipped lines, or an error for oversized keys.
    pub fn accept<'l>(&self, line: &'l str, line_no: usize) -> Result<Option<&'l str>, InputError> {
        let key = if self.config.trim_whitespace {
            line.trim()
        } else {
            line
        };

        if self.config.skip_blank_lines && key.trim().is_empty() {
            return Ok(None);
        }
        if let Some(marker) = self.config.comment_prefix.as_deref() {
            if key.trim_start().starts_with(marker) {
                return Ok(None);
            }
        }
        if key.len() > self.config.max_key_len {
            return Err(InputError::KeyTooLong {
                line: line_no,
                len: key.len(),
                max: self.config.max_key_len,
            });
        }

        Ok(Some(key))
    }

    /// Reads every key from `reader` into `trie`.
    ///
    /// # Returns
    ///
    /// The number of keys that were new to `trie`.
    pub fn read_into<R: BufRead>(&self, mut reader: R, trie: &mut NiihauTrie) -> NiihauResult<usize> {
        let mut buf = Vec::new();
        let mut line_no = 0;
        let mut added = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let line = strip_line_ending(&buf);
            let line =
                std::str::from_utf8(line).map_err(|_| InputError::InvalidUtf8 { line: line_no })?;

            if let Some(key) = self.accept(line, line_no)? {
                added += usize::from(trie.insert(key));
            }
        }

        tracing::debug!(lines = line_no, added, "read keys");
        Ok(added)
    }

    /// Reads one file, or standard input for [`STDIN_SOURCE`], into `trie`.
    pub fn read_source(&self, source: &Path, trie: &mut NiihauTrie) -> NiihauResult<usize> {
        if source.as_os_str() == STDIN_SOURCE {
            let stdin = io::stdin();
            return self.read_into(stdin.lock(), trie);
        }

        let file = File::open(source)?;
        self.read_into(BufReader::new(file), trie)
    }

    /// Builds a trie from every source in `sources`, or from standard input
    /// when `sources` is empty. Standard input may be named at most once.
    pub fn load(&self, sources: &[PathBuf], trie_config: NiihauTrieConfig) -> NiihauResult<NiihauTrie> {
        ensure_single_stdin(sources.iter().map(PathBuf::as_path))?;
        let mut trie = NiihauTrie::with_config(trie_config);

        if sources.is_empty() {
            self.read_source(Path::new(STDIN_SOURCE), &mut trie)?;
        }
        for source in sources {
            let _span = tracing::debug_span!("source", path = %source.display()).entered();
            self.read_source(source, &mut trie)?;
        }

        Ok(trie)
    }

    /// Builds one trie from each of two sources, for commands comparing or
    /// combining a pair. At most one of them may be standard input.
    pub fn load_pair(
        &self,
        a: &Path,
        b: &Path,
        trie_config: NiihauTrieConfig,
    ) -> NiihauResult<(NiihauTrie, NiihauTrie)> {
        ensure_single_stdin([a, b])?;
        let first = self.load(&[a.to_path_buf()], trie_config)?;
        let second = self.load(&[b.to_path_buf()], trie_config)?;
        Ok((first, second))
    }
}

/// Rejects source lists naming standard input more than once; the second
/// read would see an exhausted stream.
pub fn ensure_single_stdin<'p, I>(sources: I) -> Result<(), InputError>
where
    I: IntoIterator<Item = &'p Path>,
{
    let count = sources
        .into_iter()
        .filter(|source| source.as_os_str() == STDIN_SOURCE)
        .count();
    if count > 1 {
        return Err(InputError::StdinRepeated { count });
    }
    Ok(())
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
