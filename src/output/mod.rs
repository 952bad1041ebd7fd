//! Key listing output for Niihau.

use std::fmt;
use std::io::Write;

use crate::config::output::{OutputConfig, OutputFormat};
use crate::data_structures::niihau_trie::NiihauTrie;
use crate::error::NiihauResult;

/// Writes `keys` to `writer` in the configured format.
///
/// Text output is one key per line. JSON output is a single array followed by
/// a newline.
pub fn write_listing<I, W>(keys: I, config: &OutputConfig, writer: &mut W) -> NiihauResult<()>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    match config.format {
        OutputFormat::Text => {
            for key in keys {
                writeln!(writer, "{key}")?;
            }
        }
        OutputFormat::Json => {
            let keys: Vec<String> = keys.into_iter().collect();
            if config.pretty {
                serde_json::to_writer_pretty(&mut *writer, &keys)?;
            } else {
                serde_json::to_writer(&mut *writer, &keys)?;
            }
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// How two key sets relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Both hold the same keys
    Equal,
    /// The first is a proper subset of the second
    Subset,
    /// The first is a proper superset of the second
    Superset,
    /// Neither contains the other
    Incomparable,
}

impl Relation {
    /// Compares `a` against `b`.
    pub fn between(a: &NiihauTrie, b: &NiihauTrie) -> Self {
        match a.partial_cmp(b) {
            Some(std::cmp::Ordering::Equal) => Self::Equal,
            Some(std::cmp::Ordering::Less) => Self::Subset,
            Some(std::cmp::Ordering::Greater) => Self::Superset,
            None => Self::Incomparable,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "equal",
            Self::Subset => "subset",
            Self::Superset => "superset",
            Self::Incomparable => "incomparable",
        };
        f.write_str(name)
    }
}
