//! Niihau - Main entrypoint.
//!
//! Command-line front end for the Niihau trie. Keys are read one per line
//! from files (or standard input), and the resulting set can be listed,
//! counted, queried and combined with another set.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use niihau_lib::config::output::{OutputConfig, OutputFormat};
use niihau_lib::config::{ConfigLoader, LogConfig, NiihauConfig, ENV_PREFIX};
use niihau_lib::error::{
    report_error, set_error_reporter, ErrorContext, NiihauError, NiihauResult,
    TracingErrorReporter,
};
use niihau_lib::input::KeyReader;
use niihau_lib::output::{write_listing, Relation};
use niihau_lib::{KeyMatch, NiihauTrie};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Command line arguments for Niihau.
#[derive(Parser, Debug)]
#[clap(name = "niihau", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser, global = true)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the keys in lexicographic order
    Dump {
        /// Only keys starting with this prefix
        #[clap(short, long, default_value = "")]
        prefix: String,

        /// Print in descending order
        #[clap(short, long)]
        reverse: bool,

        /// Output format, overriding the configuration
        #[clap(short, long, value_parser)]
        format: Option<OutputFormat>,

        /// Key files, one key per line ("-" or none for stdin)
        files: Vec<PathBuf>,
    },

    /// Count the keys starting with a prefix
    Count {
        /// Prefix to count, all keys by default
        #[clap(short, long, default_value = "")]
        prefix: String,

        /// Key files, one key per line ("-" or none for stdin)
        files: Vec<PathBuf>,
    },

    /// Check whether a key is present; exits with status 1 if it is not
    Contains {
        /// Key to look for
        key: String,

        /// Match any key starting with KEY instead of KEY itself
        #[clap(short, long)]
        prefix: bool,

        /// Key files, one key per line ("-" or none for stdin)
        files: Vec<PathBuf>,
    },

    /// Print the keys found in either file
    Union {
        /// First key file
        a: PathBuf,

        /// Second key file
        b: PathBuf,

        /// Output format, overriding the configuration
        #[clap(short, long, value_parser)]
        format: Option<OutputFormat>,
    },

    /// Print the keys of A that are not in B
    Difference {
        /// Key file to subtract from
        a: PathBuf,

        /// Key file with the keys to remove
        b: PathBuf,

        /// Output format, overriding the configuration
        #[clap(short, long, value_parser)]
        format: Option<OutputFormat>,
    },

    /// Report whether A equals, is a subset of, or a superset of B
    Compare {
        /// First key file
        a: PathBuf,

        /// Second key file
        b: PathBuf,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Dump { .. } => "dump",
            Self::Count { .. } => "count",
            Self::Contains { .. } => "contains",
            Self::Union { .. } => "union",
            Self::Difference { .. } => "difference",
            Self::Compare { .. } => "compare",
            Self::Validate => "validate",
            Self::GenConfig { .. } => "gen-config",
        }
    }
}

/// Initialize the logging system. Logs go to stderr so that stdout carries
/// only command output.
fn init_logging(log: &LogConfig) -> NiihauResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if log.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_file(log.source_location)
                    .with_line_number(log.source_location),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_file(log.source_location)
                    .with_line_number(log.source_location),
            )
            .try_init()
    };

    result.map_err(|e| NiihauError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn load_keys(files: &[PathBuf], config: &NiihauConfig) -> NiihauResult<NiihauTrie> {
    KeyReader::new(&config.input).load(files, config.trie)
}

fn output_config(config: &NiihauConfig, format: Option<OutputFormat>) -> OutputConfig {
    let mut output = config.output.clone();
    if let Some(format) = format {
        output.format = format;
    }
    output
}

fn run(command: Command, config: &NiihauConfig) -> NiihauResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Dump {
            prefix,
            reverse,
            format,
            files,
        } => {
            let trie = load_keys(&files, config)?;
            let output = output_config(config, format);
            if reverse {
                write_listing(trie.iter_prefix(&prefix).rev(), &output, &mut out)?;
            } else {
                write_listing(trie.iter_prefix(&prefix), &output, &mut out)?;
            }
        }
        Command::Count { prefix, files } => {
            let trie = load_keys(&files, config)?;
            writeln!(out, "{}", trie.count_prefix(&prefix))?;
        }
        Command::Contains { key, prefix, files } => {
            let trie = load_keys(&files, config)?;
            let mode = if prefix {
                KeyMatch::Prefix
            } else {
                KeyMatch::Exact
            };
            let found = trie.contains_match(&key, mode);
            writeln!(out, "{found}")?;
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Union { a, b, format } => {
            let (a, b) = KeyReader::new(&config.input).load_pair(&a, &b, config.trie)?;
            let merged = a + &b;
            write_listing(merged.iter(), &output_config(config, format), &mut out)?;
        }
        Command::Difference { a, b, format } => {
            let (a, b) = KeyReader::new(&config.input).load_pair(&a, &b, config.trie)?;
            let rest = a - &b;
            write_listing(rest.iter(), &output_config(config, format), &mut out)?;
        }
        Command::Compare { a, b } => {
            let (a, b) = KeyReader::new(&config.input).load_pair(&a, &b, config.trie)?;
            writeln!(out, "{}", Relation::between(&a, &b))?;
        }
        Command::Validate => {
            // loading already validated it
            info!("Configuration validated successfully");
            writeln!(out, "configuration is valid")?;
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = NiihauConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| NiihauError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Main entry point for the application.
fn main() -> anyhow::Result<ExitCode> {
    let args = <Args as clap::Parser>::parse();

    let config = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX)
        .load()
        .context("Failed to load configuration")?;

    init_logging(&config.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    let component = args.command.name();
    let _span = tracing::info_span!("command", name = component).entered();

    match run(args.command, &config) {
        Ok(code) => Ok(code),
        Err(err) => {
            // the reporter logs to stderr at error level
            report_error(ErrorContext::new(err, component).with_span_trace());
            Ok(ExitCode::FAILURE)
        }
    }
}
