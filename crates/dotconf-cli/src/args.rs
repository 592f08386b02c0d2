//! Command line arguments.

use clap::{Parser, Subcommand};
use dotconf_common::LogFormat;
use dotconf_store::SourceFormat;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "dotconf", author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding one source file per namespace
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Format of namespace files (json, yaml, toml)
    #[arg(short, long)]
    pub format: Option<SourceFormat>,

    /// YAML settings file providing defaults for the other options
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Log level filter
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output style (pretty, compact, json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations on a single dotted key
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the value at a key, or a whole namespace
    Get {
        /// Dotted key, e.g. `app.twig.cache`
        key: String,

        /// Value printed when the key is absent (JSON, or a plain string)
        #[arg(long)]
        default: Option<String>,
    },

    /// Print whether a key is present
    Exists {
        /// Dotted key
        key: String,
    },

    /// Assign a value in memory and print the resulting namespace
    Set {
        /// Dotted key
        key: String,

        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Remove a key in memory and print the resulting namespace
    Delete {
        /// Dotted key
        key: String,
    },

    /// Print whole namespaces
    Dump {
        /// Namespaces to load and print
        #[arg(required = true)]
        namespaces: Vec<String>,
    },
}
