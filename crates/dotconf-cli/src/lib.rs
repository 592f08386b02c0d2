//! # dotconf CLI
//!
//! Command line access to a directory of namespace files.
//!
//! Every invocation opens a fresh store, so `set` and `delete` report the
//! resulting namespace document instead of persisting anything.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod commands;
pub mod error;
pub mod settings;

pub use args::{Args, Command};
pub use commands::{execute, parse_value, run};
pub use error::{CliError, CliResult};
pub use settings::CliSettings;
