//! # dotconf Common
//!
//! Shared error types, logging setup, and test helpers for the dotconf workspace.
//!
//! Every other crate in the workspace reports failures through [`DotConfError`]
//! and initialises tracing through [`init_logging`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{DotConfError, ErrorKind, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
