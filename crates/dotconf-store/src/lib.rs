//! # dotconf Store
//!
//! A lazily loaded, namespaced configuration store with dot-notation access.
//!
//! Keys take the form `namespace.path.to.value`. The first segment picks a
//! namespace, which is loaded through a [`Loader`] the first time it is
//! touched and cached for the lifetime of the store. The remaining segments
//! walk the namespace document with the functions in [`path`].
//!
//! ```no_run
//! use dotconf_store::NamespaceStore;
//! use dotconf_store::Value;
//! use serde_json::json;
//!
//! let mut config = NamespaceStore::open("config")?;
//! let url = config.get("app.url", Value::Null)?;
//! println!("{url}");
//! config.set("app.twig.cache", json!(false))?;
//! assert!(config.exists("app.twig")?);
//! # Ok::<(), dotconf_store::DotConfError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod key;
pub mod loader;
pub mod path;
pub mod shared;
pub mod store;
pub mod value;

pub use key::{split_key, KeyParts};
pub use loader::{FileLoader, Loader, MemoryLoader, SourceFormat};
pub use shared::SharedStore;
pub use store::NamespaceStore;
pub use value::{Document, Store};

pub use dotconf_common::{DotConfError, ErrorKind, Result};
pub use serde_json::Value;
