//! The lazily loaded namespace store.

use crate::key::split_key;
use crate::loader::{FileLoader, Loader, SourceFormat};
use crate::path;
use crate::value::{into_document, type_name, Document, Store};
use dotconf_common::{DotConfError, Result};
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Namespaced configuration store with dot-notation access.
///
/// A namespace is loaded through the store's [`Loader`] the first time any key
/// inside it is touched, then cached for the lifetime of the store. Mutations
/// only change the cached copy; nothing is written back to the source.
///
/// The store is not synchronized. Wrap it in a
/// [`SharedStore`](crate::SharedStore) to use it from several threads.
#[derive(Debug)]
pub struct NamespaceStore<L = FileLoader> {
    loader: L,
    store: Store,
}

impl NamespaceStore<FileLoader> {
    /// Open a store over JSON namespace files in `directory`.
    ///
    /// Fails with a not-found error if `directory` is not an existing
    /// directory. Nothing is loaded yet.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_format(directory, SourceFormat::default())
    }

    /// Open a store over namespace files of the given format in `directory`.
    pub fn open_with_format(directory: impl Into<PathBuf>, format: SourceFormat) -> Result<Self> {
        Ok(Self::new(FileLoader::new(directory, format)?))
    }
}

impl<L: Loader> NamespaceStore<L> {
    /// Create an empty store backed by `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            store: Store::new(),
        }
    }

    /// The loader namespaces are read through.
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Read the value at `key`, or `fallback` when nothing is stored there.
    ///
    /// A key naming only a namespace returns the whole namespace document.
    pub fn get(&mut self, key: &str, fallback: Value) -> Result<Value> {
        let parts = split_key(key);
        let document = self.ensure_loaded(parts.namespace)?;
        if parts.is_whole_namespace() {
            return Ok(Value::Object(document.clone()));
        }
        Ok(path::get_or(document, parts.path, fallback))
    }

    /// Assign `value` at `key`, creating intermediate mappings as needed.
    ///
    /// A key naming only a namespace replaces the whole document, in which case
    /// `value` must be a mapping.
    pub fn set(&mut self, key: &str, value: Value) -> Result<bool> {
        let parts = split_key(key);
        let document = self.ensure_loaded(parts.namespace)?;
        if !parts.is_whole_namespace() {
            return Ok(path::set(document, parts.path, value));
        }

        let replacement = into_document(value).map_err(|other| {
            DotConfError::invalid_argument(format!(
                "Attempting to replace the data of namespace '{}', but the provided value is a {} rather than a mapping",
                parts.namespace,
                type_name(&other)
            ))
        })?;
        *document = replacement;
        Ok(true)
    }

    /// Whether a key is present at `key`. A key naming only a namespace always exists once loaded.
    pub fn exists(&mut self, key: &str) -> Result<bool> {
        let parts = split_key(key);
        let document = self.ensure_loaded(parts.namespace)?;
        Ok(parts.is_whole_namespace() || path::exists(document, parts.path))
    }

    /// Remove the key at `key`.
    ///
    /// A key naming only a namespace empties the whole document. See
    /// [`path::delete`] for the meaning of the returned flag.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let parts = split_key(key);
        let document = self.ensure_loaded(parts.namespace)?;
        if parts.is_whole_namespace() {
            document.clear();
            return Ok(true);
        }
        Ok(path::delete(document, parts.path))
    }

    /// Borrow the document of `namespace`, loading it if needed.
    pub fn document(&mut self, namespace: &str) -> Result<&Document> {
        self.ensure_loaded(namespace).map(|document| &*document)
    }

    /// Load every namespace in `namespaces` that is not cached yet.
    pub fn preload<I, S>(&mut self, namespaces: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for namespace in namespaces {
            self.ensure_loaded(namespace.as_ref())?;
        }
        Ok(())
    }

    fn ensure_loaded(&mut self, namespace: &str) -> Result<&mut Document> {
        match self.store.entry(namespace.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let document = load_document(&self.loader, namespace)?;
                Ok(entry.insert(document))
            }
        }
    }
}

impl<L> NamespaceStore<L> {
    /// Every namespace loaded so far. Never triggers a load.
    pub const fn get_all(&self) -> &Store {
        &self.store
    }

    /// Whether `namespace` has been loaded.
    pub fn is_loaded(&self, namespace: &str) -> bool {
        self.store.contains_key(namespace)
    }

    /// Names of the loaded namespaces, in sorted order.
    pub fn loaded_namespaces(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }

    /// Read `key` without loading anything.
    ///
    /// Behaves like [`get`](Self::get) when the namespace is already cached;
    /// otherwise hands `fallback` back as the error value.
    pub fn get_cached(&self, key: &str, fallback: Value) -> std::result::Result<Value, Value> {
        let parts = split_key(key);
        let Some(document) = self.store.get(parts.namespace) else {
            return Err(fallback);
        };
        if parts.is_whole_namespace() {
            return Ok(Value::Object(document.clone()));
        }
        Ok(path::get_or(document, parts.path, fallback))
    }

    /// Check `key` without loading anything; `None` when the namespace is not cached.
    pub fn exists_cached(&self, key: &str) -> Option<bool> {
        let parts = split_key(key);
        let document = self.store.get(parts.namespace)?;
        Some(parts.is_whole_namespace() || path::exists(document, parts.path))
    }

    /// Consume the store, returning every loaded namespace.
    pub fn into_inner(self) -> Store {
        self.store
    }
}

fn load_document<L: Loader>(loader: &L, namespace: &str) -> Result<Document> {
    debug!(namespace, "loading namespace");
    let value = loader.load(namespace).inspect_err(|e| {
        warn!(namespace, error = %e, "failed to load namespace");
    })?;

    let document = into_document(value).map_err(|other| {
        warn!(namespace, found = type_name(&other), "namespace source is not a mapping");
        DotConfError::invalid_format(format!(
            "Namespace '{namespace}' did not load as a mapping (got a {})",
            type_name(&other)
        ))
    })?;

    info!(namespace, keys = document.len(), "namespace loaded");
    Ok(document)
}
