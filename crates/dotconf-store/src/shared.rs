//! Thread-safe wrapper around [`NamespaceStore`].

use crate::key::split_key;
use crate::loader::Loader;
use crate::store::NamespaceStore;
use crate::value::Store;
use dotconf_common::{DotConfError, Result};
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

/// Thread-safe namespace store.
///
/// Provides shared access to one [`NamespaceStore`] across threads using
/// `Arc<RwLock<_>>`. Reads of namespaces that are already cached only take
/// the read lock. Loading and mutation take the write lock, and the cache is
/// checked again once it is held, so concurrent first reads of a namespace
/// still load it once.
#[derive(Debug)]
pub struct SharedStore<L> {
    inner: Arc<RwLock<NamespaceStore<L>>>,
}

impl<L> Clone for SharedStore<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Loader> SharedStore<L> {
    /// Share `store` between threads.
    pub fn new(store: NamespaceStore<L>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Create a shared, empty store backed by `loader`.
    pub fn with_loader(loader: L) -> Self {
        Self::new(NamespaceStore::new(loader))
    }

    /// See [`NamespaceStore::get`].
    pub fn get(&self, key: &str, fallback: Value) -> Result<Value> {
        let fallback = match self.read()?.get_cached(key, fallback) {
            Ok(value) => return Ok(value),
            Err(fallback) => fallback,
        };
        trace!(key, "namespace not cached, taking write lock");
        self.write()?.get(key, fallback)
    }

    /// See [`NamespaceStore::exists`].
    pub fn exists(&self, key: &str) -> Result<bool> {
        if let Some(found) = self.read()?.exists_cached(key) {
            return Ok(found);
        }
        self.write()?.exists(key)
    }

    /// See [`NamespaceStore::set`].
    pub fn set(&self, key: &str, value: Value) -> Result<bool> {
        self.write()?.set(key, value)
    }

    /// See [`NamespaceStore::delete`].
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.write()?.delete(key)
    }

    /// See [`NamespaceStore::preload`].
    pub fn preload<I, S>(&self, namespaces: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write()?.preload(namespaces)
    }

    /// Whether the namespace of `key` has been loaded.
    pub fn is_loaded(&self, key: &str) -> Result<bool> {
        Ok(self.read()?.is_loaded(split_key(key).namespace))
    }

    /// A copy of every namespace loaded so far. Never triggers a load.
    pub fn snapshot(&self) -> Result<Store> {
        Ok(self.read()?.get_all().clone())
    }

    /// Execute a closure with read-only access to the underlying store.
    ///
    /// Keep the closure short; writers are blocked while it runs.
    pub fn with_store<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&NamespaceStore<L>) -> R,
    {
        Ok(f(&*self.read()?))
    }

    /// Execute a closure with exclusive access to the underlying store.
    ///
    /// Lets several operations run without another thread interleaving.
    pub fn with_store_mut<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut NamespaceStore<L>) -> R,
    {
        Ok(f(&mut *self.write()?))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, NamespaceStore<L>>> {
        self.inner.read().map_err(|_| DotConfError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, NamespaceStore<L>>> {
        self.inner.write().map_err(|_| DotConfError::LockPoisoned)
    }
}

impl<L: Loader> From<NamespaceStore<L>> for SharedStore<L> {
    fn from(store: NamespaceStore<L>) -> Self {
        Self::new(store)
    }
}
