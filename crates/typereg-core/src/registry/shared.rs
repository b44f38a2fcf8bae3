//! Thread-safe registry handle for registration after startup.
//!
//! Queries take the read lock and may run concurrently with each other;
//! `register` takes the write lock, so no query observes a half-inserted family.

use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

use super::TypeRegistry;
use crate::error::RegistryError;
use crate::types::{TypeDefinition, VersionSelector};
use crate::version::{Version, VersionSpecifier};

/// Cloneable, lock-protected handle to a [`TypeRegistry`].
#[derive(Debug)]
pub struct SharedTypeRegistry<T: ?Sized = dyn TypeDefinition> {
    inner: Arc<RwLock<TypeRegistry<T>>>,
}

impl<T: ?Sized> Clone for SharedTypeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> Default for SharedTypeRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TypeRegistry::default())),
        }
    }
}

impl<T: ?Sized> From<TypeRegistry<T>> for SharedTypeRegistry<T> {
    fn from(registry: TypeRegistry<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }
}

impl<T: TypeDefinition + ?Sized> SharedTypeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, definition: Arc<T>) -> Result<(), RegistryError> {
        self.inner.write().register(definition)
    }

    pub fn latest(&self, identifier: &str) -> Result<Arc<T>, RegistryError> {
        self.inner.read().latest(identifier)
    }

    pub fn exact(&self, identifier: &str, version: Version) -> Result<Arc<T>, RegistryError> {
        self.inner.read().exact(identifier, version)
    }

    pub fn matching(
        &self,
        identifier: &str,
        specifier: &VersionSpecifier,
    ) -> Result<Arc<T>, RegistryError> {
        self.inner.read().matching(identifier, specifier)
    }

    pub fn resolve(
        &self,
        identifier: &str,
        selector: &VersionSelector,
    ) -> Result<Arc<T>, RegistryError> {
        self.inner.read().resolve(identifier, selector)
    }

    pub fn latest_per_identifier(&self) -> Vec<Arc<T>> {
        self.inner.read().latest_per_identifier()
    }

    /// Versions registered under `identifier`, newest first.
    pub fn versions(&self, identifier: &str) -> Option<Vec<Version>> {
        self.inner.read().family(identifier).map(|f| f.versions())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.read().contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for several queries against one consistent view.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry<T>> {
        self.inner.read()
    }
}
