//! Version family: every registered definition sharing one identifier.

use std::sync::Arc;

use crate::error::RegistryError;
use crate::types::{TypeDefinition, VersionSelector};
use crate::version::{Version, VersionSpecifier};

/// Definitions with the same identifier, ordered newest version first.
#[derive(Debug)]
pub struct VersionFamily<T: ?Sized> {
    entries: Vec<Arc<T>>,
}

impl<T: ?Sized> Default for VersionFamily<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> Clone for VersionFamily<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T: TypeDefinition + ?Sized> VersionFamily<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping the newest-first order.
    ///
    /// The new entry goes immediately before the first entry with a smaller
    /// version, or at the end if there is none. An entry with an equal version
    /// is rejected.
    pub fn insert(&mut self, definition: Arc<T>) -> Result<(), RegistryError> {
        let version = definition.version();

        if self.entries.iter().any(|d| d.version() == version) {
            return Err(RegistryError::DuplicateVersion {
                identifier: definition.identifier().to_string(),
                version,
            });
        }

        let index = self
            .entries
            .iter()
            .position(|d| d.version().is_older_than(&version))
            .unwrap_or(self.entries.len());
        self.entries.insert(index, definition);
        Ok(())
    }

    pub fn latest(&self) -> Option<&Arc<T>> {
        self.entries.first()
    }

    pub fn find_exact(&self, version: Version) -> Option<&Arc<T>> {
        self.entries.iter().find(|d| d.version() == version)
    }

    /// Newest entry satisfying `specifier`.
    pub fn find_matching(&self, specifier: &VersionSpecifier) -> Option<&Arc<T>> {
        self.entries.iter().find(|d| specifier.matches(d.version()))
    }

    pub fn find(&self, selector: &VersionSelector) -> Option<&Arc<T>> {
        self.entries.iter().find(|d| selector.accepts(d.version()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter()
    }

    /// Versions in stored (newest-first) order.
    pub fn versions(&self) -> Vec<Version> {
        self.entries.iter().map(|d| d.version()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
