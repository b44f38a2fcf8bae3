//! Versioned type registry.
//!
//! Maps an identifier to the family of definitions registered under it and
//! answers latest, exact and specifier-matching queries against that family.
//! Registration normally happens once during bootstrap; the registry is
//! append-only afterwards.

pub mod family;
pub mod shared;

pub use family::VersionFamily;
pub use shared::SharedTypeRegistry;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::types::{TypeDefinition, VersionSelector};
use crate::version::{Version, VersionSpecifier};

/// Registry of versioned type definitions keyed by identifier.
#[derive(Debug)]
pub struct TypeRegistry<T: ?Sized = dyn TypeDefinition> {
    families: HashMap<String, VersionFamily<T>>,
}

impl<T: ?Sized> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self {
            families: HashMap::new(),
        }
    }
}

impl<T: ?Sized> Clone for TypeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            families: self.families.clone(),
        }
    }
}

impl<T: TypeDefinition + ?Sized> TypeRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its identifier.
    ///
    /// The family is created on first use. Registering a second definition
    /// with the same identifier and version fails with
    /// [`RegistryError::DuplicateVersion`] and leaves the registry unchanged.
    pub fn register(&mut self, definition: Arc<T>) -> Result<(), RegistryError> {
        let identifier = definition.identifier().to_string();
        let version = definition.version();

        let family = self.families.entry(identifier.clone()).or_default();
        if let Err(err) = family.insert(definition) {
            tracing::warn!(%identifier, %version, "rejected duplicate type registration");
            return Err(err);
        }

        tracing::debug!(
            %identifier,
            %version,
            family_size = family.len(),
            "registered type"
        );
        Ok(())
    }

    /// Register every definition, stopping at the first failure.
    pub fn register_all<I>(&mut self, definitions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Newest definition registered under `identifier`.
    pub fn latest(&self, identifier: &str) -> Result<Arc<T>, RegistryError> {
        self.family_or_not_found(identifier)?
            .latest()
            .cloned()
            .ok_or_else(|| RegistryError::not_found(identifier))
    }

    /// The definition registered with exactly `version`.
    pub fn exact(&self, identifier: &str, version: Version) -> Result<Arc<T>, RegistryError> {
        self.family_or_not_found(identifier)?
            .find_exact(version)
            .cloned()
            .ok_or_else(|| {
                tracing::trace!(identifier, %version, "no exact version match");
                RegistryError::not_found_for(identifier, version)
            })
    }

    /// Newest definition whose version satisfies `specifier`.
    pub fn matching(
        &self,
        identifier: &str,
        specifier: &VersionSpecifier,
    ) -> Result<Arc<T>, RegistryError> {
        self.family_or_not_found(identifier)?
            .find_matching(specifier)
            .cloned()
            .ok_or_else(|| {
                tracing::trace!(identifier, %specifier, "no version satisfies specifier");
                RegistryError::not_found_for(identifier, specifier)
            })
    }

    /// Resolve through a [`VersionSelector`].
    pub fn resolve(
        &self,
        identifier: &str,
        selector: &VersionSelector,
    ) -> Result<Arc<T>, RegistryError> {
        self.family_or_not_found(identifier)?
            .find(selector)
            .cloned()
            .ok_or_else(|| {
                tracing::trace!(identifier, %selector, "no version satisfies selector");
                match selector {
                    VersionSelector::Latest => RegistryError::not_found(identifier),
                    _ => RegistryError::not_found_for(identifier, selector),
                }
            })
    }

    /// The newest definition of every identifier, one entry per identifier.
    ///
    /// Sorted by identifier for stable output; callers should not rely on it.
    pub fn latest_per_identifier(&self) -> Vec<Arc<T>> {
        let mut latest: Vec<Arc<T>> = self
            .families
            .values()
            .filter_map(|family| family.latest().cloned())
            .collect();
        latest.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        latest
    }

    pub fn family(&self, identifier: &str) -> Option<&VersionFamily<T>> {
        self.families.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.families.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.families.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Number of definitions across all families.
    pub fn definition_count(&self) -> usize {
        self.families.values().map(VersionFamily::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    fn family_or_not_found(&self, identifier: &str) -> Result<&VersionFamily<T>, RegistryError> {
        self.families.get(identifier).ok_or_else(|| {
            tracing::trace!(identifier, "unknown type identifier");
            RegistryError::not_found(identifier)
        })
    }
}
