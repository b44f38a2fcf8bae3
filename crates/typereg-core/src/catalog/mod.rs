//! Type catalogs: TOML files listing the definitions to bootstrap a registry with.
//!
//! ```toml
//! [[type]]
//! identifier = "net.nodebox.node.vector.Rect"
//! version = "1.0"
//! description = "A rectangle"
//! category = "vector"
//! ```

pub mod parser;
pub mod paths;

pub use parser::{parse_catalog, parse_catalog_str, to_toml};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::registry::TypeRegistry;
use crate::types::TypeDefinition;
use crate::version::Version;

/// Root structure of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Declared type definitions
    #[serde(default, rename = "type")]
    pub types: Vec<CatalogType>,
}

/// One type definition as declared in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogType {
    pub identifier: String,

    pub version: Version,

    /// Display name; defaults to the last identifier segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogType {
    pub fn new(identifier: impl Into<String>, version: Version) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            name: None,
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| {
            self.identifier
                .rsplit('.')
                .next()
                .unwrap_or(&self.identifier)
        })
    }
}

impl TypeDefinition for CatalogType {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in node types, written by `typereg init`.
    pub fn starter() -> Self {
        let builtin = |identifier: &str, category: &str, description: &str| {
            CatalogType::new(identifier, Version::new(1, 0))
                .with_description(description)
                .with_category(category)
        };

        Self {
            types: vec![
                builtin(
                    "net.nodebox.node.canvas.CanvasNetwork",
                    "canvas",
                    "Network that renders to a canvas",
                ),
                builtin(
                    "net.nodebox.node.image.ImageNetwork",
                    "image",
                    "Network that produces an image",
                ),
                builtin("net.nodebox.node.vector.Copy", "vector", "Copies a shape"),
                builtin("net.nodebox.node.vector.Ellipse", "vector", "Creates an ellipse"),
                builtin("net.nodebox.node.vector.Rect", "vector", "Creates a rectangle"),
                builtin(
                    "net.nodebox.node.vector.Transform",
                    "vector",
                    "Moves, rotates and scales a shape",
                ),
                builtin(
                    "net.nodebox.node.vector.VectorNetwork",
                    "vector",
                    "Network that produces vector shapes",
                ),
            ],
        }
    }

    /// Validate the catalog.
    ///
    /// Identifiers must be non-empty and free of whitespace, and each
    /// (identifier, version) pair may appear only once.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for (index, ty) in self.types.iter().enumerate() {
            if ty.identifier.trim().is_empty() {
                anyhow::bail!("type #{} has an empty identifier", index + 1);
            }
            if ty.identifier.chars().any(char::is_whitespace) {
                anyhow::bail!(
                    "type #{} identifier '{}' contains whitespace",
                    index + 1,
                    ty.identifier
                );
            }
            if !seen.insert((ty.identifier.as_str(), ty.version)) {
                anyhow::bail!(
                    "type '{}' version {} is declared more than once",
                    ty.identifier,
                    ty.version
                );
            }
        }
        Ok(())
    }

    /// Build a registry holding every declared type.
    pub fn into_registry(self) -> anyhow::Result<TypeRegistry<CatalogType>> {
        let mut registry = TypeRegistry::new();
        for ty in self.types {
            let label = format!("{}@{}", ty.identifier, ty.version);
            registry
                .register(Arc::new(ty))
                .with_context(|| format!("Failed to register {label}"))?;
        }
        tracing::info!(
            identifiers = registry.len(),
            definitions = registry.definition_count(),
            "loaded type catalog"
        );
        Ok(registry)
    }
}
