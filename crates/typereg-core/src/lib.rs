//! Typereg Core Library
//!
//! A versioned type registry: maps reverse-domain identifiers to families of
//! versioned type definitions and resolves one definition by latest version,
//! exact version, or version specifier.

pub mod catalog;
pub mod error;
pub mod registry;
pub mod types;
pub mod version;

/// Re-exports of commonly used types
pub mod prelude {
    // Registry
    pub use crate::registry::{SharedTypeRegistry, TypeRegistry, VersionFamily};

    // Types
    pub use crate::types::{TypeDefinition, VersionSelector};

    // Version
    pub use crate::version::{Comparator, Version, VersionSpecifier};

    // Errors
    pub use crate::error::RegistryError;

    // Catalog
    pub use crate::catalog::{Catalog, CatalogType};
}
