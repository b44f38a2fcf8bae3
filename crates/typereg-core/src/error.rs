//! Registry error model.

use thiserror::Error;

use crate::version::Version;

/// Errors raised by registry queries and by version/specifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The identifier is unknown, or no registered version satisfies the request.
    #[error("cannot find type '{identifier}'{}", requested_suffix(.requested))]
    NotFound {
        identifier: String,
        /// The requested version or specifier, if the query carried one.
        requested: Option<String>,
    },

    /// Specifier text does not follow `[=|>=]<major>.<minor>`.
    #[error("invalid version specifier '{text}': {reason}")]
    InvalidSpecifier { text: String, reason: String },

    /// Version text does not follow `<major>.<minor>`.
    #[error("invalid version '{text}': {reason}")]
    InvalidVersion { text: String, reason: String },

    /// A definition with the same identifier and version is already registered.
    #[error("type '{identifier}' version {version} is already registered")]
    DuplicateVersion { identifier: String, version: Version },
}

fn requested_suffix(requested: &Option<String>) -> String {
    requested
        .as_ref()
        .map(|r| format!(" matching '{r}'"))
        .unwrap_or_default()
}

impl RegistryError {
    pub(crate) fn not_found(identifier: &str) -> Self {
        Self::NotFound {
            identifier: identifier.to_string(),
            requested: None,
        }
    }

    pub(crate) fn not_found_for(identifier: &str, requested: impl ToString) -> Self {
        Self::NotFound {
            identifier: identifier.to_string(),
            requested: Some(requested.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid_specifier(&self) -> bool {
        matches!(self, Self::InvalidSpecifier { .. })
    }
}
