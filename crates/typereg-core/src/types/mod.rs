//! Shared core types: the type-definition contract and version selectors.

use std::fmt;

use crate::error::RegistryError;
use crate::version::{Version, VersionSpecifier};

/// A pluggable type as seen by the registry.
///
/// The registry only reads the identifier and the version; everything else a
/// definition carries is opaque to it. Neither value may change once the
/// definition has been registered.
pub trait TypeDefinition: fmt::Debug + Send + Sync {
    /// Reverse-domain identifier, e.g. `net.nodebox.node.vector.Rect`.
    fn identifier(&self) -> &str;

    fn version(&self) -> Version;
}

/// How a query picks one definition out of a version family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionSelector {
    /// The newest registered version.
    #[default]
    Latest,
    /// Exactly this version.
    Exact(Version),
    /// The newest version satisfying the specifier.
    Matching(VersionSpecifier),
}

impl VersionSelector {
    /// Build a selector from optional text.
    ///
    /// - `None` selects the latest version.
    /// - A bare `X.Y` selects that exact version.
    /// - Anything with a comparator is parsed as a [`VersionSpecifier`].
    pub fn parse(text: Option<&str>) -> Result<Self, RegistryError> {
        let Some(text) = text else {
            return Ok(Self::Latest);
        };

        let trimmed = text.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            let version = trimmed
                .parse::<Version>()
                .map_err(|err| RegistryError::InvalidSpecifier {
                    text: text.to_string(),
                    reason: match err {
                        RegistryError::InvalidVersion { reason, .. } => reason,
                        other => other.to_string(),
                    },
                })?;
            return Ok(Self::Exact(version));
        }

        VersionSpecifier::parse(text).map(Self::Matching)
    }

    /// Whether `version` is acceptable to this selector.
    ///
    /// `Latest` accepts everything; the registry narrows it to the first entry.
    pub fn accepts(&self, version: Version) -> bool {
        match self {
            Self::Latest => true,
            Self::Exact(v) => *v == version,
            Self::Matching(spec) => spec.matches(version),
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Exact(v) => write!(f, "={v}"),
            Self::Matching(spec) => write!(f, "{spec}"),
        }
    }
}

impl From<Version> for VersionSelector {
    fn from(version: Version) -> Self {
        Self::Exact(version)
    }
}

impl From<VersionSpecifier> for VersionSelector {
    fn from(specifier: VersionSpecifier) -> Self {
        Self::Matching(specifier)
    }
}
