//! Version specifiers: `=2.0`, `>=2.0`, or bare `2.0` (exact).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::{Version, parse_components};
use crate::error::RegistryError;

/// Comparison applied by a [`VersionSpecifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `=`: only this exact version.
    Exact,
    /// `>=`: this version or anything newer.
    AtLeast,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Exact => "=",
            Comparator::AtLeast => ">=",
        }
    }
}

/// A parsed constraint over [`Version`]s.
///
/// Immutable once constructed; [`matches`](Self::matches) is a pure function of
/// the specifier and the candidate version.
///
/// Equality and hashing consider only the comparator and version, so `2.0`
/// and `=2.0` are the same specifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSpecifier {
    text: String,
    comparator: Comparator,
    version: Version,
}

impl VersionSpecifier {
    /// Parse specifier text.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidSpecifier {
            text: text.to_string(),
            reason,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty specifier".to_string()));
        }

        let (comparator, rest) = split_comparator(trimmed).map_err(invalid)?;
        let version = parse_components(rest.trim_start()).map_err(invalid)?;

        Ok(Self {
            text: text.to_string(),
            comparator,
            version,
        })
    }

    /// Build a specifier without going through text.
    pub fn new(comparator: Comparator, version: Version) -> Self {
        Self {
            text: format!("{}{}", comparator.symbol(), version),
            comparator,
            version,
        }
    }

    pub fn exact(version: Version) -> Self {
        Self::new(Comparator::Exact, version)
    }

    pub fn at_least(version: Version) -> Self {
        Self::new(Comparator::AtLeast, version)
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// The text this specifier was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, candidate: Version) -> bool {
        match self.comparator {
            Comparator::Exact => candidate == self.version,
            Comparator::AtLeast => candidate >= self.version,
        }
    }

    pub fn matches_parts(&self, major: u32, minor: u32) -> bool {
        self.matches(Version::new(major, minor))
    }
}

impl PartialEq for VersionSpecifier {
    fn eq(&self, other: &Self) -> bool {
        self.comparator == other.comparator && self.version == other.version
    }
}

impl Eq for VersionSpecifier {}

impl Hash for VersionSpecifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparator.hash(state);
        self.version.hash(state);
    }
}

/// Split off a leading comparator; no prefix means exact.
fn split_comparator(text: &str) -> Result<(Comparator, &str), String> {
    if let Some(rest) = text.strip_prefix(">=") {
        return Ok((Comparator::AtLeast, rest));
    }
    if let Some(rest) = text.strip_prefix('=') {
        if rest.starts_with('=') {
            return Err("unsupported comparator '=='".to_string());
        }
        return Ok((Comparator::Exact, rest));
    }

    let op: String = text
        .chars()
        .take_while(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace() && *c != '.')
        .collect();
    if op.is_empty() {
        Ok((Comparator::Exact, text))
    } else {
        Err(format!("unsupported comparator '{op}'"))
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator.symbol(), self.version)
    }
}

impl FromStr for VersionSpecifier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionSpecifier {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionSpecifier> for String {
    fn from(specifier: VersionSpecifier) -> Self {
        specifier.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_specifier() {
        let spec = VersionSpecifier::parse("=2.0").unwrap();
        assert_eq!(spec.comparator(), Comparator::Exact);
        assert!(spec.matches(Version::new(2, 0)));
        assert!(!spec.matches(Version::new(2, 1)));
        assert!(!spec.matches(Version::new(1, 9)));
    }

    #[test]
    fn test_range_specifier() {
        let spec = VersionSpecifier::parse(">=2.0").unwrap();
        assert_eq!(spec.comparator(), Comparator::AtLeast);
        assert!(spec.matches(Version::new(2, 0)));
        assert!(!spec.matches(Version::new(1, 9)));
        assert!(spec.matches(Version::new(3, 0)));
        assert!(spec.matches_parts(2, 5));
    }

    #[test]
    fn test_bare_version_is_exact() {
        let spec = VersionSpecifier::parse("2.0").unwrap();
        assert_eq!(spec.comparator(), Comparator::Exact);
        assert!(spec.matches(Version::new(2, 0)));
        assert!(!spec.matches(Version::new(2, 1)));
        assert_eq!(spec.to_string(), "=2.0");
    }

    #[test]
    fn test_equality_ignores_source_text() {
        let bare = VersionSpecifier::parse("2.0").unwrap();
        let explicit = VersionSpecifier::parse("=2.0").unwrap();
        let spaced = VersionSpecifier::parse(" = 2.0 ").unwrap();
        assert_eq!(bare, explicit);
        assert_eq!(bare, spaced);
        assert_eq!(bare, VersionSpecifier::exact(Version::new(2, 0)));
        assert_ne!(bare, VersionSpecifier::parse(">=2.0").unwrap());

        let set: std::collections::HashSet<_> = [bare, explicit, spaced].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_whitespace_tolerated() {
        let spec = VersionSpecifier::parse("  >= 1.5 ").unwrap();
        assert_eq!(spec.version(), Version::new(1, 5));
        assert_eq!(spec.as_str(), "  >= 1.5 ");
        assert_eq!(spec.to_string(), ">=1.5");
    }

    #[test]
    fn test_unsupported_comparators_rejected() {
        for text in ["<2.0", "<=2.0", ">2.0", "~2.0", "^2.0", "!=2.0", "==2.0"] {
            let err = VersionSpecifier::parse(text).unwrap_err();
            assert!(err.is_invalid_specifier(), "{text}: {err:?}");
            assert!(err.to_string().contains("unsupported comparator"), "{text}: {err}");
        }
    }

    #[test]
    fn test_malformed_versions_rejected() {
        for text in ["", "   ", "=", ">=", "=2", ">=2.", "=a.b", "2.0.1", ">=x"] {
            let err = VersionSpecifier::parse(text).unwrap_err();
            assert!(err.is_invalid_specifier(), "{text:?}: {err:?}");
        }
    }

    #[test]
    fn test_constructors() {
        let spec = VersionSpecifier::at_least(Version::new(1, 0));
        assert_eq!(spec.as_str(), ">=1.0");
        assert!(spec.matches(Version::new(4, 2)));
        assert!(VersionSpecifier::exact(Version::new(1, 0)).matches_parts(1, 0));
    }
}
