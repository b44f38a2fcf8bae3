//! Version values and version specifiers.

pub mod specifier;

pub use specifier::{Comparator, VersionSpecifier};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// A `(major, minor)` type version.
///
/// Ordered by major first, then minor. There is no patch or build component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Returns true if `self` sorts strictly before `other`.
    pub fn is_older_than(&self, other: &Version) -> bool {
        self < other
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components(s.trim()).map_err(|reason| RegistryError::InvalidVersion {
            text: s.to_string(),
            reason,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Parse `<digits>.<digits>`, returning a human-readable reason on failure.
pub(crate) fn parse_components(text: &str) -> Result<Version, String> {
    if text.is_empty() {
        return Err("missing version".to_string());
    }

    let (major, minor) = text
        .split_once('.')
        .ok_or_else(|| "expected <major>.<minor>".to_string())?;

    Ok(Version::new(
        parse_number(major, "major")?,
        parse_number(minor, "minor")?,
    ))
}

fn parse_number(part: &str, label: &str) -> Result<u32, String> {
    if part.is_empty() {
        return Err(format!("missing {label} component"));
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{label} component '{part}' is not a non-negative integer"));
    }
    part.parse::<u32>()
        .map_err(|_| format!("{label} component '{part}' is out of range"))
}
