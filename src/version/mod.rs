//! Version extraction from tag references.
//!
//! The release identity is the pushed tag with its `refs/tags/` prefix
//! removed. Nothing else is normalized: a leading `v` stays, malformed tags
//! pass through untouched, and a reference without the prefix is returned
//! as-is.

mod output;

pub use output::StepOutput;

use std::fmt;

/// Prefix stripped from tag references
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Version identifier derived from a tag reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Wrap an already-extracted version string
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Borrow the version string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the version is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse as semver, tolerating a leading `v`.
    ///
    /// Informational only: callers log a warning on `None`, they never reject.
    pub fn semver(&self) -> Option<semver::Version> {
        let raw = self.0.strip_prefix('v').unwrap_or(&self.0);
        semver::Version::parse(raw).ok()
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip `refs/tags/` from a tag reference.
///
/// Never fails. Input without the prefix is returned unchanged.
pub fn extract_version(tag_ref: &str) -> ReleaseVersion {
    let version = tag_ref.strip_prefix(TAG_REF_PREFIX).unwrap_or(tag_ref);
    ReleaseVersion(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tag_prefix() {
        assert_eq!(extract_version("refs/tags/v1.2.3").as_str(), "v1.2.3");
        assert_eq!(extract_version("refs/tags/v0.1.0-rc.1").as_str(), "v0.1.0-rc.1");
    }

    #[test]
    fn passes_through_unprefixed_input() {
        assert_eq!(extract_version("v1.2.3").as_str(), "v1.2.3");
        assert_eq!(extract_version("refs/heads/main").as_str(), "refs/heads/main");
        assert_eq!(extract_version("").as_str(), "");
    }

    #[test]
    fn strips_prefix_only_once() {
        assert_eq!(
            extract_version("refs/tags/refs/tags/v1").as_str(),
            "refs/tags/v1"
        );
    }

    #[test]
    fn bare_prefix_yields_empty_version() {
        assert!(extract_version("refs/tags/").is_empty());
    }

    #[test]
    fn semver_is_informational() {
        assert_eq!(
            extract_version("refs/tags/v1.2.3").semver(),
            Some(semver::Version::new(1, 2, 3))
        );
        assert_eq!(extract_version("refs/tags/nightly").semver(), None);
    }
}
