//! Strict version parsing and bump application

use crate::core::error::{FerryError, FerryResult};
use serde::{Deserialize, Serialize};

/// Version bump level derived from conventional commits
///
/// Totally ordered: Major > Minor > Patch > None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
  /// Major version bump (breaking changes)
  Major,
  /// Minor version bump (new features)
  Minor,
  /// Patch version bump (bug fixes, performance)
  Patch,
  /// No bump (no classifiable changes)
  None,
}

impl VersionBump {
  /// Priority for collapsing multiple classifications
  pub fn priority(self) -> u8 {
    match self {
      VersionBump::Major => 3,
      VersionBump::Minor => 2,
      VersionBump::Patch => 1,
      VersionBump::None => 0,
    }
  }

  /// Apply bump to a semver version
  pub fn apply(self, version: &semver::Version) -> semver::Version {
    match self {
      VersionBump::Major => semver::Version::new(version.major + 1, 0, 0),
      VersionBump::Minor => semver::Version::new(version.major, version.minor + 1, 0),
      VersionBump::Patch => semver::Version::new(version.major, version.minor, version.patch + 1),
      VersionBump::None => version.clone(),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      VersionBump::Major => "major",
      VersionBump::Minor => "minor",
      VersionBump::Patch => "patch",
      VersionBump::None => "none",
    }
  }
}

impl PartialOrd for VersionBump {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for VersionBump {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.priority().cmp(&other.priority())
  }
}

/// Parse a version that is exactly three dot-separated non-negative integers
///
/// Stricter than full semver: pre-release and build suffixes are rejected,
/// because the version file only ever carries plain `X.Y.Z` strings.
pub fn parse_version(text: &str) -> FerryResult<semver::Version> {
  let invalid = || FerryError::InvalidVersion { input: text.to_string() };

  let version = semver::Version::parse(text.trim()).map_err(|_| invalid())?;
  if !version.pre.is_empty() || !version.build.is_empty() {
    return Err(invalid());
  }

  Ok(version)
}
