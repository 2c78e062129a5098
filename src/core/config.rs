//! Configuration for git-ferry
//!
//! Optional `ferry.toml` at the repository root. Every key has a default, so
//! the file is only needed to change them. CLI flags win over the file.

use crate::core::error::{FerryResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "ferry.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FerryConfig {
  #[serde(default)]
  pub branches: BranchConfig,
  #[serde(default)]
  pub log: LogConfig,
  #[serde(default)]
  pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
  /// Branch carrying the commits to ferry
  #[serde(default = "default_source")]
  pub source: String,
  /// Branch the release is cut from
  #[serde(default = "default_target")]
  pub target: String,
  #[serde(default = "default_remote")]
  pub remote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
  /// Window passed to `git log --since` when scanning the source branch
  #[serde(default = "default_since")]
  pub since: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Compute and apply a semantic version bump
  #[serde(default = "default_true")]
  pub semver: bool,
  /// TOML file carrying the current version
  #[serde(default = "default_version_file")]
  pub version_file: String,
  /// Where the generated changelog is written (also the PR body)
  #[serde(default = "default_changelog")]
  pub changelog: String,
  #[serde(default = "default_branch_prefix")]
  pub branch_prefix: String,
  /// Open the pull request as a draft
  #[serde(default)]
  pub draft: bool,
}

fn default_source() -> String {
  "develop".to_string()
}

fn default_target() -> String {
  "main".to_string()
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_since() -> String {
  "1 year ago".to_string()
}

fn default_version_file() -> String {
  "Cargo.toml".to_string()
}

fn default_changelog() -> String {
  "CHANGELOG.md".to_string()
}

fn default_branch_prefix() -> String {
  "release/".to_string()
}

fn default_true() -> bool {
  true
}

impl Default for BranchConfig {
  fn default() -> Self {
    Self {
      source: default_source(),
      target: default_target(),
      remote: default_remote(),
    }
  }
}

impl Default for LogConfig {
  fn default() -> Self {
    Self { since: default_since() }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      semver: true,
      version_file: default_version_file(),
      changelog: default_changelog(),
      branch_prefix: default_branch_prefix(),
      draft: false,
    }
  }
}

impl FerryConfig {
  /// Load `ferry.toml` from the repository root, or defaults when absent
  pub fn load(root: &Path) -> FerryResult<Self> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Self = toml_edit::de::from_str(&content)
      .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
  }
}
