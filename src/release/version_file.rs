//! Version artifact: read and rewrite the version field of a TOML file
//!
//! Works against `Cargo.toml` (`package.version`) or any TOML document with a
//! top-level `version` key. Rewrites are lossless: every other field, comment
//! and piece of formatting survives the edit.

use crate::core::error::{FerryError, FerryResult, ResultExt};
use crate::release::version::parse_version;
use std::path::Path;
use toml_edit::DocumentMut;

/// Read the current version from a version file
pub fn read_version(path: &Path) -> FerryResult<semver::Version> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read version file: {}", path.display()))?;

  let doc: DocumentMut = content.parse()?;

  let text = version_item(&doc).ok_or_else(|| {
    FerryError::with_help(
      format!("No version field in {}", path.display()),
      "The version file needs either [package] version or a top-level version key.",
    )
  })?;

  parse_version(text)
}

/// Rewrite the version field in place, preserving all other fields
pub fn write_version(path: &Path, version: &semver::Version) -> FerryResult<()> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read version file: {}", path.display()))?;

  let mut doc: DocumentMut = content.parse()?;

  if let Some(package) = doc.get_mut("package").and_then(|p| p.as_table_mut()) {
    package["version"] = toml_edit::value(version.to_string());
  } else if doc.get("version").is_some() {
    doc["version"] = toml_edit::value(version.to_string());
  } else {
    return Err(FerryError::message(format!(
      "No version field in {}",
      path.display()
    )));
  }

  std::fs::write(path, doc.to_string())
    .with_context(|| format!("Failed to write version file: {}", path.display()))?;

  Ok(())
}

fn version_item(doc: &DocumentMut) -> Option<&str> {
  doc
    .get("package")
    .and_then(|p| p.get("version"))
    .or_else(|| doc.get("version"))
    .and_then(|v| v.as_str())
}
