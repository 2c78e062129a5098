//! Integration tests for `git-ferry sync`
//!
//! Everything here runs the non-interactive paths (--all, --dry-run); the
//! conflict machine is exercised headless in the unit tests of `core::cherry`.

use crate::helpers::{GitFixture, run_ferry, run_ferry_unchecked};
use anyhow::Result;

/// main + develop where develop carries one feat and one fix, both clean
fn diverged_fixture() -> Result<GitFixture> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.commit_file("feature.txt", "feature\n", "feat: add feature")?;
  fx.commit_file("bugfix.txt", "bugfix\n", "fix: repair bug")?;
  fx.checkout("main")?;
  Ok(fx)
}

#[test]
fn test_sync_dry_run_prints_apply_order_without_mutation() -> Result<()> {
  let fx = diverged_fixture()?;

  let output = run_ferry(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--dry-run"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Oldest first: the feat commit predates the fix commit
  let feat = stdout.find("feat: add feature").expect("feat line missing");
  let fix = stdout.find("fix: repair bug").expect("fix line missing");
  assert!(feat < fix, "apply order must be oldest first:\n{}", stdout);

  assert!(!fx.branch_exists("release/1.3.0"), "dry-run must not create branches");
  assert!(fx.read_file("Cargo.toml")?.contains("1.2.0"));

  Ok(())
}

#[test]
fn test_sync_full_release_flow() -> Result<()> {
  let fx = diverged_fixture()?;

  run_ferry(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-push"],
  )?;

  // feat -> minor bump from 1.2.0
  assert!(fx.branch_exists("release/1.3.0"));

  // Both commits applied on the release branch
  let subjects = fx.subjects("release/1.3.0")?;
  assert!(subjects.iter().any(|s| s == "feat: add feature"));
  assert!(subjects.iter().any(|s| s == "fix: repair bug"));
  assert_eq!(subjects[0], "chore(release): v1.3.0");

  // Artifacts written and committed
  assert!(fx.read_file("Cargo.toml")?.contains("version = \"1.3.0\""));
  let changelog = fx.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [1.3.0]"));
  assert!(changelog.contains("### Features"));
  assert!(changelog.contains("feat: add feature"));
  assert!(changelog.contains("### Fixes"));
  assert!(!changelog.contains("### Breaking Changes"));

  // Target branch untouched
  fx.checkout("main")?;
  assert!(fx.read_file("Cargo.toml")?.contains("version = \"1.2.0\""));

  Ok(())
}

#[test]
fn test_sync_noop_when_nothing_missing() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.checkout("main")?;

  let output = run_ferry(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Nothing to ferry"), "got: {}", stdout);
  assert!(!fx.branch_exists("release/1.2.0"));

  Ok(())
}

#[test]
fn test_sync_fails_when_release_branch_exists() -> Result<()> {
  let fx = diverged_fixture()?;
  fx.branch("release/1.3.0")?;
  fx.checkout("main")?;

  let output = run_ferry_unchecked(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-push"],
  )?;

  assert_eq!(output.status.code(), Some(1), "branch collision is a user error");
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("release/1.3.0"), "got: {}", stderr);
  assert!(stderr.contains("already exists"));

  Ok(())
}

#[test]
fn test_sync_requires_resolvable_version() -> Result<()> {
  let fx = GitFixture::new()?;
  // Replace the version file with one that has no version field
  fx.commit_file("Cargo.toml", "[package]\nname = \"fixture\"\n", "chore: drop version")?;
  fx.branch("develop")?;
  fx.commit_file("feature.txt", "feature\n", "feat: add feature")?;
  fx.checkout("main")?;

  let output = run_ferry_unchecked(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-push"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Missing prerequisite"), "got: {}", stderr);
  assert!(!fx.branch_exists("release/1.3.0"), "must fail before any mutation");

  Ok(())
}

#[test]
fn test_sync_release_without_semver_is_rejected() -> Result<()> {
  let fx = diverged_fixture()?;

  let output = run_ferry_unchecked(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-semver"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Missing prerequisite"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_sync_no_release_applies_onto_target() -> Result<()> {
  let fx = diverged_fixture()?;

  let output = run_ferry(
    &fx.path,
    &[
      "sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-release", "--no-semver",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Applied 2 commit(s)"), "got: {}", stdout);
  let subjects = fx.subjects("main")?;
  assert!(subjects.iter().any(|s| s == "feat: add feature"));
  assert!(subjects.iter().any(|s| s == "fix: repair bug"));
  // No release artifacts in this mode
  assert!(!fx.path.join("CHANGELOG.md").exists());
  assert!(fx.read_file("Cargo.toml")?.contains("version = \"1.2.0\""));

  Ok(())
}

#[test]
fn test_sync_breaking_change_bumps_major() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.commit_file(
    "api.txt",
    "v2\n",
    "feat: rework api\n\nBREAKING CHANGE: old endpoints removed",
  )?;
  fx.checkout("main")?;

  run_ferry(
    &fx.path,
    &["sync", "-s", "develop", "-t", "main", "--all", "--no-fetch", "--no-push"],
  )?;

  assert!(fx.branch_exists("release/2.0.0"));
  let changelog = fx.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("### Breaking Changes"));
  assert!(changelog.contains("feat: rework api"));

  Ok(())
}
