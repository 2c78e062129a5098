//! Integration tests for `git-ferry plan`

use crate::helpers::{GitFixture, run_ferry};
use anyhow::Result;

#[test]
fn test_plan_lists_missing_commits() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.commit_file("a.txt", "a\n", "feat: add a")?;
  fx.commit_file("b.txt", "b\n", "fix: repair b")?;
  fx.checkout("main")?;

  let output = run_ferry(&fx.path, &["plan", "-s", "develop", "-t", "main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("2 commit(s)"), "got: {}", stdout);
  assert!(stdout.contains("feat: add a"));
  assert!(stdout.contains("fix: repair b"));
  assert!(!stdout.contains("chore: seed"), "shared commit must not be listed");

  Ok(())
}

#[test]
fn test_plan_dedupes_by_subject_not_hash() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.commit_file("a.txt", "a\n", "feat: add a")?;
  fx.checkout("main")?;
  // Same subject, different hash: counts as already present
  fx.commit_file("other.txt", "other\n", "feat: add a")?;

  let output = run_ferry(&fx.path, &["plan", "-s", "develop", "-t", "main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("has everything"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_plan_json_output_parses() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  let hash = fx.commit_file("a.txt", "a\n", "feat: add a")?;
  fx.checkout("main")?;

  let output = run_ferry(&fx.path, &["plan", "-s", "develop", "-t", "main", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let commits: Vec<serde_json::Value> = serde_json::from_str(&stdout)?;
  assert_eq!(commits.len(), 1);
  assert_eq!(commits[0]["hash"], hash);
  assert_eq!(commits[0]["subject"], "feat: add a");

  Ok(())
}

#[test]
fn test_plan_respects_since_window() -> Result<()> {
  let fx = GitFixture::new()?;
  fx.branch("develop")?;
  fx.commit_file("a.txt", "a\n", "feat: add a")?;
  fx.checkout("main")?;

  // A window in the future excludes everything
  let output = run_ferry(
    &fx.path,
    &["plan", "-s", "develop", "-t", "main", "--since", "tomorrow"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("has everything"), "got: {}", stdout);

  Ok(())
}
