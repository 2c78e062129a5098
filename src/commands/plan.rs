//! Plan command: show what a sync would ferry, without touching anything

use crate::core::config::FerryConfig;
use crate::core::diff::{BranchDiff, commits_of, subjects_of};
use crate::core::error::FerryResult;
use crate::core::vcs::SystemGit;
use std::env;

/// Run the plan command
pub fn run_plan(
  source: Option<String>,
  target: Option<String>,
  since: Option<String>,
  json: bool,
) -> FerryResult<()> {
  let current_dir = env::current_dir()?;
  let config = FerryConfig::load(&current_dir)?;

  let source = source.unwrap_or(config.branches.source);
  let target = target.unwrap_or(config.branches.target);
  let since = since.unwrap_or(config.log.since);

  let git = SystemGit::open(&current_dir)?;

  // Two independent read-only queries
  let (source_commits, target_subjects) = rayon::join(
    || commits_of(&git, &source, &since),
    || subjects_of(&git, &target),
  );
  let diff = BranchDiff::missing(source_commits?, &target_subjects?);

  if json {
    println!("{}", serde_json::to_string_pretty(&diff.commits)?);
    return Ok(());
  }

  if diff.is_empty() {
    println!("✅ '{}' has everything from '{}' (within {})", target, source, since);
    return Ok(());
  }

  println!("📋 {} commit(s) on '{}' missing from '{}':", diff.len(), source, target);
  println!();
  for commit in &diff.commits {
    println!("  {} {}", commit.short_hash(), commit.subject);
  }
  println!();
  println!("Ferry them with: git-ferry sync");

  Ok(())
}
