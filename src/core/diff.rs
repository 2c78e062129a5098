//! Branch diffing by commit subject
//!
//! Membership on the target branch is tested by subject, not hash: rebases and
//! cherry-picks rewrite hashes but keep titles, so a subject match is the only
//! signal that survives the branch topology this tool exists for. The flip side
//! is documented behavior, not a bug: two independently-authored commits that
//! share a subject are indistinguishable here, and the second one is treated as
//! already present (an accepted false negative).

use crate::core::error::FerryResult;
use crate::core::vcs::{Commit, SystemGit};
use std::collections::{HashMap, HashSet};

/// Subjects of all non-merge commits on a branch
pub fn subjects_of(git: &SystemGit, branch: &str) -> FerryResult<HashSet<String>> {
  let stdout = git.run(&["log", "--no-merges", "--pretty=%s", branch])?;

  Ok(stdout.lines().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
}

/// Non-merge commits on a branch within the log window, newest first
pub fn commits_of(git: &SystemGit, branch: &str, since: &str) -> FerryResult<Vec<Commit>> {
  let since_arg = format!("--since={}", since);
  let stdout = git.run(&["log", "--no-merges", &since_arg, "--pretty=%H %s", branch])?;

  let commits = stdout
    .lines()
    .filter_map(|line| {
      let line = line.trim();
      if line.is_empty() {
        return None;
      }
      let (hash, subject) = line.split_once(' ').unwrap_or((line, ""));
      Some(Commit {
        hash: hash.to_string(),
        subject: subject.to_string(),
      })
    })
    .collect();

  Ok(commits)
}

/// Commits present on the source branch but absent (by subject) from the target
///
/// Holds the newest-first missing list plus an index map so an arbitrarily
/// ordered selection can be put back into apply (oldest-first) order.
#[derive(Debug, Clone)]
pub struct BranchDiff {
  /// Missing commits, newest first as returned by the log traversal
  pub commits: Vec<Commit>,
  /// hash -> position in `commits`
  index: HashMap<String, usize>,
}

impl BranchDiff {
  /// Filter source commits down to those whose subject is not on the target
  pub fn missing(source_commits: Vec<Commit>, target_subjects: &HashSet<String>) -> Self {
    let commits: Vec<Commit> = source_commits
      .into_iter()
      .filter(|c| !target_subjects.contains(&c.subject))
      .collect();

    let index = commits
      .iter()
      .enumerate()
      .map(|(i, c)| (c.hash.clone(), i))
      .collect();

    Self { commits, index }
  }

  pub fn is_empty(&self) -> bool {
    self.commits.is_empty()
  }

  pub fn len(&self) -> usize {
    self.commits.len()
  }

  /// All missing hashes, newest first
  pub fn all_hashes(&self) -> Vec<String> {
    self.commits.iter().map(|c| c.hash.clone()).collect()
  }

  /// Look up a commit by hash
  pub fn get(&self, hash: &str) -> Option<&Commit> {
    self.index.get(hash).map(|&i| &self.commits[i])
  }

  /// Reorder a selection into apply order (oldest first)
  ///
  /// Stable sort by descending original index: the log is newest-first, so the
  /// highest index is the oldest commit. Applying this twice is idempotent.
  /// Hashes not in the diff are dropped.
  pub fn ordered_for_apply(&self, selection: &[String]) -> Vec<String> {
    let mut picked: Vec<(usize, String)> = selection
      .iter()
      .filter_map(|h| self.index.get(h).map(|&i| (i, h.clone())))
      .collect();

    picked.sort_by(|a, b| b.0.cmp(&a.0));
    picked.into_iter().map(|(_, h)| h).collect()
  }
}
