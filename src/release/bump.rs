//! Conventional-commit classification for version bumping
//!
//! Priority order, first match wins: breaking marker > feat > fix/perf > none.
//! Only priority matters, never frequency: a message with three `fix:` lines
//! and one `feat:` line is still a minor bump.

use crate::core::error::FerryResult;
use crate::core::vcs::SystemGit;
use crate::release::version::VersionBump;
use regex::Regex;
use std::sync::LazyLock;

// Breaking marker anywhere in the body: optional (scope), optional trailing colon
static BREAKING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)breaking[ -]change(\([^)]*\))?:?").unwrap());

// feat at line start, optionally bulleted, optional (scope), optional colon.
// The word boundary keeps lines like "feature flags" from matching.
static FEAT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?im)^\s*(?:[-*]\s*)?feat\b(\([^)]*\))?!?:?").unwrap());

static FIX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?im)^\s*(?:[-*]\s*)?(?:fix|perf)\b(\([^)]*\))?!?:?").unwrap());

/// Classify a full commit message into a bump level
///
/// CRLF line endings are normalized to LF before matching; no other transform.
pub fn classify(message: &str) -> VersionBump {
  let normalized = message.replace("\r\n", "\n");

  if BREAKING.is_match(&normalized) {
    VersionBump::Major
  } else if FEAT.is_match(&normalized) {
    VersionBump::Minor
  } else if FIX.is_match(&normalized) {
    VersionBump::Patch
  } else {
    VersionBump::None
  }
}

/// Collapse per-commit levels into the single highest-priority level
pub fn collapse(levels: impl IntoIterator<Item = VersionBump>) -> VersionBump {
  levels.into_iter().max().unwrap_or(VersionBump::None)
}

/// Highest bump across messages, stopping the scan once Major is observed
///
/// Major is the maximum priority, so later messages cannot change the result;
/// the scan stops there rather than classifying the rest.
pub fn highest_bump<I, S>(messages: I) -> VersionBump
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut highest = VersionBump::None;
  for message in messages {
    highest = highest.max(classify(message.as_ref()));
    if highest == VersionBump::Major {
      break;
    }
  }
  highest
}

/// Compute the bump for an ordered list of commit hashes
///
/// Fetches each full message through the adapter; inherits the Major
/// short-circuit from `highest_bump`.
pub fn compute_bump(git: &SystemGit, hashes: &[String]) -> FerryResult<VersionBump> {
  let mut highest = VersionBump::None;
  for hash in hashes {
    let message = git.run(&["show", "--format=%B", "-s", hash])?;
    highest = highest.max(classify(&message));
    if highest == VersionBump::Major {
      break;
    }
  }
  Ok(highest)
}
