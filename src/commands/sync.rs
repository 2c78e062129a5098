//! Sync command: the release controller
//!
//! Sequences the whole flow: fetch, diff, select, order, version, release
//! branch, cherry-pick, artifacts, push, pull request. Prerequisites are
//! checked before the first mutating git call, so a misconfigured run fails
//! with a clean working tree.

use crate::core::cherry::{CherryPicker, Prompter};
use crate::core::config::FerryConfig;
use crate::core::diff::{BranchDiff, commits_of, subjects_of};
use crate::core::error::{FerryError, FerryResult, GitError};
use crate::core::vcs::SystemGit;
use crate::release::bump::compute_bump;
use crate::release::changelog::Changelog;
use crate::release::version::VersionBump;
use crate::release::version_file;
use crate::ui::TerminalPrompter;
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Sync command parameters
pub struct SyncParams {
  pub source: Option<String>,
  pub target: Option<String>,
  pub remote: Option<String>,
  pub since: Option<String>,
  pub all: bool,
  pub dry_run: bool,
  pub no_fetch: bool,
  pub no_release: bool,
  pub no_semver: bool,
  pub no_push: bool,
  pub no_pr: bool,
  pub draft: bool,
  pub version_file: Option<String>,
  pub changelog: Option<String>,
}

/// Run the sync command with the interactive prompter
pub fn run_sync(params: SyncParams) -> FerryResult<()> {
  let mut prompter = TerminalPrompter::new();
  run_sync_with(params, &mut prompter)
}

/// Internal implementation; the prompter is injected for headless use
fn run_sync_with<P: Prompter>(params: SyncParams, prompter: &mut P) -> FerryResult<()> {
  let current_dir = env::current_dir()?;
  let config = FerryConfig::load(&current_dir)?;

  let source = params.source.unwrap_or(config.branches.source);
  let target = params.target.unwrap_or(config.branches.target);
  let remote = params.remote.unwrap_or(config.branches.remote);
  let since = params.since.unwrap_or(config.log.since);
  let version_file_name = params.version_file.unwrap_or(config.release.version_file);
  let changelog_name = params.changelog.unwrap_or(config.release.changelog);
  let draft = params.draft || config.release.draft;

  let release_mode = !params.no_release;
  let semver = config.release.semver && !params.no_semver;

  let git = SystemGit::open(&current_dir)?;

  // Preflight: fail before any mutation
  if release_mode && !semver {
    return Err(FerryError::MissingPrerequisite {
      message: "creating a release branch requires semantic versioning (drop --no-release or re-enable semver)"
        .to_string(),
    });
  }

  let version_file_path: PathBuf = git.path().join(&version_file_name);
  let current_version = if semver {
    Some(read_current_version(&version_file_path)?)
  } else {
    None
  };

  if !params.no_fetch {
    println!("📡 Fetching from '{}'...", remote);
    git.run(&["fetch", "--prune", &remote])?;
  }

  // Two independent read-only queries; everything after the join is sequential
  let (source_commits, target_subjects) = rayon::join(
    || commits_of(&git, &source, &since),
    || subjects_of(&git, &target),
  );
  let diff = BranchDiff::missing(source_commits?, &target_subjects?);

  if diff.is_empty() {
    println!("✅ Nothing to ferry: '{}' already has everything from '{}'", target, source);
    return Ok(());
  }

  println!("📋 {} commit(s) on '{}' missing from '{}'", diff.len(), source, target);

  let selection = if params.all {
    diff.all_hashes()
  } else {
    prompter.choose_commits(&diff.commits)?
  };

  if selection.is_empty() {
    return Err(FerryError::with_help(
      "No commits selected",
      "Pick at least one commit, or pass --all to ferry everything.",
    ));
  }

  let ordered = diff.ordered_for_apply(&selection);

  if params.dry_run {
    println!();
    println!("🔍 Dry-run: would apply {} commit(s) in this order:", ordered.len());
    for hash in &ordered {
      if let Some(commit) = diff.get(hash) {
        println!("  {} {}", commit.short_hash(), commit.subject);
      }
    }
    return Ok(());
  }

  let next_version = match current_version {
    Some(ref current) => {
      let bump = compute_bump(&git, &ordered)?;
      let next = bump.apply(current);
      println!("🔢 Version: {} -> {} ({})", current, next, bump.as_str());
      if bump == VersionBump::None {
        println!("   (no feat/fix/breaking commits in the selection)");
      }
      Some(next)
    }
    None => None,
  };

  let starting_branch = git.current_branch()?;

  // Preflight guarantees next_version is Some whenever release_mode is set
  let release = match (release_mode, next_version.clone()) {
    (true, Some(next)) => {
      let branch = format!("{}{}", config.release.branch_prefix, next);

      if git.branch_exists(&branch) {
        return Err(GitError::BranchExists { name: branch }.into());
      }

      println!("🌿 Creating '{}' from '{}'", branch, target);
      git.run(&["checkout", "-b", &branch, &target])?;

      let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
      let changelog = Changelog::build(&git, &next.to_string(), &date, &ordered)?;
      std::fs::write(git.path().join(&changelog_name), changelog.to_markdown())?;
      println!("📝 Wrote {}", changelog_name);

      Some((branch, next))
    }
    _ => {
      git.run(&["checkout", &target])?;
      None
    }
  };

  let stats = CherryPicker::new(&git, prompter).apply_all(&ordered)?;
  println!();
  println!("🍒 Applied {} commit(s), skipped {}", stats.applied, stats.skipped);

  match release {
    Some((branch, next)) => {
      version_file::write_version(&version_file_path, &next)?;
      println!("   Bumped {} to {}", version_file_name, next);

      git.run(&["add", "--", &version_file_name, &changelog_name])?;
      git.run(&["commit", "--no-verify", "-m", &format!("chore(release): v{}", next)])?;

      if params.no_push {
        println!("✅ Release {} prepared on '{}' (push skipped)", next, branch);
        return Ok(());
      }

      println!("🚀 Pushing '{}' to '{}'...", branch, remote);
      git.run(&["push", "-u", &remote, &branch, "--no-verify"])?;

      if !params.no_pr {
        open_pull_request(&git, &target, &branch, &next.to_string(), &changelog_name, draft)?;
      }

      println!();
      println!("✅ Release {} is ready", next);
      println!("   You are now on '{}' (was '{}')", branch, starting_branch);
    }
    None => {
      if let Some(next) = next_version {
        println!("💡 Suggested next version: {} (version file untouched)", next);
      }
      println!("✅ Ferried {} commit(s) onto '{}'", stats.applied, target);
    }
  }

  Ok(())
}

fn read_current_version(path: &PathBuf) -> FerryResult<semver::Version> {
  match version_file::read_version(path) {
    Ok(version) => Ok(version),
    Err(err @ FerryError::InvalidVersion { .. }) => Err(err),
    Err(err) => Err(FerryError::MissingPrerequisite {
      message: format!(
        "semantic versioning needs a readable version in {} ({})",
        path.display(),
        err
      ),
    }),
  }
}

/// Open a pull request through the GitHub CLI, inheriting process I/O
fn open_pull_request(
  git: &SystemGit,
  base: &str,
  head: &str,
  version: &str,
  body_file: &str,
  draft: bool,
) -> FerryResult<()> {
  let title = format!("Release v{}", version);
  let mut args: Vec<&str> = vec![
    "pr", "create", "--base", base, "--head", head, "--title", &title, "--body-file", body_file,
  ];
  if draft {
    args.push("--draft");
  }

  println!("🔀 Opening pull request '{}'...", title);
  let status = Command::new("gh")
    .current_dir(git.path())
    .args(&args)
    .status()
    .map_err(|e| {
      FerryError::with_help(
        format!("Failed to launch gh: {}", e),
        "Install the GitHub CLI (https://cli.github.com) or rerun with --no-pr.",
      )
    })?;

  if !status.success() {
    return Err(FerryError::with_help(
      format!("gh pr create exited with {}", status),
      "Check `gh auth status`, or rerun with --no-pr and open the PR manually.",
    ));
  }

  Ok(())
}
