//! System git adapter - the single subprocess choke point
//!
//! Every git invocation in the program goes through [`SystemGit::run`] (captured
//! output) or [`SystemGit::run_interactive`] (inherited stdio, for the external
//! editor and merge tool). No other module spawns a process.
//!
//! Commands run with an isolated environment so global config cannot change
//! behavior mid-release.

use crate::core::error::{FerryResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
#[derive(Debug)]
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Performs one subprocess call to verify the path is inside a work tree.
  pub fn open(path: &Path) -> FerryResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      return Err(
        GitError::RepoNotFound {
          path: path.to_path_buf(),
        }
        .into(),
      );
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Run a git subcommand, returning trimmed stdout
  ///
  /// Non-zero exit becomes `GitError::CommandFailed` carrying captured stderr.
  pub fn run(&self, args: &[&str]) -> FerryResult<String> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.first().unwrap_or(&"")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(
        GitError::CommandFailed {
          command: format!("git {}", args.join(" ")),
          stderr: stderr.trim().to_string(),
        }
        .into(),
      );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Run a git subcommand with inherited stdio
  ///
  /// Used only for commands that need the operator's terminal (mergetool).
  /// Keeps the full environment so editors and pagers behave normally.
  pub fn run_interactive(&self, args: &[&str]) -> FerryResult<()> {
    let status = Command::new("git")
      .arg("-C")
      .arg(&self.repo_path)
      .args(args)
      .status()
      .with_context(|| format!("Failed to execute git {}", args.first().unwrap_or(&"")))?;

    if !status.success() {
      return Err(
        GitError::CommandFailed {
          command: format!("git {}", args.join(" ")),
          stderr: format!("exited with status {}", status),
        }
        .into(),
      );
    }

    Ok(())
  }

  /// Get current branch name (`HEAD` when detached)
  pub fn current_branch(&self) -> FerryResult<String> {
    match self.run(&["rev-parse", "--abbrev-ref", "HEAD"]) {
      Ok(branch) => Ok(branch),
      Err(_) => Ok("HEAD".to_string()),
    }
  }

  /// Check whether a local branch exists
  pub fn branch_exists(&self, name: &str) -> bool {
    self
      .run(&["show-ref", "--verify", "--quiet", &format!("refs/heads/{}", name)])
      .is_ok()
  }

  /// Working directory this adapter was opened on
  pub fn path(&self) -> &Path {
    &self.repo_path
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables, whitelists PATH and HOME
  /// - Adds safe configuration overrides
  /// - GIT_EDITOR=true keeps `cherry-pick --continue` from blocking on an editor
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }
    cmd.env("GIT_EDITOR", "true");

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
