//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test repository with diverged source/target branches
pub struct GitFixture {
  _root: TempDir,
  pub path: PathBuf,
}

impl GitFixture {
  /// Create a repo on `main` with a seed commit and a version file
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      "[package]\nname = \"fixture\"\nversion = \"1.2.0\"\nedition = \"2024\"\n",
    )?;
    std::fs::write(path.join("README.md"), "# fixture\n")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "chore: seed"])?;

    Ok(Self { _root: root, path })
  }

  /// Create and switch to a branch
  pub fn branch(&self, name: &str) -> Result<()> {
    git(&self.path, &["checkout", "-b", name])?;
    Ok(())
  }

  pub fn checkout(&self, name: &str) -> Result<()> {
    git(&self.path, &["checkout", name])?;
    Ok(())
  }

  /// Write a file and commit everything with the given message
  pub fn commit_file(&self, file: &str, content: &str, message: &str) -> Result<String> {
    std::fs::write(self.path.join(file), content)?;
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Subjects on a branch, newest first
  pub fn subjects(&self, branch: &str) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", "--pretty=%s", branch])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  pub fn branch_exists(&self, name: &str) -> bool {
    Command::new("git")
      .current_dir(&self.path)
      .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{}", name)])
      .status()
      .map(|s| s.success())
      .unwrap_or(false)
  }

  pub fn read_file(&self, file: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(file)).with_context(|| format!("reading {}", file))
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run git-ferry, failing the test on non-zero exit
pub fn run_ferry(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_ferry_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "git-ferry command failed: git-ferry {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run git-ferry without asserting on the exit status
pub fn run_ferry_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let ferry_bin = env!("CARGO_BIN_EXE_git-ferry");

  Command::new(ferry_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git-ferry")
}
