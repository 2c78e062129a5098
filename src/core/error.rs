//! Error types for git-ferry with contextual messages and exit codes
//!
//! One unified error type categorizes everything that can go wrong and maps it
//! to a process exit code. Errors that have an obvious next step carry a help
//! message printed alongside them.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for git-ferry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, bad version, branch collisions)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Operator aborted the run mid-flight
  Aborted = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for git-ferry
#[derive(Debug)]
pub enum FerryError {
  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// A version string that is not plain X.Y.Z
  InvalidVersion { input: String },

  /// A release-mode requirement that failed before any mutation
  MissingPrerequisite { message: String },

  /// Operator chose to abort; the cherry-pick sequence was rolled back
  Aborted,

  /// Every selected commit was skipped, so there is nothing to release
  NothingApplied,

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl FerryError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    FerryError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    FerryError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      FerryError::Message { message, context, help } => FerryError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      FerryError::Git(GitError::BranchExists { .. }) => ExitCode::User,
      FerryError::Git(_) => ExitCode::System,
      FerryError::Io(_) => ExitCode::System,
      FerryError::InvalidVersion { .. } => ExitCode::User,
      FerryError::MissingPrerequisite { .. } => ExitCode::User,
      FerryError::Aborted => ExitCode::Aborted,
      FerryError::NothingApplied => ExitCode::Aborted,
      FerryError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      FerryError::Git(e) => e.help_message(),
      FerryError::InvalidVersion { .. } => {
        Some("Versions must be plain X.Y.Z with no pre-release or build suffix.".to_string())
      }
      FerryError::NothingApplied => {
        Some("Every selected commit was skipped. Nothing changed; rerun with a different selection.".to_string())
      }
      FerryError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for FerryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FerryError::Git(e) => write!(f, "{}", e),
      FerryError::Io(e) => write!(f, "I/O error: {}", e),
      FerryError::InvalidVersion { input } => {
        write!(f, "Invalid version format: '{}' (expected X.Y.Z)", input)
      }
      FerryError::MissingPrerequisite { message } => {
        write!(f, "Missing prerequisite: {}", message)
      }
      FerryError::Aborted => write!(f, "Aborted; the cherry-pick sequence was rolled back"),
      FerryError::NothingApplied => write!(f, "No commits were applied"),
      FerryError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for FerryError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      FerryError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<GitError> for FerryError {
  fn from(err: GitError) -> Self {
    FerryError::Git(err)
  }
}

impl From<io::Error> for FerryError {
  fn from(err: io::Error) -> Self {
    FerryError::Io(err)
  }
}

impl From<String> for FerryError {
  fn from(msg: String) -> Self {
    FerryError::message(msg)
  }
}

impl From<&str> for FerryError {
  fn from(msg: &str) -> Self {
    FerryError::message(msg)
  }
}

impl From<toml_edit::TomlError> for FerryError {
  fn from(err: toml_edit::TomlError) -> Self {
    FerryError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for FerryError {
  fn from(err: toml_edit::de::Error) -> Self {
    FerryError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for FerryError {
  fn from(err: serde_json::Error) -> Self {
    FerryError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for FerryError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    FerryError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<anyhow::Error> for FerryError {
  fn from(err: anyhow::Error) -> Self {
    FerryError::message(err.to_string())
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// The branch we want to create already exists
  BranchExists { name: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run from inside a git repository, or check the path: {}",
        path.display()
      )),
      GitError::BranchExists { name } => Some(format!(
        "Delete it with `git branch -D {}` or finish the release already in flight.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::BranchExists { name } => {
        write!(f, "Branch '{}' already exists", name)
      }
    }
  }
}

/// Result type alias for git-ferry
pub type FerryResult<T> = Result<T, FerryError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> FerryResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> FerryResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<FerryError>,
{
  fn context(self, ctx: impl Into<String>) -> FerryResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> FerryResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &FerryError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
