pub mod system_git;

pub use system_git::SystemGit;

use serde::Serialize;

/// A commit as read from `git log`: full object id plus subject line.
///
/// Immutable snapshot for one run; identity is the hash. The full message body
/// is fetched on demand through the adapter, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
  pub hash: String,
  pub subject: String,
}

impl Commit {
  /// First 7 characters of the hash, as git prints them
  pub fn short_hash(&self) -> &str {
    if self.hash.len() > 7 { &self.hash[..7] } else { &self.hash }
  }
}
