//! Changelog generation from the commits selected for a release
//!
//! Commits land in one of four buckets by their bump classification. The
//! rendered document is the PR body, so sections with nothing to say are
//! omitted entirely rather than rendered empty.

use crate::core::error::FerryResult;
use crate::core::vcs::SystemGit;
use crate::release::bump::classify;
use crate::release::version::VersionBump;

/// Changelog for one release: version header plus four ordered buckets
#[derive(Debug, Clone)]
pub struct Changelog {
  pub version: String,
  pub date: String,
  breaking: Vec<String>,
  features: Vec<String>,
  fixes: Vec<String>,
  others: Vec<String>,
}

impl Changelog {
  pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
    Self {
      version: version.into(),
      date: date.into(),
      breaking: Vec::new(),
      features: Vec::new(),
      fixes: Vec::new(),
      others: Vec::new(),
    }
  }

  /// Build a changelog by classifying each commit's full message
  ///
  /// `hashes` is the apply order (oldest first), which is also the order the
  /// lines appear in within each section.
  pub fn build(git: &SystemGit, version: &str, date: &str, hashes: &[String]) -> FerryResult<Self> {
    let mut changelog = Self::new(version, date);

    for hash in hashes {
      let message = git.run(&["show", "--format=%B", "-s", hash])?;
      let subject = message.lines().next().unwrap_or("").to_string();
      let short = if hash.len() > 7 { &hash[..7] } else { hash.as_str() };
      changelog.add_entry(classify(&message), short, &subject);
    }

    Ok(changelog)
  }

  /// Append a `<short-hash> <subject>` line to the bucket for `bump`
  pub fn add_entry(&mut self, bump: VersionBump, short_hash: &str, subject: &str) {
    let line = format!("{} {}", short_hash, subject);
    match bump {
      VersionBump::Major => self.breaking.push(line),
      VersionBump::Minor => self.features.push(line),
      VersionBump::Patch => self.fixes.push(line),
      VersionBump::None => self.others.push(line),
    }
  }

  /// Render as markdown: header, then each non-empty section in fixed order
  pub fn to_markdown(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("## [{}] - {}\n", self.version, self.date));

    let sections = [
      ("Breaking Changes", &self.breaking),
      ("Features", &self.features),
      ("Fixes", &self.fixes),
      ("Others", &self.others),
    ];

    for (heading, lines) in sections {
      if lines.is_empty() {
        continue;
      }
      output.push_str(&format!("\n### {}\n\n", heading));
      for line in lines {
        output.push_str(&format!("- {}\n", line));
      }
    }

    output
  }
}
