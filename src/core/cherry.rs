//! Sequential cherry-pick orchestration with interactive conflict resolution
//!
//! Commits are applied strictly in the given order; cherry-pick is inherently
//! sequential because each apply depends on the working tree the previous one
//! left behind. Git's own cherry-pick sequence state serializes resumption
//! across skip/resolve/continue, so the orchestrator holds no locks of its own.
//!
//! Per commit: `Applying -> { Applied, ConflictPending }`. A conflict drops into
//! the resolution machine: list unmerged files, let the operator skip, resolve
//! file by file, or abort the whole sequence.

use crate::core::error::{FerryError, FerryResult};
use crate::core::vcs::{Commit, SystemGit};

/// Aggregate outcome of one orchestration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyStats {
  pub applied: usize,
  pub skipped: usize,
}

/// Top-level choice when a commit conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
  /// `cherry-pick --skip`: drop this commit, continue with the next
  Skip,
  /// Enter the file-resolution loop
  Resolve,
  /// `cherry-pick --abort`: unwind the whole run
  Abort,
}

/// One step inside the file-resolution loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStep {
  /// Work on a single conflicted file
  PickFile(String),
  /// Apply an action to every conflicted file at once
  Bulk(BulkAction),
  /// Attempt `cherry-pick --continue`; requires zero unmerged files
  TryContinue,
  /// Return to the skip/resolve/abort choice without resolving
  Back,
}

/// Per-file resolution actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// `checkout --ours` then stage
  Ours,
  /// `checkout --theirs` then stage
  Theirs,
  /// Open the file in $EDITOR, then optionally stage it
  Edit,
  /// Show the conflict diff, file stays unmerged
  ShowDiff,
  /// Stage the file as-is
  MarkResolved,
}

/// Bulk resolution actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
  OursAll,
  TheirsAll,
  StageAll,
  /// Launch `git mergetool` on the operator's terminal
  MergeTool,
}

/// Operator interaction boundary
///
/// The state machine never renders anything itself; scripted implementations
/// drive it headless in tests.
pub trait Prompter {
  /// Pick the commits to ferry from the missing list
  fn choose_commits(&mut self, candidates: &[Commit]) -> FerryResult<Vec<String>>;

  /// Skip, resolve or abort a conflicting commit
  fn conflict_action(&mut self, hash: &str, files: &[String]) -> FerryResult<ConflictChoice>;

  /// Next step while conflicted files remain
  fn resolution_step(&mut self, files: &[String]) -> FerryResult<ResolutionStep>;

  /// Action for a single conflicted file
  fn file_action(&mut self, file: &str) -> FerryResult<FileAction>;

  /// Stage the file after the operator edited it?
  fn confirm_stage(&mut self, file: &str) -> FerryResult<bool>;
}

/// Terminal outcome for one commit inside the conflict machine
enum Outcome {
  Applied,
  Skipped,
}

/// Applies an ordered hash list, driving the conflict machine per failure
pub struct CherryPicker<'a, P: Prompter> {
  git: &'a SystemGit,
  prompter: &'a mut P,
}

impl<'a, P: Prompter> CherryPicker<'a, P> {
  pub fn new(git: &'a SystemGit, prompter: &'a mut P) -> Self {
    Self { git, prompter }
  }

  /// Apply `hashes` in order (oldest first)
  ///
  /// Invariant: `applied + skipped == hashes.len()` unless an abort unwinds
  /// early. A run where nothing applied is cleaned up with a best-effort
  /// `cherry-pick --abort` and reported as `NothingApplied`.
  pub fn apply_all(&mut self, hashes: &[String]) -> FerryResult<ApplyStats> {
    let mut stats = ApplyStats::default();

    for (i, hash) in hashes.iter().enumerate() {
      let short = if hash.len() > 7 { &hash[..7] } else { hash.as_str() };
      println!("🍒 [{}/{}] cherry-picking {}", i + 1, hashes.len(), short);

      match self.git.run(&["cherry-pick", hash]) {
        Ok(_) => stats.applied += 1,
        Err(_) => match self.handle_conflict(hash)? {
          Outcome::Applied => stats.applied += 1,
          Outcome::Skipped => {
            println!("   ⏭️  skipped {}", short);
            stats.skipped += 1;
          }
        },
      }
    }

    if stats.applied == 0 {
      // Nothing useful happened; clean up the sequence state if any remains
      let _ = self.git.run(&["cherry-pick", "--abort"]);
      return Err(FerryError::NothingApplied);
    }

    Ok(stats)
  }

  /// Skip / resolve / abort loop for one conflicting commit
  fn handle_conflict(&mut self, hash: &str) -> FerryResult<Outcome> {
    loop {
      let files = self.unmerged_files()?;

      match self.prompter.conflict_action(hash, &files)? {
        ConflictChoice::Skip => {
          self.git.run(&["cherry-pick", "--skip"])?;
          return Ok(Outcome::Skipped);
        }
        ConflictChoice::Abort => {
          self.git.run(&["cherry-pick", "--abort"])?;
          return Err(FerryError::Aborted);
        }
        ConflictChoice::Resolve => {
          if let Some(outcome) = self.resolution_loop()? {
            return Ok(outcome);
          }
          // Back: fall through and re-offer skip/resolve/abort
        }
      }
    }
  }

  /// File-resolution loop; `None` means the operator went back
  fn resolution_loop(&mut self) -> FerryResult<Option<Outcome>> {
    loop {
      let files = self.unmerged_files()?;

      if files.is_empty() {
        // A resolution that matches HEAD leaves nothing to commit; git refuses
        // to continue an empty pick, so treat it as a skip.
        if self.git.run(&["diff", "--cached", "--quiet"]).is_ok() {
          println!("   ⏭️  resolution left an empty commit, skipping");
          self.git.run(&["cherry-pick", "--skip"])?;
          return Ok(Some(Outcome::Skipped));
        }

        match self.git.run(&["cherry-pick", "--continue"]) {
          Ok(_) => return Ok(Some(Outcome::Applied)),
          Err(err) => {
            // Still unresolved as far as git is concerned (e.g. nothing
            // staged). Report and re-prompt so stage-all/back stay reachable.
            println!("   ⚠️  continue failed: {}", err);
          }
        }
      }

      match self.prompter.resolution_step(&files)? {
        ResolutionStep::PickFile(file) => self.resolve_file(&file)?,
        ResolutionStep::Bulk(action) => self.apply_bulk(action, &files)?,
        ResolutionStep::TryContinue => {
          if files.is_empty() {
            continue; // loop re-attempts --continue
          }
          println!("   ⚠️  {} file(s) still unmerged", files.len());
        }
        ResolutionStep::Back => return Ok(None),
      }
    }
  }

  fn resolve_file(&mut self, file: &str) -> FerryResult<()> {
    match self.prompter.file_action(file)? {
      FileAction::Ours => {
        self.git.run(&["checkout", "--ours", "--", file])?;
        self.git.run(&["add", "--", file])?;
      }
      FileAction::Theirs => {
        self.git.run(&["checkout", "--theirs", "--", file])?;
        self.git.run(&["add", "--", file])?;
      }
      FileAction::Edit => {
        self.open_editor(file)?;
        if self.prompter.confirm_stage(file)? {
          self.git.run(&["add", "--", file])?;
        }
      }
      FileAction::ShowDiff => {
        let diff = self.git.run(&["diff", "--", file])?;
        println!("{}", diff);
      }
      FileAction::MarkResolved => {
        self.git.run(&["add", "--", file])?;
      }
    }
    Ok(())
  }

  fn apply_bulk(&mut self, action: BulkAction, files: &[String]) -> FerryResult<()> {
    match action {
      BulkAction::OursAll => {
        for file in files {
          self.git.run(&["checkout", "--ours", "--", file])?;
          self.git.run(&["add", "--", file])?;
        }
      }
      BulkAction::TheirsAll => {
        for file in files {
          self.git.run(&["checkout", "--theirs", "--", file])?;
          self.git.run(&["add", "--", file])?;
        }
      }
      BulkAction::StageAll => {
        self.git.run(&["add", "."])?;
      }
      BulkAction::MergeTool => {
        self.git.run_interactive(&["mergetool"])?;
      }
    }
    Ok(())
  }

  fn unmerged_files(&self) -> FerryResult<Vec<String>> {
    let stdout = self.git.run(&["diff", "--name-only", "--diff-filter=U"])?;
    Ok(stdout.lines().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
  }

  fn open_editor(&self, file: &str) -> FerryResult<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
      .arg(self.git.path().join(file))
      .status()
      .map_err(|e| FerryError::message(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
      return Err(FerryError::message(format!("Editor '{}' exited with {}", editor, status)));
    }
    Ok(())
  }
}
