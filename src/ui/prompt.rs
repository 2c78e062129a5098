//! Terminal implementation of the Prompter boundary
//!
//! dialoguer renders the choices; the state machine in `core::cherry` never
//! sees anything but the returned enum values.

use crate::core::cherry::{BulkAction, ConflictChoice, FileAction, Prompter, ResolutionStep};
use crate::core::error::{FerryError, FerryResult};
use crate::core::vcs::Commit;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};

/// Interactive prompter backed by dialoguer
#[derive(Default)]
pub struct TerminalPrompter {
  theme: ColorfulTheme,
}

impl TerminalPrompter {
  pub fn new() -> Self {
    Self::default()
  }
}

fn prompt_failed(err: dialoguer::Error) -> FerryError {
  FerryError::message(format!("Prompt failed: {}", err))
}

impl Prompter for TerminalPrompter {
  fn choose_commits(&mut self, candidates: &[Commit]) -> FerryResult<Vec<String>> {
    let items: Vec<String> = candidates
      .iter()
      .map(|c| format!("{} {}", style(c.short_hash()).yellow(), c.subject))
      .collect();

    let picked = MultiSelect::with_theme(&self.theme)
      .with_prompt("Select commits to ferry (newest first)")
      .items(&items)
      .interact()
      .map_err(prompt_failed)?;

    Ok(picked.into_iter().map(|i| candidates[i].hash.clone()).collect())
  }

  fn conflict_action(&mut self, hash: &str, files: &[String]) -> FerryResult<ConflictChoice> {
    let short = if hash.len() > 7 { &hash[..7] } else { hash };
    println!();
    println!(
      "⚠️  {} conflicts in {} file(s):",
      style(short).yellow().bold(),
      files.len()
    );
    for file in files {
      println!("   {}", style(file).red());
    }

    let choice = Select::with_theme(&self.theme)
      .with_prompt("How do you want to handle this conflict?")
      .items(&["Resolve the conflicts", "Skip this commit", "Abort the whole run"])
      .default(0)
      .interact()
      .map_err(prompt_failed)?;

    Ok(match choice {
      0 => ConflictChoice::Resolve,
      1 => ConflictChoice::Skip,
      _ => ConflictChoice::Abort,
    })
  }

  fn resolution_step(&mut self, files: &[String]) -> FerryResult<ResolutionStep> {
    let mut items: Vec<String> = files.iter().map(|f| format!("Resolve {}", f)).collect();
    let file_count = items.len();
    items.push("Take ours for all files".to_string());
    items.push("Take theirs for all files".to_string());
    items.push("Stage all files".to_string());
    items.push("Open external merge tool".to_string());
    items.push("Try to continue".to_string());
    items.push("Back".to_string());

    let choice = Select::with_theme(&self.theme)
      .with_prompt(format!("{} file(s) unmerged", file_count))
      .items(&items)
      .default(0)
      .interact()
      .map_err(prompt_failed)?;

    Ok(if choice < file_count {
      ResolutionStep::PickFile(files[choice].clone())
    } else {
      match choice - file_count {
        0 => ResolutionStep::Bulk(BulkAction::OursAll),
        1 => ResolutionStep::Bulk(BulkAction::TheirsAll),
        2 => ResolutionStep::Bulk(BulkAction::StageAll),
        3 => ResolutionStep::Bulk(BulkAction::MergeTool),
        4 => ResolutionStep::TryContinue,
        _ => ResolutionStep::Back,
      }
    })
  }

  fn file_action(&mut self, file: &str) -> FerryResult<FileAction> {
    let choice = Select::with_theme(&self.theme)
      .with_prompt(format!("Action for {}", file))
      .items(&[
        "Take ours",
        "Take theirs",
        "Open in editor",
        "Show diff",
        "Mark as resolved",
      ])
      .default(0)
      .interact()
      .map_err(prompt_failed)?;

    Ok(match choice {
      0 => FileAction::Ours,
      1 => FileAction::Theirs,
      2 => FileAction::Edit,
      3 => FileAction::ShowDiff,
      _ => FileAction::MarkResolved,
    })
  }

  fn confirm_stage(&mut self, file: &str) -> FerryResult<bool> {
    Confirm::with_theme(&self.theme)
      .with_prompt(format!("Stage {} now?", file))
      .default(true)
      .interact()
      .map_err(prompt_failed)
  }
}
