mod commands;
mod core;
mod release;
mod ui;

use clap::{Parser, Subcommand};

use crate::core::error::{FerryError, print_error};

/// Ferry commits between diverged branches, with semver releases on top
#[derive(Parser)]
#[command(name = "git-ferry")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct FerryCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List commits on the source branch missing from the target (read-only)
  Plan {
    /// Branch carrying the commits to ferry
    #[arg(short, long)]
    source: Option<String>,
    /// Branch to compare against
    #[arg(short, long)]
    target: Option<String>,
    /// Log window, e.g. "6 months ago"
    #[arg(long)]
    since: Option<String>,
    /// Output the missing commits as JSON
    #[arg(long)]
    json: bool,
  },

  /// Ferry selected commits onto a release branch and open a pull request
  Sync {
    /// Branch carrying the commits to ferry
    #[arg(short, long)]
    source: Option<String>,
    /// Branch the release is cut from
    #[arg(short, long)]
    target: Option<String>,
    /// Remote to fetch from and push to
    #[arg(long)]
    remote: Option<String>,
    /// Log window, e.g. "6 months ago"
    #[arg(long)]
    since: Option<String>,
    /// Select every missing commit without prompting
    #[arg(short, long)]
    all: bool,
    /// Print the planned apply order and stop (no mutation)
    #[arg(long)]
    dry_run: bool,
    /// Skip `git fetch --prune`
    #[arg(long)]
    no_fetch: bool,
    /// Apply onto the target branch directly instead of a release branch
    #[arg(long)]
    no_release: bool,
    /// Skip version computation and the version-file bump
    #[arg(long)]
    no_semver: bool,
    /// Do everything except push
    #[arg(long)]
    no_push: bool,
    /// Push, but do not open a pull request
    #[arg(long)]
    no_pr: bool,
    /// Open the pull request as a draft
    #[arg(long)]
    draft: bool,
    /// TOML file carrying the current version (default: Cargo.toml)
    #[arg(long)]
    version_file: Option<String>,
    /// Changelog path, also used as the PR body (default: CHANGELOG.md)
    #[arg(long)]
    changelog: Option<String>,
  },
}

fn main() {
  let cli = FerryCli::parse();

  let result = match cli.command {
    Commands::Plan {
      source,
      target,
      since,
      json,
    } => commands::run_plan(source, target, since, json),

    Commands::Sync {
      source,
      target,
      remote,
      since,
      all,
      dry_run,
      no_fetch,
      no_release,
      no_semver,
      no_push,
      no_pr,
      draft,
      version_file,
      changelog,
    } => commands::run_sync(commands::SyncParams {
      source,
      target,
      remote,
      since,
      all,
      dry_run,
      no_fetch,
      no_release,
      no_semver,
      no_push,
      no_pr,
      draft,
      version_file,
      changelog,
    }),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: FerryError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}
