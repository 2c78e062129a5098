//! CLI commands for git-ferry
//!
//! - **plan**: read-only listing of commits on the source branch that are
//!   missing (by subject) from the target branch
//! - **sync**: the full release flow: diff, select, version, branch,
//!   cherry-pick, commit, push, pull request

pub mod plan;
pub mod sync;

pub use plan::run_plan;
pub use sync::{SyncParams, run_sync};
