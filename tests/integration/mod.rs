//! Integration tests for the git-ferry CLI

mod helpers;
mod test_plan;
mod test_sync;
