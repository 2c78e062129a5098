pub mod cherry;
pub mod config;
pub mod diff;
pub mod error;
pub mod vcs;
