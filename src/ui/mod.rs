pub mod prompt;

pub use prompt::TerminalPrompter;
