//! Interactive pickers and prompts.

pub mod codex;
pub mod fuzzy;
pub mod keys;
pub mod prompt;

pub use prompt::{Prompter, TerminalPrompter};

#[cfg(test)]
pub use prompt::{Answer, ScriptedPrompter};
