//! Interactive chat mode.
//!
//! A read-eval loop over a [`crate::conversation::ChatSession`], with slash
//! commands for switching model and temperature, resetting and reviewing the
//! conversation.

/// Slash command parsing and autocomplete.
pub mod command;
mod input;
mod repl;
mod ui;

pub use input::{InquireReader, LineReader, StdinReader};
pub use repl::{ChatRepl, Flow};
