//! Line sources for the chat loop.
//!
//! An interactive terminal gets inquire prompts with slash-command
//! completion; piped stdin is read line by line on its own thread. End of
//! input reads as `None`, as do Ctrl+C and Escape at an inquire prompt.

use anyhow::{Context, Result};
use async_trait::async_trait;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

use super::command::SlashCommandCompleter;
use crate::ui::is_prompt_cancelled;

#[async_trait]
pub trait LineReader: Send {
    /// Reads the next chat message. `None` means the user is done.
    async fn read_message(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Reads a setting value such as a temperature or a yes/no answer.
    async fn read_setting(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read_message(prompt).await
    }
}

/// inquire-backed prompts for an interactive terminal.
pub struct InquireReader {
    render_config: RenderConfig<'static>,
}

impl InquireReader {
    pub fn new() -> Self {
        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        Self { render_config }
    }

    fn finish(result: inquire::error::InquireResult<String>) -> Result<Option<String>> {
        match result {
            Ok(line) => Ok(Some(line)),
            Err(e) if is_prompt_cancelled(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for InquireReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineReader for InquireReader {
    async fn read_message(&mut self, prompt: &str) -> Result<Option<String>> {
        let result = Text::new(prompt)
            .with_render_config(self.render_config)
            .with_autocomplete(SlashCommandCompleter)
            .with_help_message("Type 'exit' to quit, /help for commands")
            .prompt();
        Self::finish(result)
    }

    async fn read_setting(&mut self, prompt: &str) -> Result<Option<String>> {
        let result = Text::new(prompt)
            .with_render_config(self.render_config)
            .prompt();
        Self::finish(result)
    }
}

/// Plain line reader for piped input.
///
/// Lines are read on a dedicated thread so a pending read never blocks the
/// runtime and can be abandoned when the user interrupts.
pub struct StdinReader {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl StdinReader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineReader for StdinReader {
    async fn read_message(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ");
        io::stdout().flush()?;

        match self.lines.recv().await {
            Some(line) => Ok(Some(line.context("Failed to read from stdin")?)),
            None => Ok(None),
        }
    }
}
