use anyhow::Result;
use std::future::Future;
use std::io::{self, Write};

use super::command::{Input, SlashCommand, parse_input};
use super::input::LineReader;
use super::ui;
use crate::conversation::{
    ChatSession, EndpointFactory, SessionError, TurnEvent, parse_temperature,
};
use crate::gemini::print_models;
use crate::ui::Spinner;

/// What the loop does after handling a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
    Interrupted,
}

/// The read-eval loop driving a [`ChatSession`].
pub struct ChatRepl<F: EndpointFactory, R: LineReader> {
    session: ChatSession<F>,
    reader: R,
    turn: usize,
}

impl<F: EndpointFactory, R: LineReader> ChatRepl<F, R> {
    pub const fn new(session: ChatSession<F>, reader: R) -> Self {
        Self {
            session,
            reader,
            turn: 1,
        }
    }

    pub const fn session(&self) -> &ChatSession<F> {
        &self.session
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Asks for the sampling temperature until a valid value is entered.
    ///
    /// Blank input keeps the current value. Returns `false` if the user
    /// cancelled.
    pub async fn prompt_temperature(&mut self) -> Result<bool> {
        let default = self.session.config().temperature();
        let prompt = format!("Enter temperature (default {default:.1}):");

        loop {
            let Some(Some(line)) = or_interrupt(self.reader.read_setting(&prompt))
                .await
                .transpose()?
            else {
                return Ok(false);
            };

            match parse_temperature(&line, default).and_then(|t| self.session.set_temperature(t)) {
                Ok(_) => return Ok(true),
                Err(e) => ui::print_warning(&e.to_string()),
            }
        }
    }

    /// Creates the endpoint handle, offering to retry when that fails.
    ///
    /// Returns `false` if the user interrupted. If the user declines to retry,
    /// the initialization error is returned.
    pub async fn connect(&mut self) -> Result<bool> {
        loop {
            let spinner = Spinner::new("Initializing Gemini chat...");
            let result = or_interrupt(self.session.ensure_initialized())
                .await
                .map(|r| r.map(|_| ()));
            spinner.stop();

            match result {
                None => return Ok(false),
                Some(Ok(())) => {
                    ui::print_connected(self.session.config());
                    return Ok(true);
                }
                Some(Err(e)) => {
                    ui::print_connect_failure(&e);
                    let answer = or_interrupt(self.reader.read_setting("Try again? (y/N):")).await;
                    match answer.transpose()? {
                        None => return Ok(false),
                        Some(answer) if answer.as_deref().is_some_and(is_yes) => {}
                        Some(_) => return Err(e.into()),
                    }
                }
            }
        }
    }

    /// Runs until `exit`, `/quit`, end of input or Ctrl+C.
    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.session.config());

        loop {
            let prompt = format!("Turn {}", self.turn);
            let flow = match or_interrupt(self.reader.read_message(&prompt)).await {
                None => Flow::Interrupted,
                Some(line) => match line? {
                    Some(line) => self.handle_line(&line).await?,
                    None => {
                        println!();
                        Flow::Exit
                    }
                },
            };

            match flow {
                Flow::Continue => {}
                Flow::Exit => break,
                Flow::Interrupted => {
                    println!();
                    ui::print_warning("Chat cancelled by user.");
                    break;
                }
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Handles one line of user input.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match parse_input(line) {
            Input::Empty => {
                ui::print_warning("Message cannot be empty. Please try again.");
                Ok(Flow::Continue)
            }
            Input::Exit => Ok(Flow::Exit),
            Input::Command(cmd) => Ok(self.handle_command(cmd).await),
            Input::Text(text) => self.send_and_print(&text).await,
        }
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> Flow {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(
                    self.session.config(),
                    self.session.max_retries(),
                    self.session.transcript(),
                );
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => ui::print_history(self.session.transcript()),
            SlashCommand::Models => {
                print_models(Some(self.session.config().model()));
                println!();
            }
            SlashCommand::Model(value) => self.set_model(value.as_deref()),
            SlashCommand::Temperature(value) => self.set_temperature(value.as_deref()),
            SlashCommand::Reset => return self.reset().await,
            SlashCommand::Quit => return Flow::Exit,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
                eprintln!();
            }
        }
        Flow::Continue
    }

    fn set_model(&mut self, value: Option<&str>) {
        let Some(model) = value else {
            ui::print_error("Usage: /model <name>  (see /models)");
            return;
        };

        match self.session.set_model(model) {
            Ok(true) => ui::print_success(&format!(
                "Changed model to {model}. The conversation context starts fresh with your next message."
            )),
            Ok(false) => ui::print_success(&format!("Already using {model}")),
            Err(e) => ui::print_session_error(&e),
        }
    }

    fn set_temperature(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            ui::print_error("Usage: /temperature <value between 0 and 1>");
            return;
        };

        let current = self.session.config().temperature();
        let result =
            parse_temperature(value, current).and_then(|t| self.session.set_temperature(t));
        match result {
            Ok(true) => ui::print_success(&format!(
                "Temperature set to {:.1}",
                self.session.config().temperature()
            )),
            Ok(false) => ui::print_success(&format!("Temperature is already {current:.1}")),
            Err(e) => ui::print_session_error(&e),
        }
    }

    async fn reset(&mut self) -> Flow {
        let spinner = Spinner::new("Resetting conversation...");
        let result = or_interrupt(self.session.reset()).await;
        spinner.stop();

        match result {
            None => return Flow::Interrupted,
            Some(Ok(())) => ui::print_success("Conversation reset"),
            Some(Err(e)) => ui::print_session_error(&e),
        }
        self.turn = 1;
        Flow::Continue
    }

    async fn send_and_print(&mut self, text: &str) -> Result<Flow> {
        let mut spinner = Spinner::new("Sending to Gemini...");
        let mut streamed = false;

        let outcome = or_interrupt(self.session.send_turn(text, |event| match event {
            TurnEvent::Chunk(chunk) => {
                if !streamed {
                    spinner.stop();
                    ui::print_reply_header();
                    streamed = true;
                }
                print!("{chunk}");
                let _ = io::stdout().flush();
            }
            TurnEvent::AttemptFailed {
                attempt,
                max_attempts,
                error,
            } => {
                if streamed {
                    println!();
                    streamed = false;
                }
                spinner.stop();
                ui::print_retry(attempt, max_attempts, error);
                spinner.restart(&format!("Retrying ({}/{max_attempts})...", attempt + 1));
            }
        }))
        .await;
        spinner.stop();

        self.turn += 1;
        match outcome {
            None => return Ok(Flow::Interrupted),
            Some(Ok(_)) => {
                println!();
                println!();
            }
            Some(Err(e @ SessionError::EmptyMessage)) => ui::print_warning(&e.to_string()),
            Some(Err(e)) => {
                if streamed {
                    println!();
                }
                ui::print_session_error(&e);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Runs `future` to completion unless Ctrl+C arrives first.
async fn or_interrupt<T>(future: impl Future<Output = T>) -> Option<T> {
    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available; never resolve
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        value = future => Some(value),
        () = interrupted => None,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
