//! Chat mode UI components.

use super::command::SLASH_COMMANDS;
use crate::conversation::{GenerationConfig, Role, SessionError, Transcript};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(config: &GenerationConfig) {
    println!(
        "{} {} - {}",
        Style::header("gemini-chat"),
        Style::secondary(format!("v{VERSION}")),
        Style::value(config)
    );
    println!(
        "{}",
        Style::hint("Start chatting. Type 'exit' to quit or /help for commands.")
    );
    println!();
}

pub fn print_connected(config: &GenerationConfig) {
    println!(
        "{} Connected to Gemini ({})",
        Style::success("✓"),
        Style::value(config.model())
    );
}

pub fn print_goodbye() {
    println!("{}", Style::success("Chat session ended. Goodbye!"));
}

pub fn print_config(config: &GenerationConfig, max_retries: u32, transcript: &Transcript) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}        {}",
        Style::label("model"),
        Style::value(config.model())
    );
    println!(
        "  {}  {}",
        Style::label("temperature"),
        Style::temperature(config.temperature())
    );
    println!(
        "  {}  {}",
        Style::label("max retries"),
        Style::value(max_retries)
    );
    println!(
        "  {} {}",
        Style::label("conversation"),
        Style::secondary(format!("{} turns", transcript.exchanges()))
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (cmd, desc) in SLASH_COMMANDS {
        println!("  {:14} {}", Style::command(cmd), Style::secondary(desc));
    }
    println!(
        "  {:14} {}",
        Style::command("exit"),
        Style::secondary("End the conversation")
    );
    println!();
    println!("{}", Style::header("About temperature"));
    println!(
        "  {}",
        Style::secondary("Lower (closer to 0): more deterministic, focused responses")
    );
    println!(
        "  {}",
        Style::secondary("Higher (closer to 1): more creative, diverse responses")
    );
    println!();
}

pub fn print_history(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", Style::hint("No messages yet."));
        println!();
        return;
    }

    println!("{}", Style::header("Conversation"));
    for turn in transcript.turns() {
        let tag = match turn.role() {
            Role::User => Style::role(Role::User, "you"),
            Role::Assistant => Style::role(Role::Assistant, "gemini"),
        };
        println!("{tag}: {}", turn.text());
    }
    println!();
}

pub fn print_reply_header() {
    println!("{}", Style::role(Role::Assistant, "Gemini:"));
}

pub fn print_retry(attempt: u32, max_attempts: u32, error: &dyn std::fmt::Display) {
    eprintln!(
        "{} Communication error (attempt {attempt}/{max_attempts}): {error}",
        Style::warning("Warning:")
    );
    eprintln!("{}", Style::hint("Retrying..."));
}

/// Prints a session error with a hint on what to do next.
pub fn print_session_error(error: &SessionError) {
    print_error(&error.to_string());
    eprintln!("{}", Style::hint(hint_for(error)));
    eprintln!();
}

/// Reports a failed connection attempt before offering a retry.
pub fn print_connect_failure(error: &SessionError) {
    print_warning(&error.to_string());
    eprintln!("{}", Style::hint(hint_for(error)));
}

const fn hint_for(error: &SessionError) -> &'static str {
    match error {
        SessionError::InvalidConfig(_) => "Check the value and try again.",
        SessionError::EmptyMessage => "Type a message before pressing Enter.",
        SessionError::InitializationFailed(_) => {
            "Please check your internet connection and API key validity."
        }
        SessionError::DeliveryFailed { .. } => {
            "Try rephrasing your message or check your connection."
        }
    }
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
    println!();
}

pub fn print_warning(message: &str) {
    eprintln!("{} {message}", Style::warning("Warning:"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
}
