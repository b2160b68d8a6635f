//! Terminal colors for chat output.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::conversation::Role;

/// owo-colors helpers, one per kind of text the chat prints.
pub struct Style;

impl Style {
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Keys in `key value` listings.
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Model names, config values.
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Temperatures always show one decimal place.
    pub fn temperature(temperature: f64) -> String {
        format!("{}", format!("{temperature:.1}").cyan())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    /// Speaker tag for a transcript turn or a streamed reply.
    pub fn role<T: Display>(role: Role, text: T) -> String {
        match role {
            Role::User => format!("{}", text.blue().bold()),
            Role::Assistant => format!("{}", text.magenta().bold()),
        }
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }
}
