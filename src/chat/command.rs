use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub(super) const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show current model and temperature"),
    ("/help", "Show available commands"),
    ("/history", "Show the conversation so far"),
    ("/model", "Switch model, e.g. /model gemini-1.0-pro"),
    ("/models", "List supported models"),
    ("/quit", "Exit chat mode"),
    ("/reset", "Clear the conversation and start over"),
    ("/temperature", "Set temperature between 0 and 1"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Config,
    Help,
    History,
    Model(Option<String>),
    Models,
    Quit,
    Reset,
    Temperature(Option<String>),
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    /// The bare `exit` token, in any letter case.
    Exit,
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }
    if input.eq_ignore_ascii_case("exit") {
        return Input::Exit;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let arg = parts.get(1).map(|s| (*s).to_string());

    match parts.first().copied() {
        Some("config") => Input::Command(SlashCommand::Config),
        Some("help") => Input::Command(SlashCommand::Help),
        Some("history") => Input::Command(SlashCommand::History),
        Some("model") => Input::Command(SlashCommand::Model(arg)),
        Some("models") => Input::Command(SlashCommand::Models),
        Some("quit" | "exit" | "q") => Input::Command(SlashCommand::Quit),
        Some("reset") => Input::Command(SlashCommand::Reset),
        Some("temperature" | "temp") => Input::Command(SlashCommand::Temperature(arg)),
        _ => Input::Command(SlashCommand::Unknown(parts.join(" "))),
    }
}
