//! Supported Gemini models.

use crate::ui::Style;

/// Model used when neither the CLI nor the config file picks one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Models the chat accepts, with a short description.
pub const SUPPORTED_MODELS: &[(&str, &str)] = &[
    ("gemini-1.5-flash", "Fast, versatile multimodal model"),
    ("gemini-1.0-pro", "First-generation text model"),
    ("gemini-1.5-pro", "Larger model for complex reasoning"),
    ("gemini-2.0-flash", "Next-generation fast model"),
];

/// Returns `true` if `model` is in the allow-list. Matching is exact.
pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.iter().any(|(name, _)| *name == model)
}

/// Comma-separated model names, for error messages.
pub fn supported_model_names() -> String {
    SUPPORTED_MODELS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints the allow-list to stdout, marking `current` when present.
pub fn print_models(current: Option<&str>) {
    println!("{}", Style::header("Supported models"));
    for (name, description) in SUPPORTED_MODELS {
        let marker = if current == Some(*name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {:18} {}{marker}",
            Style::value(name),
            Style::secondary(description)
        );
    }
}
