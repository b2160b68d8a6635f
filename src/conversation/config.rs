use std::fmt;

use super::error::SessionError;
use crate::gemini::{DEFAULT_MODEL, is_supported_model, supported_model_names};

/// Temperature used when none is supplied.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Generation parameters a handle is bound to.
///
/// Always valid once constructed: the temperature lies in `[0.0, 1.0]` and
/// the model is one of [`crate::gemini::SUPPORTED_MODELS`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    temperature: f64,
    model: String,
}

impl GenerationConfig {
    /// Validates both values and builds a config.
    pub fn new(temperature: f64, model: impl Into<String>) -> Result<Self, SessionError> {
        let model = model.into();
        validate_temperature(temperature)?;
        validate_model(&model)?;
        Ok(Self { temperature, model })
    }

    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl fmt::Display for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (temperature {:.1})", self.model, self.temperature)
    }
}

/// Rejects temperatures outside `[0.0, 1.0]`, NaN included. Never clamps.
pub fn validate_temperature(temperature: f64) -> Result<(), SessionError> {
    if (0.0..=1.0).contains(&temperature) {
        Ok(())
    } else {
        Err(SessionError::InvalidConfig(format!(
            "Temperature must be between 0 and 1 (got {temperature})"
        )))
    }
}

/// Rejects models outside the allow-list.
pub fn validate_model(model: &str) -> Result<(), SessionError> {
    if is_supported_model(model) {
        Ok(())
    } else {
        Err(SessionError::InvalidConfig(format!(
            "Unsupported model: '{model}'. Supported models: {}",
            supported_model_names()
        )))
    }
}

/// Parses user-typed temperature text.
///
/// Blank input yields `default`. Non-numeric and out-of-range input are both
/// `InvalidConfig`.
pub fn parse_temperature(input: &str, default: f64) -> Result<f64, SessionError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }

    let temperature: f64 = input.parse().map_err(|_| {
        SessionError::InvalidConfig(format!(
            "'{input}' is not a number. Please enter a value between 0 and 1"
        ))
    })?;
    validate_temperature(temperature)?;
    Ok(temperature)
}
