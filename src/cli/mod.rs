//! Command-line interface definitions and handlers.

use crate::config::MissingApiKey;
use crate::conversation::SessionError;

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, ChatArgs, Command};

/// Maps a top-level error to a process exit code.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<MissingApiKey>().is_some() {
        return exitcode::CONFIG;
    }

    match error.downcast_ref::<SessionError>() {
        Some(SessionError::InvalidConfig(_)) => exitcode::USAGE,
        Some(SessionError::InitializationFailed(_)) => exitcode::UNAVAILABLE,
        _ => exitcode::SOFTWARE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::EndpointError;

    #[test]
    fn test_exit_code_missing_api_key() {
        assert_eq!(exit_code(&MissingApiKey.into()), exitcode::CONFIG);
    }

    #[test]
    fn test_exit_code_invalid_config() {
        let error = SessionError::InvalidConfig("bad".to_string());
        assert_eq!(exit_code(&error.into()), exitcode::USAGE);
    }

    #[test]
    fn test_exit_code_initialization_failed() {
        let error = SessionError::InitializationFailed(EndpointError::RateLimited);
        assert_eq!(exit_code(&error.into()), exitcode::UNAVAILABLE);
    }

    #[test]
    fn test_exit_code_other() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exitcode::SOFTWARE);
    }
}
