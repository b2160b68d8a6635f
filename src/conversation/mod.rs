//! Conversation state and the retry-and-validation wrapper around a turn.
//!
//! [`ChatSession`] owns everything a conversation needs: the endpoint handle,
//! the [`Transcript`] and the [`GenerationConfig`] the handle is bound to.
//! It knows nothing about terminals or HTTP; both sit behind
//! [`EndpointFactory`] and the REPL in [`crate::chat`].

mod config;
mod endpoint;
mod error;
mod session;
mod transcript;

pub use config::{
    DEFAULT_TEMPERATURE, GenerationConfig, parse_temperature, validate_model,
    validate_temperature,
};
pub use endpoint::{EndpointError, EndpointFactory, EndpointHandle};
pub use error::SessionError;
pub use session::{ChatSession, DEFAULT_MAX_RETRIES, SessionState, TurnEvent};
pub use transcript::{Role, Transcript, Turn};

#[cfg(test)]
pub(crate) use session::tests::StubFactory;
