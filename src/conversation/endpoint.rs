//! The capability a [`super::ChatSession`] talks through.
//!
//! A factory turns a [`GenerationConfig`] into a handle; the handle sends one
//! turn at a time and keeps whatever provider-side context it needs. The
//! production implementation lives in [`crate::gemini`]; tests use stubs.

use async_trait::async_trait;

use super::config::GenerationConfig;

/// Failures reported by an endpoint, either while creating a handle or while
/// delivering a turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Rate limited by the API")]
    RateLimited,
    #[error("Unable to parse response: {0}")]
    Parse(String),
    #[error("Empty reply (finish reason: {0})")]
    EmptyReply(String),
}

/// Creates handles bound to a single configuration.
#[async_trait]
pub trait EndpointFactory: Send + Sync {
    type Handle: EndpointHandle;

    /// Creates a handle with an empty conversation context.
    async fn create(&self, config: &GenerationConfig) -> Result<Self::Handle, EndpointError>;
}

/// A live conversation with the remote model.
#[async_trait]
pub trait EndpointHandle: Send {
    /// The configuration this handle was created with. Never changes.
    fn config(&self) -> &GenerationConfig;

    /// Sends `text` and returns the full reply, passing streamed pieces of it
    /// to `on_chunk` as they arrive.
    ///
    /// A failed send must leave the handle's context as it was.
    async fn send(
        &mut self,
        text: &str,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, EndpointError>;
}
