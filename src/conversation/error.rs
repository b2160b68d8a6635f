use super::endpoint::EndpointError;

/// Errors surfaced by [`super::ChatSession`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Temperature or model outside the allowed range/set.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Blank user turn. Nothing was sent.
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// The endpoint handle could not be created. Not retried by the session.
    #[error("Unable to initialize chat: {0}")]
    InitializationFailed(#[source] EndpointError),

    /// Every delivery attempt for one turn failed.
    #[error("Failed to get a response after {attempts} attempts: {last_error}")]
    DeliveryFailed {
        attempts: u32,
        #[source]
        last_error: EndpointError,
    },
}
