use tracing::{debug, info, warn};

use super::config::GenerationConfig;
use super::endpoint::{EndpointError, EndpointFactory, EndpointHandle};
use super::error::SessionError;
use super::transcript::{Transcript, Turn};

/// Delivery attempts per turn unless configured otherwise.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No handle bound; the next send or reset creates one.
    Uninitialized,
    /// Handle bound to the current config, nothing in flight.
    Ready,
    /// A turn is being delivered.
    AwaitingReply,
}

/// Progress reported while a turn is delivered.
#[derive(Debug)]
pub enum TurnEvent<'a> {
    /// A streamed piece of the reply.
    Chunk(&'a str),
    /// A non-final attempt failed and the turn is being re-sent.
    AttemptFailed {
        attempt: u32,
        max_attempts: u32,
        error: &'a EndpointError,
    },
}

/// One conversation: the endpoint handle, the transcript and the generation
/// config the handle is bound to.
///
/// All mutation goes through `&mut self`, so at most one turn is in flight.
pub struct ChatSession<F: EndpointFactory> {
    factory: F,
    handle: Option<F::Handle>,
    config: GenerationConfig,
    transcript: Transcript,
    max_retries: u32,
    awaiting_reply: bool,
}

impl<F: EndpointFactory> ChatSession<F> {
    /// Creates an uninitialized session. No endpoint is contacted until the
    /// first send, reset or explicit [`Self::ensure_initialized`].
    pub fn new(factory: F, config: GenerationConfig) -> Self {
        Self {
            factory,
            handle: None,
            config,
            transcript: Transcript::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            awaiting_reply: false,
        }
    }

    /// Sets the number of delivery attempts per turn. Values below 1 count as 1.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub const fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    pub const fn state(&self) -> SessionState {
        match (&self.handle, self.awaiting_reply) {
            (None, _) => SessionState::Uninitialized,
            (Some(_), true) => SessionState::AwaitingReply,
            (Some(_), false) => SessionState::Ready,
        }
    }

    /// Validates and applies new generation parameters.
    ///
    /// Returns `true` when the config changed, in which case the bound handle
    /// is discarded and recreated lazily on the next send.
    pub fn configure(&mut self, temperature: f64, model: &str) -> Result<bool, SessionError> {
        let config = GenerationConfig::new(temperature, model)?;
        if config == self.config {
            return Ok(false);
        }

        debug!(from = %self.config, to = %config, "generation config changed");
        self.config = config;
        self.handle = None;
        Ok(true)
    }

    /// Changes only the temperature. See [`Self::configure`].
    pub fn set_temperature(&mut self, temperature: f64) -> Result<bool, SessionError> {
        let model = self.config.model().to_string();
        self.configure(temperature, &model)
    }

    /// Changes only the model. See [`Self::configure`].
    pub fn set_model(&mut self, model: &str) -> Result<bool, SessionError> {
        self.configure(self.config.temperature(), model)
    }

    /// Returns the bound handle, creating one from the current config if none
    /// is bound or the bound one no longer matches it.
    pub async fn ensure_initialized(&mut self) -> Result<&mut F::Handle, SessionError> {
        let handle = match self.handle.take() {
            Some(handle) if handle.config() == &self.config => handle,
            _ => {
                let handle = self.factory.create(&self.config).await.map_err(|e| {
                    warn!(config = %self.config, error = %e, "endpoint initialization failed");
                    SessionError::InitializationFailed(e)
                })?;
                info!(config = %self.config, "endpoint handle created");
                handle
            }
        };
        Ok(self.handle.insert(handle))
    }

    /// Sends one user turn and returns the assistant's reply.
    ///
    /// The user turn is recorded before delivery and stays in the transcript
    /// even if every attempt fails; the assistant turn is recorded only on
    /// success.
    pub async fn send_turn<E>(&mut self, user_text: &str, mut on_event: E) -> Result<String, SessionError>
    where
        E: FnMut(TurnEvent<'_>) + Send,
    {
        if user_text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.transcript.push(Turn::user(user_text));

        let max_attempts = self.max_retries;
        self.awaiting_reply = true;
        let outcome = match self.ensure_initialized().await {
            Ok(handle) => deliver(handle, user_text, max_attempts, &mut on_event).await,
            Err(e) => Err(e),
        };
        self.awaiting_reply = false;

        let reply = outcome?;
        self.transcript.push(Turn::assistant(reply.clone()));
        Ok(reply)
    }

    /// Clears the transcript and starts over with a fresh handle.
    ///
    /// If the new handle cannot be created the transcript stays cleared and no
    /// handle is bound.
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.transcript.clear();
        self.handle = None;
        debug!("session reset");
        self.ensure_initialized().await.map(|_| ())
    }
}

/// Immediate re-send up to `max_attempts` times. No delay between attempts.
async fn deliver<H, E>(
    handle: &mut H,
    text: &str,
    max_attempts: u32,
    on_event: &mut E,
) -> Result<String, SessionError>
where
    H: EndpointHandle,
    E: FnMut(TurnEvent<'_>) + Send,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = {
            let mut forward = |chunk: &str| on_event(TurnEvent::Chunk(chunk));
            handle.send(text, &mut forward).await
        };

        match result {
            Ok(reply) => {
                debug!(attempt, "turn delivered");
                return Ok(reply);
            }
            Err(error) if attempt >= max_attempts => {
                warn!(attempt, max_attempts, %error, "giving up on turn");
                return Err(SessionError::DeliveryFailed {
                    attempts: attempt,
                    last_error: error,
                });
            }
            Err(error) => {
                warn!(attempt, max_attempts, %error, "delivery attempt failed, retrying");
                on_event(TurnEvent::AttemptFailed {
                    attempt,
                    max_attempts,
                    error: &error,
                });
            }
        }
    }
}
