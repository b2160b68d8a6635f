use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::sse_parser::sse_to_chunk_stream;
use crate::conversation::{EndpointError, EndpointFactory, EndpointHandle, GenerationConfig};

/// Base URL of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<TextPart>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: "user",
            parts: vec![TextPart {
                text: text.to_string(),
            }],
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: "model",
            parts: vec![TextPart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
struct GenerationParams {
    temperature: f64,
}

/// Creates Gemini chat handles for one API key.
#[derive(Clone)]
pub struct GeminiFactory {
    http: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for GeminiFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiFactory")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiFactory {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the factory at a different API root (a proxy or a test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EndpointFactory for GeminiFactory {
    type Handle = GeminiChat;

    /// Looks the model up with the configured key, so bad credentials and
    /// unknown models fail here rather than on the first message.
    async fn create(&self, config: &GenerationConfig) -> Result<GeminiChat, EndpointError> {
        let url = format!("{}/models/{}", self.base_url, config.model());
        debug!(model = config.model(), "verifying Gemini model");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| network_error(&url, &e))?;
        check_status(response).await?;

        Ok(GeminiChat {
            http: self.http.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            config: config.clone(),
            history: Vec::new(),
        })
    }
}

/// A Gemini conversation bound to one model and temperature.
///
/// Keeps the exchanged contents so every request carries the full context.
pub struct GeminiChat {
    http: Client,
    api_key: String,
    base_url: String,
    config: GenerationConfig,
    history: Vec<Content>,
}

impl GeminiChat {
    async fn stream_reply(
        &self,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, EndpointError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url,
            self.config.model()
        );
        let request = GenerateContentRequest {
            contents: &self.history,
            generation_config: GenerationParams {
                temperature: self.config.temperature(),
            },
        };

        debug!(
            model = self.config.model(),
            contents = self.history.len(),
            "Gemini streaming request"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| network_error(&url, &e))?;
        let response = check_status(response).await?;

        let mut stream = std::pin::pin!(sse_to_chunk_stream(response.bytes_stream()));
        let mut reply = String::new();
        let mut finish_reason = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if !chunk.text.is_empty() {
                on_chunk(&chunk.text);
                reply.push_str(&chunk.text);
            }
            if chunk.finish_reason.is_some() {
                finish_reason = chunk.finish_reason;
            }
        }

        if reply.is_empty() {
            return Err(EndpointError::EmptyReply(
                finish_reason.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        debug!(finish_reason = ?finish_reason, chars = reply.len(), "Gemini reply complete");
        Ok(reply)
    }
}

#[async_trait]
impl EndpointHandle for GeminiChat {
    fn config(&self) -> &GenerationConfig {
        &self.config
    }

    async fn send(
        &mut self,
        text: &str,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, EndpointError> {
        self.history.push(Content::user(text));

        match self.stream_reply(on_chunk).await {
            Ok(reply) => {
                self.history.push(Content::model(&reply));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}

fn network_error(url: &str, error: &reqwest::Error) -> EndpointError {
    EndpointError::Network(format!("Failed to connect to {url}: {error}"))
}

async fn check_status(response: Response) -> Result<Response, EndpointError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(EndpointError::RateLimited);
    }

    let body = response.text().await.unwrap_or_default();
    Err(EndpointError::Api {
        status: status.as_u16(),
        body,
    })
}
