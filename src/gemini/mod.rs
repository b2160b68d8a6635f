//! Gemini endpoint over the Generative Language REST API.

mod client;
mod models;
mod sse_parser;

pub use client::{DEFAULT_BASE_URL, GeminiChat, GeminiFactory};
pub use models::{
    DEFAULT_MODEL, SUPPORTED_MODELS, is_supported_model, print_models, supported_model_names,
};
