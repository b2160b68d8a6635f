//! # gemini-chat - Terminal chat client for Google Gemini
//!
//! `gemini-chat` runs a multi-turn conversation with a Gemini model from the
//! terminal. Replies stream as they arrive, failed sends are retried a bounded
//! number of times, and the model and temperature can be changed mid-session.
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_API_KEY=...
//!
//! # Start chatting (prompts for a temperature first)
//! gemini-chat
//!
//! # Skip the prompt and pick a model
//! gemini-chat --temperature 0.3 --model gemini-1.5-pro
//!
//! # List supported models
//! gemini-chat models
//! ```
//!
//! ## Configuration
//!
//! Defaults are stored in `~/.config/gemini-chat/config.toml`:
//!
//! ```toml
//! [chat]
//! model = "gemini-1.5-flash"
//! temperature = 0.7
//! max_retries = 3
//! ```

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and API key loading.
pub mod config;

/// Conversation state, retry policy and the endpoint seam.
pub mod conversation;

/// Gemini REST client and model catalogue.
pub mod gemini;

/// Tracing subscriber setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;
