//! Configuration file management and API key loading.

mod manager;

pub use manager::{
    API_KEY_ENV, ChatDefaults, ConfigFile, ConfigManager, MissingApiKey, ResolveOptions,
    ResolvedConfig, load_api_key, resolve_config,
};
