use anyhow::Result;

use crate::config::ConfigManager;
use crate::gemini::{DEFAULT_MODEL, print_models};

/// Lists supported models, marking the configured default.
pub fn run_models() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    let current = config.chat.model.as_deref().unwrap_or(DEFAULT_MODEL);

    print_models(Some(current));
    Ok(())
}
