use anyhow::Result;
use std::io::{self, IsTerminal};

use crate::chat::{ChatRepl, InquireReader, LineReader, StdinReader};
use crate::cli::ChatArgs;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, load_api_key, resolve_config};
use crate::conversation::ChatSession;
use crate::gemini::GeminiFactory;

pub async fn run_chat(options: ChatArgs) -> Result<()> {
    let resolved = load_session_config(&options)?;
    let api_key = load_api_key()?;
    let factory = GeminiFactory::new(api_key).with_base_url(&resolved.endpoint);

    if io::stdin().is_terminal() {
        let prompt_temperature = options.temperature.is_none();
        run_session(resolved, factory, InquireReader::new(), prompt_temperature).await
    } else {
        run_session(resolved, factory, StdinReader::new(), false).await
    }
}

fn load_session_config(options: &ChatArgs) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;

    let resolve_options = ResolveOptions {
        model: options.model.clone(),
        temperature: options.temperature,
        max_retries: options.max_retries,
    };
    resolve_config(&resolve_options, &file_config)
}

async fn run_session<R: LineReader>(
    resolved: ResolvedConfig,
    factory: GeminiFactory,
    reader: R,
    prompt_temperature: bool,
) -> Result<()> {
    let session =
        ChatSession::new(factory, resolved.generation).with_max_retries(resolved.max_retries);
    let mut repl = ChatRepl::new(session, reader);

    if prompt_temperature && !repl.prompt_temperature().await? {
        println!("Chat setup cancelled. Goodbye!");
        return Ok(());
    }

    if !repl.connect().await? {
        println!("Chat session ended. Goodbye!");
        return Ok(());
    }

    repl.run().await
}
