use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gemini-chat")]
#[command(about = "Chat with Google Gemini from your terminal")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub chat: ChatArgs,

    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by the default action and `chat`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ChatArgs {
    /// Sampling temperature between 0 and 1 (skips the startup prompt)
    #[arg(short = 't', long)]
    pub temperature: Option<f64>,

    /// Model name (see `gemini-chat models`)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Delivery attempts per message
    #[arg(short = 'r', long)]
    pub max_retries: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive chat (the default)
    Chat(ChatArgs),
    /// List supported models
    Models,
    /// Configure default model, temperature and retries
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
