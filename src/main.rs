use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use gemini_chat::cli::commands::{chat, configure, models};
use gemini_chat::cli::{Args, Command, exit_code};
use gemini_chat::logging;
use gemini_chat::ui::Style;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Models) => models::run_models(),
        Some(Command::Configure { show }) => configure::run_configure(show),
        Some(Command::Chat(options)) => chat::run_chat(options).await,
        None => chat::run_chat(args.chat).await,
    }
}
