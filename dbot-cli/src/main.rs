//! dbot: Telegram moderation bot. Config from env (and `.env`) plus optional CLI args.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            dbot_core::init_tracing(config.telegram.log_file.as_deref())?;
            run_bot(config).await
        }
    }
}
