//! Wiring: collaborators → handler chain → command registration → long polling.

use std::sync::Arc;

use anyhow::Result;
use dbot_core::{BotCommandSpec, BotGateway, MemberDirectory};
use dbot_telegram::{fetch_identity, run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use member_directory::GrammersMemberDirectory;
use middleware::{InMemorySessionStore, LoggingMiddleware, SessionMiddleware, SessionStore};
use moderation::{ModerationConfig, ModerationHandler, SweepPolicy};
use tracing::info;

use crate::config::BotConfig;

/// Commands served by the bot, in menu order.
pub fn policies() -> Vec<SweepPolicy> {
    vec![SweepPolicy::list_members(), SweepPolicy::remove_deleted()]
}

pub fn command_specs() -> Vec<BotCommandSpec> {
    policies().iter().map(SweepPolicy::command_spec).collect()
}

/// Builds the chain: optional update logging, sessions, then one handler per policy.
pub fn build_chain(
    gateway: Arc<dyn BotGateway>,
    directory: Arc<dyn MemberDirectory>,
    sessions: Arc<dyn SessionStore>,
    moderation: &ModerationConfig,
    log_updates: bool,
) -> HandlerChain {
    let mut chain = HandlerChain::new();
    if log_updates {
        chain = chain.add_middleware(Arc::new(LoggingMiddleware));
    }
    chain = chain.add_middleware(Arc::new(SessionMiddleware::new(sessions.clone())));

    for policy in policies() {
        chain = chain.add_handler(Arc::new(ModerationHandler::new(
            policy,
            gateway.clone(),
            directory.clone(),
            sessions.clone(),
            moderation.clone(),
        )));
    }
    chain
}

/// Runs the bot until the process is stopped.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let bot = config.telegram.build_bot()?;
    let gateway: Arc<dyn BotGateway> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let directory: Arc<dyn MemberDirectory> =
        Arc::new(GrammersMemberDirectory::new(config.mtproto.clone()));
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let chain = build_chain(
        gateway.clone(),
        directory,
        sessions,
        &config.moderation,
        !config.telegram.is_production(),
    );

    let identity = fetch_identity(&bot).await?;
    gateway.set_commands(&command_specs()).await?;
    info!(bot_id = identity.id, "step: commands registered");

    run_repl(bot, chain, identity).await
}
