//! REPL runner: turns command messages into [`CommandEvent`]s and hands them to the HandlerChain,
//! one spawned task per update.

use anyhow::Result;
use dbot_core::{BotIdentity, CommandEvent, DbotError};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::command_event;

/// Resolves the bot's own id and username via getMe.
pub async fn fetch_identity(bot: &teloxide::Bot) -> Result<BotIdentity> {
    let me = bot.get_me().await?;
    Ok(BotIdentity {
        id: me.user.id.0 as i64,
        username: me.user.username.clone(),
    })
}

/// Process-wide sink for errors escaping a handler chain: logs and keeps the service alive.
pub fn report_handler_error(error: &DbotError, event: &CommandEvent) {
    error!(
        error = %error,
        chat_id = event.chat_id,
        user_id = event.user_id,
        command = %event.command,
        "ERROR on handling update occurred"
    );
}

/// Starts long polling. Non-command messages and commands for other bots are skipped.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    identity: BotIdentity,
) -> Result<()> {
    info!(
        username = identity.username.as_deref().unwrap_or("unknown"),
        "Bot starts"
    );

    let identity = Arc::new(identity);
    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        let identity = identity.clone();

        async move {
            let Some(event) = command_event(&msg, &identity) else {
                debug!(chat_id = msg.chat.id.0, "Skipping non-command message");
                return respond(());
            };

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&event).await {
                    report_handler_error(&e, &event);
                }
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
