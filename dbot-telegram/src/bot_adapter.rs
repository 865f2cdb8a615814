//! Wraps teloxide::Bot and implements [`dbot_core::BotGateway`]. Production code talks to the
//! Bot API; tests substitute another gateway.

use async_trait::async_trait;
use dbot_core::{BotCommandSpec, BotGateway, ChatMember, CommandEvent, DbotError, Result};
use teloxide::{
    prelude::*,
    types::{BotCommand, ChatId, MessageId, ParseMode, ReplyParameters, UserId},
};

use crate::adapters::TelegramMemberWrapper;

/// Thin wrapper around teloxide::Bot.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: teloxide::RequestError) -> DbotError {
    DbotError::Bot(e.to_string())
}

#[async_trait]
impl BotGateway for TelegramBotAdapter {
    async fn get_chat_administrators(&self, chat_id: i64) -> Result<Vec<ChatMember>> {
        let admins = self
            .bot
            .get_chat_administrators(ChatId(chat_id))
            .await
            .map_err(bot_error)?;
        Ok(admins
            .iter()
            .map(|m| TelegramMemberWrapper(m).to_core())
            .collect())
    }

    async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.bot
            .ban_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn set_commands(&self, commands: &[BotCommandSpec]) -> Result<()> {
        let commands: Vec<BotCommand> = commands
            .iter()
            .map(|c| BotCommand::new(c.command.clone(), c.description.clone()))
            .collect();
        self.bot.set_my_commands(commands).await.map_err(bot_error)?;
        Ok(())
    }

    async fn reply(&self, event: &CommandEvent, html: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(event.chat_id), html.to_string())
            .parse_mode(ParseMode::Html)
            .reply_parameters(
                ReplyParameters::new(MessageId(event.message_id)).allow_sending_without_reply(),
            )
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
