//! Transport seams consumed by the moderation pipeline.
//!
//! [`BotGateway`] is the bot's own Bot API surface; [`MemberDirectory`] is the privileged
//! account-level client able to enumerate the full member list. Both are injected as
//! `Arc<dyn ...>` so tests can substitute recording doubles.

use crate::error::Result;
use crate::types::{BotCommandSpec, ChatMember, CommandEvent};
use async_trait::async_trait;

/// Bot API operations, authenticated with the bot token.
#[async_trait]
pub trait BotGateway: Send + Sync {
    /// Current administrators of the chat, creator included.
    async fn get_chat_administrators(&self, chat_id: i64) -> Result<Vec<ChatMember>>;
    /// Bans the user from the chat.
    async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> Result<()>;
    /// Replaces the command menu shown by clients.
    async fn set_commands(&self, commands: &[BotCommandSpec]) -> Result<()>;
    /// Replies to the command message with HTML-formatted text.
    async fn reply(&self, event: &CommandEvent, html: &str) -> Result<()>;
}

/// Privileged member enumeration (API id/hash credentials, signed in with the bot token).
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fetches members of `chat_id` page by page. `cap = None` fetches everyone.
    async fn list_members(&self, chat_id: i64, cap: Option<usize>) -> Result<Vec<ChatMember>>;
}
