//! Core types: chat type, bot identity, command event, chat member, handler response, and the
//! Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of chat a command was sent from. Moderation only runs in [`ChatType::Supergroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::Private => "private",
            ChatType::Group => "group",
            ChatType::Supergroup => "supergroup",
            ChatType::Channel => "channel",
        }
    }
}

/// The bot's own account, resolved once via `getMe` at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: Option<String>,
}

/// One inbound slash-command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    pub chat_id: i64,
    pub chat_type: ChatType,
    pub user_id: i64,
    /// Sender's client language, used when the session has no negotiated locale.
    pub language_code: Option<String>,
    /// Message carrying the command; replies are attached to it.
    pub message_id: i32,
    /// Command name without the leading `/` and without the `@bot` suffix, lowercased.
    pub command: String,
    /// Free text following the command (may be empty).
    pub argument: String,
    pub bot: BotIdentity,
    pub received_at: DateTime<Utc>,
}

/// Membership status as reported by either the Bot API or the privileged client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub user_id: i64,
    pub status: MemberStatus,
    pub can_restrict_members: bool,
    pub deleted_account: bool,
    /// Human-readable name, only used for logging.
    pub display_name: Option<String>,
}

impl ChatMember {
    /// Plain member with no rights; the shape the privileged client reports for most users.
    pub fn member(user_id: i64) -> Self {
        Self {
            user_id,
            status: MemberStatus::Member,
            can_restrict_members: false,
            deleted_account: false,
            display_name: None,
        }
    }

    pub fn is_creator(&self) -> bool {
        self.status == MemberStatus::Creator
    }
}

/// Entry of the command menu shown by Telegram clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandSpec {
    pub command: String,
    pub description: String,
}

impl BotCommandSpec {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the sent reply so `after()` can observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// The command is not owned by this handler, try next.
    Ignore,
    /// Stop the chain; the handler replied with this text.
    Reply(String),
}

/// A command handler. Returns [`HandlerResponse::Ignore`] for commands it does not own.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: &CommandEvent) -> crate::error::Result<HandlerResponse>;
}

/// Runs around handlers: all `before` in order, then handlers, then all `after` in reverse.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Return false to stop the chain.
    async fn before(&self, _event: &CommandEvent) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _event: &CommandEvent,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_constructor_has_no_rights() {
        let m = ChatMember::member(42);
        assert_eq!(m.user_id, 42);
        assert!(!m.is_creator());
        assert!(!m.can_restrict_members);
        assert!(!m.deleted_account);
    }

    #[test]
    fn test_creator_status() {
        let m = ChatMember {
            status: MemberStatus::Creator,
            ..ChatMember::member(1)
        };
        assert!(m.is_creator());
    }

    #[test]
    fn test_chat_type_as_str() {
        assert_eq!(ChatType::Supergroup.as_str(), "supergroup");
        assert_eq!(ChatType::Group.as_str(), "group");
        assert_eq!(ChatType::Private.as_str(), "private");
    }
}
