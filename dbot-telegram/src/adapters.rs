//! Adapters from Telegram (teloxide) types to dbot_core types, and command-text parsing.

use dbot_core::{BotIdentity, ChatMember, ChatType, CommandEvent, MemberStatus};

/// Maps a teloxide chat to [`ChatType`].
pub fn chat_type(chat: &teloxide::types::Chat) -> ChatType {
    if chat.is_supergroup() {
        ChatType::Supergroup
    } else if chat.is_group() {
        ChatType::Group
    } else if chat.is_channel() {
        ChatType::Channel
    } else {
        ChatType::Private
    }
}

/// Wraps a teloxide ChatMember for conversion to core [`ChatMember`].
pub struct TelegramMemberWrapper<'a>(pub &'a teloxide::types::ChatMember);

impl<'a> TelegramMemberWrapper<'a> {
    pub fn to_core(&self) -> ChatMember {
        let kind = &self.0.kind;
        let status = if kind.is_owner() {
            MemberStatus::Creator
        } else if kind.is_administrator() {
            MemberStatus::Administrator
        } else if kind.is_restricted() {
            MemberStatus::Restricted
        } else if kind.is_left() {
            MemberStatus::Left
        } else if kind.is_banned() {
            MemberStatus::Banned
        } else {
            MemberStatus::Member
        };

        ChatMember {
            user_id: self.0.user.id.0 as i64,
            status,
            can_restrict_members: kind.can_restrict_members(),
            // Bot API has no deleted flag; deleted accounts surface through the member directory.
            deleted_account: false,
            display_name: Some(self.0.user.full_name()),
        }
    }
}

/// Splits `/name@bot rest of text` into `("name", "rest of text")`.
///
/// Returns `None` for non-commands and for commands addressed to another bot. The name is
/// lowercased; the argument keeps its inner whitespace.
pub fn parse_command_text(text: &str, bot_username: Option<&str>) -> Option<(String, String)> {
    let body = text.strip_prefix('/')?;
    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };

    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let (Some(target), Some(own)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(own) {
            return None;
        }
    }

    Some((name.to_ascii_lowercase(), rest.to_string()))
}

/// Builds a [`CommandEvent`] from a command message. `None` when the message is not a command
/// for this bot or has no sender.
pub fn command_event(msg: &teloxide::types::Message, bot: &BotIdentity) -> Option<CommandEvent> {
    let (command, argument) = parse_command_text(msg.text()?, bot.username.as_deref())?;
    let from = msg.from.as_ref()?;

    Some(CommandEvent {
        chat_id: msg.chat.id.0,
        chat_type: chat_type(&msg.chat),
        user_id: from.id.0 as i64,
        language_code: from.language_code.clone(),
        message_id: msg.id.0,
        command,
        argument,
        bot: bot.clone(),
        received_at: chrono::Utc::now(),
    })
}
