//! Authorization gate. Decisions are computed fresh per invocation from the current
//! administrator list and never stored.

use dbot_core::{ChatMember, ChatType, CommandEvent};

use crate::i18n::Text;
use crate::sweep::SweepPolicy;

/// Reason a command was refused. Each maps to its own reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    NotSupergroup,
    BotNotAdmin,
    BotCannotRestrict,
    UserNotAdmin,
    UserCannotRestrict,
}

impl Denial {
    pub fn text(&self) -> Text {
        match self {
            Denial::NotSupergroup => Text::NotSupergroup,
            Denial::BotNotAdmin => Text::BotNotAdmin,
            Denial::BotCannotRestrict => Text::BotCannotRestrict,
            Denial::UserNotAdmin => Text::UserNotAdmin,
            Denial::UserCannotRestrict => Text::UserCannotRestrict,
        }
    }
}

/// Chat type guard; runs before any API call.
pub fn check_chat_type(event: &CommandEvent) -> Result<(), Denial> {
    if event.chat_type != ChatType::Supergroup {
        return Err(Denial::NotSupergroup);
    }
    Ok(())
}

/// Full gate: supergroup, bot is an admin able to restrict, invoker is an admin, and for
/// policies that ban, the invoker is the creator or can restrict members.
pub fn authorize(
    event: &CommandEvent,
    admins: &[ChatMember],
    policy: &SweepPolicy,
) -> Result<(), Denial> {
    check_chat_type(event)?;

    let bot = admins
        .iter()
        .find(|m| m.user_id == event.bot.id)
        .ok_or(Denial::BotNotAdmin)?;
    if !bot.can_restrict_members {
        return Err(Denial::BotCannotRestrict);
    }

    let invoker = admins
        .iter()
        .find(|m| m.user_id == event.user_id)
        .ok_or(Denial::UserNotAdmin)?;

    if policy.requires_ban_rights && !(invoker.is_creator() || invoker.can_restrict_members) {
        return Err(Denial::UserCannotRestrict);
    }

    Ok(())
}
