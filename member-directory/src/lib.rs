//! # member-directory
//!
//! [`dbot_core::MemberDirectory`] over MTProto. Bot API bots cannot enumerate a supergroup's
//! members, so this client signs in with the bot token plus API id/hash and pages through
//! `channels.getParticipants` via grammers.

mod credentials;
mod directory;

pub use credentials::MtprotoCredentials;
pub use directory::{channel_id_from_bot_api, GrammersMemberDirectory};
