//! # dbot-core
//!
//! Core types and traits for the moderation bot: [`CommandEvent`], [`ChatMember`], the
//! [`BotGateway`] and [`MemberDirectory`] seams, [`Handler`] / [`Middleware`], and tracing
//! initialization. Transport-agnostic; used by dbot-telegram, member-directory and moderation.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{BotGateway, MemberDirectory};
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    BotCommandSpec, BotIdentity, ChatMember, ChatType, CommandEvent, Handler, HandlerResponse,
    MemberStatus, Middleware,
};
