//! # dbot-telegram
//!
//! Telegram layer: teloxide adapters, [`dbot_core::BotGateway`] implementation, minimal config,
//! REPL runner and the process-wide handler-error reporter.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{chat_type, command_event, parse_command_text, TelegramMemberWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{fetch_identity, report_handler_error, run_repl};
