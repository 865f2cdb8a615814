//! # dbot-cli
//!
//! CLI parsing, config loading and wiring of the moderation bot.

pub mod app;
pub mod cli;
pub mod config;

pub use app::{build_chain, command_specs, policies, run_bot};
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
