//! Bot configuration: Telegram connection + MTProto credentials + moderation limits. Loaded from env.

use anyhow::Result;
use dbot_telegram::TelegramConfig;
use member_directory::MtprotoCredentials;
use moderation::ModerationConfig;
use std::env;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub mtproto: MtprotoCredentials,
    pub moderation: ModerationConfig,
}

impl BotConfig {
    /// Missing BOT_TOKEN or an invalid API URL is fatal. Missing TG_API_ID / TG_API_HASH is not:
    /// member listing then fails with a config error at use.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        telegram.validate()?;

        let mtproto = MtprotoCredentials {
            api_id: env::var("TG_API_ID")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            api_hash: env::var("TG_API_HASH").unwrap_or_default(),
            bot_token: telegram.bot_token.clone(),
            session_file: env::var("MTPROTO_SESSION_FILE").ok().filter(|p| !p.is_empty()),
        };

        Ok(Self {
            telegram,
            mtproto,
            moderation: ModerationConfig::from_env(),
        })
    }
}
