//! Minimal framework config: bot token, API URL, log file, environment name.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE, APP_ENV.

use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    /// APP_ENV; `production` disables update logging.
    pub app_env: String,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN; a missing or empty token is an error.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "You have to provide the bot-token from @BotFather via environment variable (BOT_TOKEN)"
                )
            })?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = Some(
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/moderation-bot.log".to_string()),
        )
        .filter(|p| !p.is_empty());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            app_env,
        })
    }

    /// telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Builds the teloxide Bot, pointing it at the custom API URL when configured.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        Ok(match &self.telegram_api_url {
            Some(url) => bot.set_api_url(reqwest::Url::parse(url)?),
            None => bot,
        })
    }
}
