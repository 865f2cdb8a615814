use dbot_core::{DbotError, Result};

/// Account-level credentials for the privileged client.
#[derive(Debug, Clone)]
pub struct MtprotoCredentials {
    pub api_id: i32,
    pub api_hash: String,
    pub bot_token: String,
    /// Where the signed-in session is persisted; in-memory when unset.
    pub session_file: Option<String>,
}

impl MtprotoCredentials {
    pub fn validate(&self) -> Result<()> {
        if self.api_id == 0 || self.api_hash.is_empty() {
            return Err(DbotError::Config(
                "TG_API_ID and TG_API_HASH are required to list chat members".to_string(),
            ));
        }
        if self.bot_token.is_empty() {
            return Err(DbotError::Config("BOT_TOKEN is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(api_id: i32, api_hash: &str) -> MtprotoCredentials {
        MtprotoCredentials {
            api_id,
            api_hash: api_hash.to_string(),
            bot_token: "123:abc".to_string(),
            session_file: None,
        }
    }

    #[test]
    fn test_missing_api_credentials_is_config_error() {
        assert!(matches!(
            credentials(0, "hash").validate(),
            Err(DbotError::Config(_))
        ));
        assert!(matches!(
            credentials(12345, "").validate(),
            Err(DbotError::Config(_))
        ));
    }

    #[test]
    fn test_complete_credentials_validate() {
        assert!(credentials(12345, "0123456789abcdef").validate().is_ok());
    }
}
