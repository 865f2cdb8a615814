//! Moderation limits and reporting, loaded from env.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// ADMIN_LIST_TIMEOUT_SECS; 0 keeps the default
    pub admin_list_timeout: Duration,
    /// MEMBER_LIST_TIMEOUT_SECS; 0 keeps the default
    pub member_list_timeout: Duration,
    /// MEMBER_LIST_CAP; 0 or unset means no cap
    pub member_list_cap: Option<usize>,
    /// REPORT_BAN_FAILURES; list failed bans in the reply
    pub report_ban_failures: bool,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            admin_list_timeout: Duration::from_secs(15),
            member_list_timeout: Duration::from_secs(120),
            member_list_cap: None,
            report_ban_failures: false,
        }
    }
}

impl ModerationConfig {
    /// Unset, unparsable or zero values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            admin_list_timeout: secs("ADMIN_LIST_TIMEOUT_SECS", defaults.admin_list_timeout),
            member_list_timeout: secs("MEMBER_LIST_TIMEOUT_SECS", defaults.member_list_timeout),
            member_list_cap: env::var("MEMBER_LIST_CAP")
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|cap| *cap > 0),
            report_ban_failures: env::var("REPORT_BAN_FAILURES")
                .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.report_ban_failures),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for key in [
            "ADMIN_LIST_TIMEOUT_SECS",
            "MEMBER_LIST_TIMEOUT_SECS",
            "MEMBER_LIST_CAP",
            "REPORT_BAN_FAILURES",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        let config = ModerationConfig::from_env();
        assert_eq!(config.admin_list_timeout, Duration::from_secs(15));
        assert_eq!(config.member_list_timeout, Duration::from_secs(120));
        assert_eq!(config.member_list_cap, None);
        assert!(!config.report_ban_failures);
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear();
        env::set_var("ADMIN_LIST_TIMEOUT_SECS", "3");
        env::set_var("MEMBER_LIST_CAP", "5000");
        env::set_var("REPORT_BAN_FAILURES", "true");
        let config = ModerationConfig::from_env();
        assert_eq!(config.admin_list_timeout, Duration::from_secs(3));
        assert_eq!(config.member_list_cap, Some(5000));
        assert!(config.report_ban_failures);
        clear();
    }

    #[test]
    #[serial]
    fn test_zero_cap_means_unbounded() {
        clear();
        env::set_var("MEMBER_LIST_CAP", "0");
        assert_eq!(ModerationConfig::from_env().member_list_cap, None);
        env::set_var("MEMBER_LIST_TIMEOUT_SECS", "soon");
        assert_eq!(
            ModerationConfig::from_env().member_list_timeout,
            Duration::from_secs(120)
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_zero_timeouts_keep_defaults() {
        clear();
        env::set_var("ADMIN_LIST_TIMEOUT_SECS", "0");
        env::set_var("MEMBER_LIST_TIMEOUT_SECS", " 0 ");
        let config = ModerationConfig::from_env();
        assert_eq!(config.admin_list_timeout, Duration::from_secs(15));
        assert_eq!(config.member_list_timeout, Duration::from_secs(120));
        clear();
    }
}
