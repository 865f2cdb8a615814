//! # moderation
//!
//! Authorization-gated bulk member moderation. One [`ModerationHandler`] per [`SweepPolicy`]:
//! check chat type and admin rights, enumerate members through the privileged
//! [`dbot_core::MemberDirectory`], apply the policy's action to matching members through the
//! [`dbot_core::BotGateway`], and reply with a localized summary.

pub mod authorization;
pub mod config;
pub mod format;
pub mod handler;
pub mod i18n;
pub mod sweep;

pub use authorization::{authorize, check_chat_type, Denial};
pub use config::ModerationConfig;
pub use format::MAX_MESSAGE_CHARS;
pub use handler::{ModerationHandler, ModerationOutcome};
pub use i18n::{Locale, Text};
pub use sweep::{BatchReport, SweepAction, SweepPolicy};
