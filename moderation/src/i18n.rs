//! Reply catalog. Locale is negotiated as session locale, then the sender's client language,
//! then English; unsupported codes fall back to English.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Parses a BCP 47 code, ignoring the region subtag (`ru-RU` → `Ru`).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    pub fn negotiate(session_code: Option<&str>, user_code: Option<&str>) -> Self {
        session_code
            .or(user_code)
            .and_then(Locale::from_code)
            .unwrap_or_default()
    }
}

/// Every user-facing message the bot sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    NotSupergroup,
    BotNotAdmin,
    BotCannotRestrict,
    UserNotAdmin,
    UserCannotRestrict,
    RemovedDeleted { count: usize },
    Listed { count: usize },
    /// `user_ids` lists the shown ids; `more` counts the ones left out.
    BanFailures {
        count: usize,
        user_ids: String,
        more: usize,
    },
}

pub fn translate(locale: Locale, text: &Text) -> String {
    match locale {
        Locale::En => english(text),
        Locale::Ru => russian(text),
    }
}

fn english(text: &Text) -> String {
    match text {
        Text::NotSupergroup => "Sorry, but it should be SuperGroup".to_string(),
        Text::BotNotAdmin => {
            "Sorry, but you should add bot to admins and give him ban rights".to_string()
        }
        Text::BotCannotRestrict => "Sorry, but you should give bot ban rights".to_string(),
        Text::UserNotAdmin => "Sorry, but only Admins can use this command".to_string(),
        Text::UserCannotRestrict => "Sorry, but you should have ban rights".to_string(),
        Text::RemovedDeleted { count } => {
            format!("I deleted {} accounts (Deleted accounts)", count)
        }
        Text::Listed { count } => format!("I found {} accounts", count),
        Text::BanFailures {
            count,
            user_ids,
            more: 0,
        } => format!("Could not ban {} accounts: {}", count, user_ids),
        Text::BanFailures {
            count,
            user_ids,
            more,
        } => format!(
            "Could not ban {} accounts: {} and {} more",
            count, user_ids, more
        ),
    }
}

fn russian(text: &Text) -> String {
    match text {
        Text::NotSupergroup => "Извините, но это должна быть супергруппа".to_string(),
        Text::BotNotAdmin => {
            "Извините, но нужно добавить бота в администраторы и дать ему право банить"
                .to_string()
        }
        Text::BotCannotRestrict => "Извините, но нужно дать боту право банить".to_string(),
        Text::UserNotAdmin => {
            "Извините, но эту команду могут использовать только администраторы".to_string()
        }
        Text::UserCannotRestrict => "Извините, но у вас должно быть право банить".to_string(),
        Text::RemovedDeleted { count } => {
            format!("Я удалил {} аккаунтов (удалённые аккаунты)", count)
        }
        Text::Listed { count } => format!("Я нашёл {} аккаунтов", count),
        Text::BanFailures {
            count,
            user_ids,
            more: 0,
        } => format!("Не удалось заблокировать {} аккаунтов: {}", count, user_ids),
        Text::BanFailures {
            count,
            user_ids,
            more,
        } => format!(
            "Не удалось заблокировать {} аккаунтов: {} и ещё {}",
            count, user_ids, more
        ),
    }
}
