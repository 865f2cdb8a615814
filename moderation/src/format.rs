//! HTML reply composition (sent with `ParseMode::Html`).

use teloxide::utils::html;

/// Telegram rejects longer message texts.
pub const MAX_MESSAGE_CHARS: usize = 4096;

const SPOILER_OPEN: &str = "<tg-spoiler>";
const SPOILER_CLOSE: &str = "</tg-spoiler>";

/// Escapes `text` and wraps it in a spoiler span.
pub fn spoiler(text: &str) -> String {
    format!("{}{}{}", SPOILER_OPEN, html::escape(text), SPOILER_CLOSE)
}

/// `headline` (optionally bold), a space, and the echoed command argument as a spoiler.
/// An empty argument adds no span; a long one is cut so the reply fits [`MAX_MESSAGE_CHARS`].
pub fn compose_reply(headline: &str, emphasize: bool, argument: &str) -> String {
    let mut text = if emphasize {
        html::bold(&html::escape(headline))
    } else {
        html::escape(headline)
    };
    if argument.trim().is_empty() {
        return text;
    }

    let overhead = text.chars().count() + 1 + SPOILER_OPEN.len() + SPOILER_CLOSE.len();
    let echoed = escape_within(argument, MAX_MESSAGE_CHARS.saturating_sub(overhead));
    if !echoed.is_empty() {
        text.push(' ');
        text.push_str(SPOILER_OPEN);
        text.push_str(&echoed);
        text.push_str(SPOILER_CLOSE);
    }
    text
}

/// Escapes the longest prefix of `text` whose escaped form has at most `budget` chars.
fn escape_within(text: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let escaped = html::escape(c.encode_utf8(&mut buf));
        let len = escaped.chars().count();
        if used + len > budget {
            break;
        }
        used += len;
        out.push_str(&escaped);
    }
    out
}
