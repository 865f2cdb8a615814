//! Sweep policies: which members a command selects and what it does to them.

use std::fmt;

use dbot_core::{BotCommandSpec, ChatMember, DbotError};

use crate::i18n::Text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAction {
    /// Ban each selected member through the bot gateway.
    Ban,
    /// Log each selected member; no side effect.
    Inspect,
}

/// Configuration of one moderation command.
#[derive(Clone)]
pub struct SweepPolicy {
    pub command: &'static str,
    pub description: &'static str,
    /// Invoker must be the creator or hold restrict-member rights.
    pub requires_ban_rights: bool,
    pub selector: fn(&ChatMember) -> bool,
    pub action: SweepAction,
}

impl fmt::Debug for SweepPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepPolicy")
            .field("command", &self.command)
            .field("requires_ban_rights", &self.requires_ban_rights)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl SweepPolicy {
    /// `/removedeletedusers`: ban every deleted account.
    pub fn remove_deleted() -> Self {
        Self {
            command: "removedeletedusers",
            description: "Clean deleted users",
            requires_ban_rights: true,
            selector: |m| m.deleted_account,
            action: SweepAction::Ban,
        }
    }

    /// `/listusers`: log every member.
    pub fn list_members() -> Self {
        Self {
            command: "listusers",
            description: "List chat members",
            requires_ban_rights: false,
            selector: |_| true,
            action: SweepAction::Inspect,
        }
    }

    pub fn command_spec(&self) -> BotCommandSpec {
        BotCommandSpec::new(self.command, self.description)
    }

    pub fn selects(&self, member: &ChatMember) -> bool {
        (self.selector)(member)
    }

    pub fn summary(&self, report: &BatchReport) -> Text {
        let count = report.acted_upon();
        match self.action {
            SweepAction::Ban => Text::RemovedDeleted { count },
            SweepAction::Inspect => Text::Listed { count },
        }
    }
}

/// Per-member outcomes of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub matched: usize,
    pub succeeded: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

impl BatchReport {
    pub fn record(&mut self, user_id: i64, result: Result<(), DbotError>) {
        self.matched += 1;
        match result {
            Ok(()) => self.succeeded.push(user_id),
            Err(e) => self.failed.push((user_id, e.to_string())),
        }
    }

    pub fn acted_upon(&self) -> usize {
        self.succeeded.len()
    }

    /// Failure line naming the first `shown` failed ids, `None` when every action succeeded.
    pub fn failure_text(&self, shown: usize) -> Option<Text> {
        if self.failed.is_empty() {
            return None;
        }
        let shown = shown.min(self.failed.len());
        let user_ids = self.failed[..shown]
            .iter()
            .map(|(id, _)| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Some(Text::BanFailures {
            count: self.failed.len(),
            user_ids,
            more: self.failed.len() - shown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_deleted_selects_only_deleted_accounts() {
        let policy = SweepPolicy::remove_deleted();
        let deleted = ChatMember {
            deleted_account: true,
            ..ChatMember::member(1)
        };
        assert!(policy.selects(&deleted));
        assert!(!policy.selects(&ChatMember::member(2)));
    }

    #[test]
    fn test_list_members_selects_everyone() {
        let policy = SweepPolicy::list_members();
        assert!(policy.selects(&ChatMember::member(2)));
        assert_eq!(policy.command_spec().command, "listusers");
    }

    #[test]
    fn test_report_counts_only_successes() {
        let mut report = BatchReport::default();
        report.record(1, Ok(()));
        report.record(2, Err(DbotError::Bot("USER_NOT_PARTICIPANT".to_string())));
        report.record(3, Ok(()));

        assert_eq!(report.matched, 3);
        assert_eq!(report.acted_upon(), 2);
        assert_eq!(
            report.failure_text(usize::MAX),
            Some(Text::BanFailures {
                count: 1,
                user_ids: "2".to_string(),
                more: 0,
            })
        );
        assert_eq!(
            SweepPolicy::remove_deleted().summary(&report),
            Text::RemovedDeleted { count: 2 }
        );
    }

    #[test]
    fn test_failure_text_hides_ids_past_shown() {
        let mut report = BatchReport::default();
        for id in 1..=4 {
            report.record(id, Err(DbotError::Bot("CHAT_ADMIN_REQUIRED".to_string())));
        }

        assert_eq!(
            report.failure_text(2),
            Some(Text::BanFailures {
                count: 4,
                user_ids: "1, 2".to_string(),
                more: 2,
            })
        );
        assert_eq!(BatchReport::default().failure_text(2), None);
    }
}
