//! The moderation pipeline: authorize, enumerate, sweep, reply.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dbot_core::{
    BotGateway, ChatMember, CommandEvent, DbotError, Handler, HandlerResponse, MemberDirectory,
    Result,
};
use middleware::SessionStore;
use tracing::{debug, info, instrument, warn};

use crate::authorization::{authorize, check_chat_type, Denial};
use crate::config::ModerationConfig;
use crate::format::{compose_reply, MAX_MESSAGE_CHARS};
use crate::i18n::{translate, Locale};
use crate::sweep::{BatchReport, SweepAction, SweepPolicy};

/// Result of one pipeline run, before the reply is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationOutcome {
    /// HTML reply text.
    pub reply: String,
    pub denial: Option<Denial>,
    pub report: Option<BatchReport>,
}

/// Runs one [`SweepPolicy`] for the command it owns.
pub struct ModerationHandler {
    policy: SweepPolicy,
    gateway: Arc<dyn BotGateway>,
    directory: Arc<dyn MemberDirectory>,
    sessions: Arc<dyn SessionStore>,
    config: ModerationConfig,
}

impl ModerationHandler {
    pub fn new(
        policy: SweepPolicy,
        gateway: Arc<dyn BotGateway>,
        directory: Arc<dyn MemberDirectory>,
        sessions: Arc<dyn SessionStore>,
        config: ModerationConfig,
    ) -> Self {
        Self {
            policy,
            gateway,
            directory,
            sessions,
            config,
        }
    }

    pub fn policy(&self) -> &SweepPolicy {
        &self.policy
    }

    /// Runs the pipeline without sending the reply. Denials are returned as outcomes;
    /// only transport failures and timeouts are errors.
    #[instrument(skip(self, event), fields(command = self.policy.command, chat_id = event.chat_id))]
    pub async fn run(&self, event: &CommandEvent) -> Result<ModerationOutcome> {
        let locale = self.locale(event).await?;

        if let Err(denial) = check_chat_type(event) {
            return Ok(self.denied(event, locale, denial));
        }

        let admins = bounded(
            self.config.admin_list_timeout,
            format!("administrator list for chat {}", event.chat_id),
            self.gateway.get_chat_administrators(event.chat_id),
        )
        .await?;

        if let Err(denial) = authorize(event, &admins, &self.policy) {
            return Ok(self.denied(event, locale, denial));
        }
        info!(user_id = event.user_id, "step: authorized");

        let members = bounded(
            self.config.member_list_timeout,
            format!("member list for chat {}", event.chat_id),
            self.directory
                .list_members(event.chat_id, self.config.member_list_cap),
        )
        .await?;
        info!(total = members.len(), "step: members fetched");

        let report = self.sweep(event.chat_id, &members).await;
        info!(
            matched = report.matched,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "step: sweep finished"
        );

        let mut reply = compose_reply(
            &translate(locale, &self.policy.summary(&report)),
            true,
            &event.argument,
        );
        if self.config.report_ban_failures {
            let budget = MAX_MESSAGE_CHARS.saturating_sub(reply.chars().count() + 1);
            if let Some(line) = failure_line(locale, &report, budget) {
                reply.push('\n');
                reply.push_str(&line);
            }
        }

        Ok(ModerationOutcome {
            reply,
            denial: None,
            report: Some(report),
        })
    }

    /// Applies the policy action to every selected member. Failures are recorded, never abort.
    async fn sweep(&self, chat_id: i64, members: &[ChatMember]) -> BatchReport {
        let mut report = BatchReport::default();
        for member in members.iter().filter(|m| self.policy.selects(m)) {
            match self.policy.action {
                SweepAction::Ban => {
                    let result = self.gateway.ban_chat_member(chat_id, member.user_id).await;
                    if let Err(e) = &result {
                        warn!(user_id = member.user_id, error = %e, "Ban failed, continuing");
                    }
                    report.record(member.user_id, result);
                }
                SweepAction::Inspect => {
                    debug!(
                        user_id = member.user_id,
                        name = member.display_name.as_deref().unwrap_or(""),
                        status = ?member.status,
                        deleted = member.deleted_account,
                        "Member"
                    );
                    report.record(member.user_id, Ok(()));
                }
            }
        }
        report
    }

    async fn locale(&self, event: &CommandEvent) -> Result<Locale> {
        let session = self.sessions.load(event.chat_id).await?;
        Ok(Locale::negotiate(
            session.as_ref().and_then(|s| s.language_code.as_deref()),
            event.language_code.as_deref(),
        ))
    }

    fn denied(&self, event: &CommandEvent, locale: Locale, denial: Denial) -> ModerationOutcome {
        info!(user_id = event.user_id, denial = ?denial, "step: denied");
        ModerationOutcome {
            reply: compose_reply(&translate(locale, &denial.text()), false, &event.argument),
            denial: Some(denial),
            report: None,
        }
    }
}

/// Failure line naming as many failed ids as fit in `budget` chars. `None` when nothing failed
/// or not even the count fits.
fn failure_line(locale: Locale, report: &BatchReport, budget: usize) -> Option<String> {
    let render = |shown: usize| {
        report
            .failure_text(shown)
            .map(|text| compose_reply(&translate(locale, &text), false, ""))
    };
    let fits = |line: &String| line.chars().count() <= budget;

    let full = render(report.failed.len())?;
    if fits(&full) {
        return Some(full);
    }
    // With ids hidden the line grows with `shown`; find the largest that fits.
    let (mut lo, mut hi) = (0, report.failed.len());
    let mut best = render(0).filter(|line| fits(line))?;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        match render(mid).filter(|line| fits(line)) {
            Some(line) => {
                best = line;
                lo = mid;
            }
            None => hi = mid,
        }
    }
    Some(best)
}

async fn bounded<T>(
    limit: Duration,
    what: String,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| DbotError::Timeout(what))?
}

#[async_trait]
impl Handler for ModerationHandler {
    async fn handle(&self, event: &CommandEvent) -> Result<HandlerResponse> {
        if event.command != self.policy.command {
            return Ok(HandlerResponse::Ignore);
        }
        let outcome = self.run(event).await?;
        self.gateway.reply(event, &outcome.reply).await?;
        Ok(HandlerResponse::Reply(outcome.reply))
    }
}
