//! Recording doubles for [`dbot_core::BotGateway`] and [`dbot_core::MemberDirectory`].
//!
//! Both share a [`FakeChat`] so a successful ban removes the member from the next enumeration,
//! which lets tests observe idempotence across runs.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{
    BotCommandSpec, BotGateway, BotIdentity, ChatMember, ChatType, CommandEvent, DbotError,
    MemberDirectory, MemberStatus, Result,
};

pub const CHAT_ID: i64 = -1001234567890;
pub const BOT_ID: i64 = 999;
pub const ADMIN_ID: i64 = 10;

/// One recorded gateway or directory call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAdministrators(i64),
    ListMembers(i64, Option<usize>),
    Ban(i64, i64),
    SetCommands(Vec<String>),
    Reply(String),
}

pub struct FakeChat {
    pub admins: Vec<ChatMember>,
    pub members: Mutex<Vec<ChatMember>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeChat {
    pub fn new(admins: Vec<ChatMember>, members: Vec<ChatMember>) -> Arc<Self> {
        Arc::new(Self {
            admins,
            members: Mutex::new(members),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bans(&self) -> Vec<i64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Ban(_, user_id) => Some(user_id),
                _ => None,
            })
            .collect()
    }

    pub fn listed(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::ListMembers(..)))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub struct MockGateway {
    chat: Arc<FakeChat>,
    failing_bans: HashSet<i64>,
    fail_reply: bool,
    admins_delay: Option<Duration>,
}

impl MockGateway {
    pub fn new(chat: Arc<FakeChat>) -> Self {
        Self {
            chat,
            failing_bans: HashSet::new(),
            fail_reply: false,
            admins_delay: None,
        }
    }

    /// Bans of these users return an error.
    pub fn failing_bans(mut self, user_ids: &[i64]) -> Self {
        self.failing_bans = user_ids.iter().copied().collect();
        self
    }

    pub fn failing_reply(mut self) -> Self {
        self.fail_reply = true;
        self
    }

    /// Sleeps before returning the administrator list.
    pub fn slow_admins(mut self, delay: Duration) -> Self {
        self.admins_delay = Some(delay);
        self
    }
}

#[async_trait]
impl BotGateway for MockGateway {
    async fn get_chat_administrators(&self, chat_id: i64) -> Result<Vec<ChatMember>> {
        self.chat.record(Call::GetAdministrators(chat_id));
        if let Some(delay) = self.admins_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.chat.admins.clone())
    }

    async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.chat.record(Call::Ban(chat_id, user_id));
        if self.failing_bans.contains(&user_id) {
            return Err(DbotError::Bot("Bad Request: not enough rights".to_string()));
        }
        self.chat
            .members
            .lock()
            .unwrap()
            .retain(|m| m.user_id != user_id);
        Ok(())
    }

    async fn set_commands(&self, commands: &[BotCommandSpec]) -> Result<()> {
        self.chat.record(Call::SetCommands(
            commands.iter().map(|c| c.command.clone()).collect(),
        ));
        Ok(())
    }

    async fn reply(&self, _event: &CommandEvent, html: &str) -> Result<()> {
        self.chat.record(Call::Reply(html.to_string()));
        if self.fail_reply {
            return Err(DbotError::Bot("Forbidden: bot was kicked".to_string()));
        }
        Ok(())
    }
}

pub struct MockDirectory {
    chat: Arc<FakeChat>,
    delay: Option<Duration>,
}

impl MockDirectory {
    pub fn new(chat: Arc<FakeChat>) -> Self {
        Self { chat, delay: None }
    }

    /// Sleeps before answering, to exercise timeouts.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl MemberDirectory for MockDirectory {
    async fn list_members(&self, chat_id: i64, cap: Option<usize>) -> Result<Vec<ChatMember>> {
        self.chat.record(Call::ListMembers(chat_id, cap));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let members = self.chat.members.lock().unwrap().clone();
        Ok(match cap {
            Some(cap) => members.into_iter().take(cap).collect(),
            None => members,
        })
    }
}

pub fn admin(user_id: i64, can_restrict_members: bool) -> ChatMember {
    ChatMember {
        status: MemberStatus::Administrator,
        can_restrict_members,
        ..ChatMember::member(user_id)
    }
}

pub fn creator(user_id: i64) -> ChatMember {
    ChatMember {
        status: MemberStatus::Creator,
        ..ChatMember::member(user_id)
    }
}

pub fn deleted(user_id: i64) -> ChatMember {
    ChatMember {
        deleted_account: true,
        ..ChatMember::member(user_id)
    }
}

pub fn event(chat_type: ChatType, command: &str, argument: &str) -> CommandEvent {
    CommandEvent {
        chat_id: CHAT_ID,
        chat_type,
        user_id: ADMIN_ID,
        language_code: Some("en".to_string()),
        message_id: 42,
        command: command.to_string(),
        argument: argument.to_string(),
        bot: BotIdentity {
            id: BOT_ID,
            username: Some("cleaner_bot".to_string()),
        },
        received_at: Utc::now(),
    }
}
