//! grammers-backed [`MemberDirectory`] with a pooled, lazily signed-in client.

use async_trait::async_trait;
use dbot_core::{ChatMember, DbotError, MemberDirectory, Result};
use grammers_client::{Client, Config, InvocationError};
use grammers_session::{PackedChat, PackedType, Session};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::credentials::MtprotoCredentials;

/// Bot API encodes supergroup ids as `-100` followed by the channel id.
const CHANNEL_ID_OFFSET: i64 = 1_000_000_000_000;

/// Progress is logged every this many members (the server pages by 200).
const PROGRESS_EVERY: usize = 1000;

/// Converts a Bot API supergroup id (`-1001234567890`) to the MTProto channel id (`1234567890`).
pub fn channel_id_from_bot_api(chat_id: i64) -> Result<i64> {
    chat_id
        .checked_neg()
        .filter(|id| *id > CHANNEL_ID_OFFSET)
        .map(|id| id - CHANNEL_ID_OFFSET)
        .ok_or_else(|| DbotError::Directory(format!("chat {} is not a supergroup id", chat_id)))
}

/// RPC errors after which the signed-in session is no longer usable.
fn authorization_revoked(code: i32, name: &str) -> bool {
    code == 401 || name.starts_with("AUTH_KEY") || name == "SESSION_REVOKED"
}

fn is_authorization_error(e: &InvocationError) -> bool {
    matches!(e, InvocationError::Rpc(rpc) if authorization_revoked(rpc.code, &rpc.name))
}

/// One connection shared by every command; connected and signed in on first use, dropped when
/// the server revokes its authorization.
pub struct GrammersMemberDirectory {
    credentials: MtprotoCredentials,
    client: Mutex<Option<Client>>,
}

impl GrammersMemberDirectory {
    pub fn new(credentials: MtprotoCredentials) -> Self {
        Self {
            credentials,
            client: Mutex::new(None),
        }
    }

    async fn client(&self) -> Result<Client> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = self.connect().await?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Maps an RPC failure, dropping the pooled client when its authorization is gone.
    async fn invocation_error(&self, e: InvocationError) -> DbotError {
        if is_authorization_error(&e) {
            warn!(error = %e, "Privileged session revoked, signing in again on next use");
            *self.client.lock().await = None;
        }
        DbotError::Directory(e.to_string())
    }

    #[instrument(skip(self))]
    async fn connect(&self) -> Result<Client> {
        self.credentials.validate()?;

        let session = match &self.credentials.session_file {
            Some(path) => Session::load_file_or_create(path)?,
            None => Session::new(),
        };

        let client = Client::connect(Config {
            session,
            api_id: self.credentials.api_id,
            api_hash: self.credentials.api_hash.clone(),
            params: Default::default(),
        })
        .await
        .map_err(|e| DbotError::Directory(format!("connect failed: {}", e)))?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| DbotError::Directory(e.to_string()))?;
        if !authorized {
            client
                .bot_sign_in(&self.credentials.bot_token)
                .await
                .map_err(|e| DbotError::Directory(format!("bot sign-in failed: {}", e)))?;
            if let Some(path) = &self.credentials.session_file {
                client.session().save_to_file(path)?;
            }
        }
        info!("step: privileged client signed in");

        Ok(client)
    }
}

#[async_trait]
impl MemberDirectory for GrammersMemberDirectory {
    #[instrument(skip(self))]
    async fn list_members(&self, chat_id: i64, cap: Option<usize>) -> Result<Vec<ChatMember>> {
        let chat = PackedChat {
            ty: PackedType::Megagroup,
            id: channel_id_from_bot_api(chat_id)?,
            access_hash: None,
        };
        let client = self.client().await?;

        let mut participants = client.iter_participants(chat);
        let mut members = Vec::new();
        loop {
            let participant = match participants.next().await {
                Ok(Some(participant)) => participant,
                Ok(None) => break,
                Err(e) => return Err(self.invocation_error(e).await),
            };
            let user = &participant.user;
            members.push(ChatMember {
                deleted_account: user.deleted(),
                display_name: Some(user.full_name()),
                ..ChatMember::member(user.id())
            });

            if members.len() % PROGRESS_EVERY == 0 {
                debug!(fetched = members.len(), "Fetching members");
            }
            if cap.is_some_and(|cap| members.len() >= cap) {
                info!(cap = ?cap, "Member cap reached");
                break;
            }
        }

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_from_bot_api() {
        assert_eq!(channel_id_from_bot_api(-1001234567890).unwrap(), 1234567890);
        assert_eq!(channel_id_from_bot_api(-1000000000001).unwrap(), 1);
    }

    #[test]
    fn test_basic_group_and_user_ids_rejected() {
        assert!(channel_id_from_bot_api(-123456).is_err());
        assert!(channel_id_from_bot_api(-1000000000000).is_err());
        assert!(channel_id_from_bot_api(42).is_err());
        assert!(channel_id_from_bot_api(i64::MIN).is_err());
    }

    #[test]
    fn test_authorization_revoked_errors() {
        assert!(authorization_revoked(401, "AUTH_KEY_UNREGISTERED"));
        assert!(authorization_revoked(401, "SESSION_REVOKED"));
        assert!(authorization_revoked(406, "AUTH_KEY_DUPLICATED"));
        assert!(!authorization_revoked(400, "CHANNEL_INVALID"));
        assert!(!authorization_revoked(420, "FLOOD_WAIT"));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let directory = GrammersMemberDirectory::new(MtprotoCredentials {
            api_id: 0,
            api_hash: String::new(),
            bot_token: "123:abc".to_string(),
            session_file: None,
        });
        let err = directory.list_members(-1001234567890, None).await.unwrap_err();
        assert!(matches!(err, DbotError::Config(_)));

        // a failed connect is not cached; the next command tries again
        assert!(directory.client.lock().await.is_none());
        let err = directory.list_members(-1001234567890, None).await.unwrap_err();
        assert!(matches!(err, DbotError::Config(_)));
    }
}
