use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{CommandEvent, HandlerResponse, Middleware, Result};
use tracing::{debug, info, instrument};

/// Logs each command event in before() and the response with handling time in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &CommandEvent) -> Result<bool> {
        info!(
            user_id = event.user_id,
            chat_id = event.chat_id,
            chat_type = event.chat_type.as_str(),
            command = %event.command,
            argument = %event.argument,
            "Received command"
        );
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &CommandEvent, response: &HandlerResponse) -> Result<()> {
        let elapsed_ms = (Utc::now() - event.received_at).num_milliseconds();
        debug!(
            message_id = event.message_id,
            response = ?response,
            elapsed_ms,
            "Processed command"
        );
        Ok(())
    }
}
