//! # Handler chain
//!
//! Runs a sequence of middleware (before/after) and command handlers for each [`CommandEvent`].
//! Middleware can stop the chain; the first handler that returns Stop or Reply ends handler
//! execution; handlers that do not own the command return Ignore. `after` callbacks run in reverse order.

use dbot_core::{CommandEvent, Handler, HandlerResponse, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of middleware and handlers.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware (before runs in insertion order, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs middleware before, then handlers, then middleware after in reverse.
    /// Returns the first Stop or Reply; Ignore when no handler owns the command.
    #[instrument(skip(self, event), fields(command = %event.command))]
    pub async fn handle(&self, event: &CommandEvent) -> Result<HandlerResponse> {
        info!(
            user_id = event.user_id,
            chat_id = event.chat_id,
            "step: handler_chain started"
        );

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            if !mw.before(event).await? {
                info!(
                    user_id = event.user_id,
                    middleware = %mw_name,
                    "step: middleware before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
            debug!(middleware = %mw_name, "step: middleware before done");
        }

        let mut final_response = HandlerResponse::Ignore;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(event).await?;
            debug!(handler = %handler_name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        user_id = event.user_id,
                        handler = %handler_name,
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue => {
                    final_response = HandlerResponse::Continue;
                }
                HandlerResponse::Ignore => {}
            }
        }

        for mw in self.middleware.iter().rev() {
            mw.after(event, &final_response).await?;
        }

        info!(
            user_id = event.user_id,
            chat_id = event.chat_id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
