//! # Middleware crate for the moderation bot
//!
//! [`LoggingMiddleware`] logs every command event in development builds; [`SessionMiddleware`]
//! makes sure each chat has a [`Session`] in the configured [`SessionStore`] before handlers run.

mod middleware;
mod session;

#[cfg(test)]
mod test;

pub use middleware::LoggingMiddleware;
pub use session::{InMemorySessionStore, Session, SessionMiddleware, SessionStore};
