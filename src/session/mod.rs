//! Conversation state.
//!
//! Each browser gets a cookie-keyed [`Session`] holding the ordered message
//! sequence since the last clear. State is purely in-memory and lost on
//! restart; the upstream backend owns anything more durable.

mod thread;

pub use thread::{DEFAULT_SESSION_TIMEOUT, Message, Role, Session, SessionStore};
