//! Chat-specific view pieces.

mod bubble;
mod indicator;
mod message_list;
mod welcome;

pub use bubble::MessageBubble;
pub use indicator::TypingIndicator;
pub use message_list::render_message_list;
pub use welcome::WelcomeMessage;
