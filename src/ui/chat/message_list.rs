//! Message list rendering.

use leptos::prelude::*;

use crate::session::Message;

use super::{MessageBubble, WelcomeMessage};

/// Render the message list fragment for the current conversation state.
///
/// This is the single render path for the list container: the full page, a
/// send response, and a clear response all produce their markup here, so
/// the view is always a pure function of the message sequence. An empty
/// sequence renders the welcome placeholder.
#[must_use]
pub fn render_message_list(messages: &[Message]) -> String {
    if messages.is_empty() {
        return view! { <WelcomeMessage /> }.to_html();
    }

    messages
        .iter()
        .map(|m| {
            view! {
                <MessageBubble
                    role=m.role
                    text=m.text.clone()
                    timestamp=m.timestamp.clone()
                />
            }
            .to_html()
        })
        .collect()
}
