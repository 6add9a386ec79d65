//! A single chat message bubble.

use leptos::prelude::*;

use crate::markup::format_message_text;
use crate::session::Role;
use crate::ui::components::Avatar;

/// One chat entry: avatar, role/time header, formatted message body.
///
/// Message text goes through [`format_message_text`], so backend replies and
/// error bubbles render the same way and user text cannot inject HTML.
#[component]
pub fn MessageBubble(
    /// Message author.
    role: Role,
    /// Raw message text.
    text: String,
    /// Local-time label captured at message creation.
    timestamp: String,
) -> impl IntoView {
    let classes = format!("message {}-message", role.css_class());
    let body = format_message_text(&text);

    view! {
        <div class=classes>
            <Avatar initial=role.initial() role_class=role.css_class() />
            <div class="message-content">
                <div class="message-header">
                    <span class="message-role">{role.label()}</span>
                    <span class="message-time">{timestamp}</span>
                </div>
                <div class="message-text" inner_html=body></div>
            </div>
        </div>
    }
}
