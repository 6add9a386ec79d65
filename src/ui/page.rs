//! Page shell and widget markup.
//!
//! The interactive wiring of the widget lives here as declarative HTMX and
//! Alpine.js attributes emitted by the server, plus two small helpers in an
//! inline script:
//!
//! - send enabled iff the trimmed input is non-empty (Alpine binding)
//! - Enter sends, Shift+Enter inserts a newline; Enter is a no-op while a
//!   send is already in flight (the `htmx-request` guard, since
//!   `requestSubmit()` does not consult the disabled send button)
//! - the textarea grows to fit its content
//! - when a send request starts, the input is cleared and the user's text
//!   is appended to the list as a provisional bubble; the settle swap
//!   replaces it with the server-rendered list
//! - `hx-indicator` shows the typing indicator exactly while a send request
//!   is in flight, and `hx-disabled-elt` disables the send and clear
//!   controls for the same window (the pending flag)
//! - focus returns to the input after a send settles and after a
//!   successful clear
//! - `hx-confirm` gates the clear control behind a blocking yes/no prompt
//! - a failed clear surfaces a blocking alert and leaves the view unchanged

use leptos::prelude::*;

use crate::session::Message;

use super::chat::{TypingIndicator, render_message_list};
use super::components::{SendIcon, TrashIcon};

/// Render the full chat page for the current conversation state.
#[must_use]
pub fn render_index(title: &str, messages: &[Message]) -> String {
    html_shell(title, &chat_content(title, &render_message_list(messages)))
}

/// Generate the HTML shell for the application.
fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>

    <!-- HTMX and Alpine.js (local vendor assets) -->
    <script src="/static/vendor/htmx.min.js"></script>
    <script defer src="/static/vendor/alpine.min.js"></script>

    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <main id="app">
        {content}
    </main>
</body>
</html>"#
    )
}

/// Chat widget markup: header with clear control, message area, send form.
fn chat_content(title: &str, list_html: &str) -> String {
    let typing_indicator = view! { <TypingIndicator /> }.to_html();
    let send_icon = view! { <SendIcon class="icon" /> }.to_html();
    let trash_icon = view! { <TrashIcon class="icon" /> }.to_html();

    format!(
        r##"
    <div class="chat-shell">
        <header class="chat-header">
            <h1>{title}</h1>
            <button
                type="button"
                id="clear-btn"
                class="clear-btn"
                title="Clear conversation"
                hx-post="/chat/clear"
                hx-target="#chat-messages"
                hx-swap="innerHTML"
                hx-confirm="Are you sure you want to clear the conversation?"
                hx-on--response-error="alert('Failed to clear chat. Please try again.')"
                hx-on--after-request="if (event.detail.successful) document.getElementById('message-input').focus()"
            >{trash_icon}</button>
        </header>

        <div class="chat-container" id="chat-scroll">
            <div id="chat-messages">{list_html}</div>
            {typing_indicator}
        </div>

        <div class="input-area">
            <form
                id="chat-form"
                hx-post="/chat/send"
                hx-target="#chat-messages"
                hx-swap="innerHTML"
                hx-indicator="#typing-indicator"
                hx-disabled-elt="#send-btn, #clear-btn"
                hx-on--before-request="beginSend(this)"
                hx-on--after-request="this.querySelector('textarea').focus(); scrollChat();"
                x-data="{{ message: '' }}"
            >
                <textarea
                    name="message"
                    id="message-input"
                    placeholder="Type your message..."
                    rows="1"
                    x-model="message"
                    x-on:keydown.enter="if (!$event.shiftKey) {{ $event.preventDefault(); if (message.trim() && !$el.form.classList.contains('htmx-request')) $el.form.requestSubmit(); }}"
                    x-on:input="$el.style.height = 'auto'; $el.style.height = $el.scrollHeight + 'px'"
                    autofocus
                ></textarea>
                <button
                    type="submit"
                    id="send-btn"
                    class="send-btn"
                    :disabled="!message.trim()"
                >{send_icon}</button>
            </form>
            <p class="input-hint">Press Enter to send, Shift+Enter for new line</p>
        </div>

        <script>
            function scrollChat() {{
                const c = document.getElementById('chat-scroll');
                c.scrollTo({{top: c.scrollHeight, behavior: 'smooth'}});
            }}

            // Runs when a send request starts: clear the input so a second
            // Enter cannot resubmit the same text, and show the user's
            // message right away as a provisional bubble. The settle swap
            // replaces the whole list with the server-rendered fragment.
            // The request parameters are captured before this fires, so
            // clearing here does not affect the outgoing message.
            function beginSend(form) {{
                const input = form.querySelector('textarea');
                const text = input.value.trim();
                if (text) {{
                    const list = document.getElementById('chat-messages');
                    const welcome = list.querySelector('.welcome-message');
                    if (welcome) welcome.remove();
                    const bubble = document.createElement('div');
                    bubble.className = 'message user-message';
                    const body = document.createElement('div');
                    body.className = 'message-text';
                    body.textContent = text;
                    bubble.appendChild(body);
                    list.appendChild(bubble);
                }}
                input.value = '';
                input.dispatchEvent(new Event('input'));
                scrollChat();
            }}
        </script>
    </div>
    "##
    )
}
