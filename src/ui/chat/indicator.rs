//! Typing indicator shown while a send request is in flight.

use leptos::prelude::*;

use crate::ui::components::Avatar;

/// Three-dot typing placeholder.
///
/// Carries the `htmx-indicator` class: HTMX shows it when the send request
/// starts and hides it when the request settles, on every exit path. It
/// lives outside the swapped message container so it is never duplicated.
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div id="typing-indicator" class="typing-indicator htmx-indicator">
            <Avatar initial="A" role_class="assistant" />
            <div class="typing-dots">
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
            </div>
        </div>
    }
}
