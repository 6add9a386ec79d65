//! Empty-state placeholder.

use leptos::prelude::*;

/// Welcome message shown only while the conversation is empty.
#[component]
pub fn WelcomeMessage() -> impl IntoView {
    view! {
        <div class="welcome-message">
            <div class="welcome-icon">"\u{2728}"</div>
            <h2>"Welcome"</h2>
            <p>"Ask me anything, and I'll do my best to help you!"</p>
        </div>
    }
}
