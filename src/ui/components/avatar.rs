//! Avatar component showing a role initial.

use leptos::prelude::*;

/// Circular avatar with a single-letter initial.
#[component]
pub fn Avatar(
    /// Initial shown inside the circle.
    initial: &'static str,
    /// Role CSS class fragment (`user` or `assistant`).
    role_class: &'static str,
) -> impl IntoView {
    let classes = format!("message-avatar {role_class}");

    view! { <span class=classes>{initial}</span> }
}
