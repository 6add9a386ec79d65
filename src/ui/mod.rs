//! View layer.
//!
//! Two rendering idioms, used side by side:
//!
//! - [`components`] and [`chat`] hold Leptos SSR components for everything
//!   rendered from conversation state (bubbles, typing indicator, welcome
//!   placeholder). Fragments are pure functions of the message sequence.
//! - [`page`] holds the `format!`-string HTML shell carrying the HTMX and
//!   Alpine.js wiring for the widget itself (send form, clear control,
//!   pending-state attributes).

pub mod chat;
pub mod components;
pub mod page;
