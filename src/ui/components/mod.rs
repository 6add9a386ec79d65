//! Reusable UI components rendered via Leptos SSR.

mod avatar;
mod icons;

pub use avatar::Avatar;
pub use icons::{SendIcon, TrashIcon};
