//! Main chat event loop
//!
//! One current-thread runtime drives everything: terminal events, the single
//! in-flight submission and redraws triggered by store changes.

pub mod commands;
mod event_loop;
pub mod lifecycle;
pub mod view;

pub use event_loop::{run_chat, UiEvent};
