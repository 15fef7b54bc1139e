//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that turns key presses into submissions
//!   and slash commands, and redraws when the shared store changes.
//! - [`renderer`]: frame layout for the transcript, agent panel and input.
//! - [`widgets`]: per-message line builders, shared with the `say` command.
//! - [`theme`]: terminal styles for each global theme.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
pub mod widgets;
