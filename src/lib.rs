//! VIBE_OS Architect is a terminal chat panel that asks a generative model for
//! replies and renders structured ones as charts, trackers, palettes or alerts.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the reply interpreter, the observable UI store, the
//!   conversation log and the orchestration of one request.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`api`] defines the `generateContent` payloads exchanged with the service.
//! - [`utils`] holds attachment loading, transcript logging and diagnostics.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
