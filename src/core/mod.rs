pub mod config;
pub mod constants;
pub mod conversation;
pub mod generation;
pub mod interpreter;
pub mod message;
pub mod orchestrator;
pub mod session;
pub mod steps;
pub mod store;
pub mod theme;
