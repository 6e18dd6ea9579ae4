//! Application layer for Nani.
//!
//! Coordinates the workspace store and a completion provider: prompt
//! assembly, the single in-flight request with its timeout and cancellation,
//! and startup wiring.

pub mod bootstrap;
pub mod chat_service;
pub mod prompt;
pub mod telemetry;

pub use bootstrap::{App, bootstrap, open_workspace};
pub use chat_service::{ChatService, REQUEST_TIMEOUT, Reply};
pub use telemetry::init_tracing;
