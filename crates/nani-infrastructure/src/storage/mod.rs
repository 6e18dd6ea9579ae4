//! Filesystem primitives.
//!
//! # Module Structure
//!
//! - `artifact_store`: JSON read/write/list/remove inside the workspace root
//! - `action_log`: Daily append-only action log
//! - `atomic_toml`: Whole-file TOML persistence for the user config

mod action_log;
mod artifact_store;
mod atomic_toml;

pub use action_log::ActionLog;
pub use artifact_store::ArtifactStore;
pub use atomic_toml::AtomicTomlFile;
