//! Role domain module.
//!
//! A role is a named persona assignable to a session. Roles are stored one per
//! file and referenced from sessions by name only.
//!
//! # Module Structure
//!
//! - `model`: `Role`
//! - `preset`: built-in roles seeded into every workspace

mod model;
mod preset;

pub use model::{Role, validate_artifact_key};
pub use preset::{default_documenter, get_default_presets};
