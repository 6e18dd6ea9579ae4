//! Workspace context domain module.
//!
//! The `Context` record is the single workspace-wide document: settings,
//! informational project metadata, and the three artifact indexes that mirror
//! what is on disk.
//!
//! # Module Structure
//!
//! - `model`: `Context`, `Settings`, `Project`
//! - `index`: `ArtifactIndexes` and the summary types kept inside it

mod index;
mod model;

pub use index::{
    ArtifactIndexes, PREFERENCE_SNIPPET_LIMIT, PreferenceSummary, RoleSummary, SessionSummary,
};
pub use model::{
    Context, DEFAULT_LANGUAGE, DEFAULT_ROLE_NAME, DEFAULT_SYSTEM_PROMPT, Project, Settings,
};
