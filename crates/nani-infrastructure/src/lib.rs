//! Filesystem-backed persistence for Nani workspaces.
//!
//! All operations are synchronous and assume a single writing process per
//! workspace directory.
//!
//! # Module Structure
//!
//! - `paths`: Workspace layout and the user config location
//! - `storage`: JSON artifact store, action log, atomic TOML files
//! - `dto`: On-disk shapes that differ from the domain models
//! - `workspace`: The long-lived `Workspace` owning the context
//! - `index_manager`, `role_registry`, `preference_store`, `session_manager`:
//!   Handles borrowed from a `Workspace` for each artifact kind
//! - `config_service`: Loading and saving `config.toml`

pub mod config_service;
pub mod dto;
pub mod index_manager;
pub mod paths;
pub mod preference_store;
pub mod role_registry;
pub mod session_manager;
pub mod storage;
pub mod workspace;

pub use crate::config_service::ConfigService;
pub use crate::index_manager::IndexManager;
pub use crate::preference_store::PreferenceStore;
pub use crate::role_registry::RoleRegistry;
pub use crate::session_manager::SessionManager;
pub use crate::workspace::Workspace;
