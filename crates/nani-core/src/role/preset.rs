//! Built-in role presets.

use super::model::Role;
use crate::context::DEFAULT_ROLE_NAME;

/// The role every workspace is seeded with; also the initial default role.
pub fn default_documenter() -> Role {
    Role {
        name: DEFAULT_ROLE_NAME.to_string(),
        label: "Code Documenter".to_string(),
        persona: "You are a meticulous technical writer who creates clear, detailed markdown documentation with a high level of verbosity, including examples where appropriate, and adheres to user-specified preferences.".to_string(),
        description: "Generates detailed documentation for code files, tailored to user preferences in markdown format.".to_string(),
    }
}

/// Returns the system-defined roles seeded into a new workspace.
pub fn get_default_presets() -> Vec<Role> {
    vec![default_documenter()]
}
