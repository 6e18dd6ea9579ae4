//! Role DTOs.
//!
//! Full role files decode straight into `nani_core::role::Role`; only the
//! index needs a narrower view.

use serde::Deserialize;

use nani_core::context::RoleSummary;

/// Partial view of a role file. The persona text is not kept.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleSummaryDTO {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl From<RoleSummaryDTO> for RoleSummary {
    fn from(dto: RoleSummaryDTO) -> Self {
        RoleSummary {
            name: dto.name,
            label: dto.label,
            description: dto.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_role_file() {
        let text = r#"{
            "name": "reviewer",
            "label": "Code Reviewer",
            "persona": "A very long persona...",
            "description": "Reviews diffs"
        }"#;
        let summary: RoleSummary = serde_json::from_str::<RoleSummaryDTO>(text).unwrap().into();
        assert_eq!(summary.name, "reviewer");
        assert_eq!(summary.label, "Code Reviewer");
        assert_eq!(summary.description, "Reviews diffs");
    }

    #[test]
    fn test_name_is_required() {
        assert!(serde_json::from_str::<RoleSummaryDTO>(r#"{"label": "x"}"#).is_err());
    }
}
