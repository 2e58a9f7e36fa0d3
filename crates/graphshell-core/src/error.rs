//! Error types for graphshell

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphshellError {
    // Startup errors
    #[error("{var} is not set correctly (missing or still the placeholder value)")]
    MissingApiKey { var: String },

    #[error("Workspace '{name}' does not exist at {path}")]
    WorkspaceNotFound { name: String, path: PathBuf },

    #[error("Invalid workspace name '{name}': {reason}")]
    InvalidWorkspaceName { name: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Table errors
    #[error("Failed to load table '{name}': {reason}")]
    TableLoad { name: String, reason: String },

    #[error("Critical tables missing: {}. Run with --index first", .names.join(", "))]
    CriticalTableMissing { names: Vec<String> },

    #[error("Output directory is empty: {path}. Run with --index first")]
    OutputEmpty { path: PathBuf },

    // Collaborator errors
    #[error("Indexing failed: {reason}")]
    IndexFailed { reason: String },

    #[error("Retrieval engine unavailable: {reason}. Try: {remediation}")]
    EngineUnavailable { reason: String, remediation: String },

    #[error("{mode} search failed: {reason}")]
    Search { mode: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GraphshellError {
    /// Errors raised before any external call is made.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            GraphshellError::MissingApiKey { .. }
                | GraphshellError::WorkspaceNotFound { .. }
                | GraphshellError::InvalidWorkspaceName { .. }
                | GraphshellError::ConfigInvalid { .. }
        )
    }
}

impl From<serde_json::Error> for GraphshellError {
    fn from(err: serde_json::Error) -> Self {
        GraphshellError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraphshellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_table_message_lists_every_name() {
        let err = GraphshellError::CriticalTableMissing {
            names: vec!["entities".to_string(), "communities".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Critical tables missing: entities, communities. Run with --index first"
        );
    }

    #[test]
    fn test_startup_classification() {
        let missing_key = GraphshellError::MissingApiKey { var: "GRAPHRAG_API_KEY".to_string() };
        assert!(missing_key.is_startup());

        let search = GraphshellError::Search {
            mode: "global".to_string(),
            reason: "boom".to_string(),
        };
        assert!(!search.is_startup());
    }
}
