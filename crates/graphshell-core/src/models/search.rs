use crate::config::QueryConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Retrieval algorithm served by the external engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Global,
    Local,
    Drift,
    Basic,
}

impl SearchMode {
    /// Map the mode prompt answer to a mode.
    ///
    /// `1`-`4` or the mode name select a mode; anything else, including an
    /// empty answer, selects global search.
    pub fn from_selector(selector: &str) -> SearchMode {
        match selector.trim().to_lowercase().as_str() {
            "2" | "local" => SearchMode::Local,
            "3" | "drift" => SearchMode::Drift,
            "4" | "basic" => SearchMode::Basic,
            _ => SearchMode::Global,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Global => "global",
            SearchMode::Local => "local",
            SearchMode::Drift => "drift",
            SearchMode::Basic => "basic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Global => "Global",
            SearchMode::Local => "Local",
            SearchMode::Drift => "Drift",
            SearchMode::Basic => "Basic",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed alongside the tables on every retrieval call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub community_level: u32,
    pub response_type: String,
    pub dynamic_community_selection: bool,
}

impl From<&QueryConfig> for SearchOptions {
    fn from(config: &QueryConfig) -> Self {
        Self {
            community_level: config.community_level,
            response_type: config.response_type.clone(),
            dynamic_community_selection: config.dynamic_community_selection,
        }
    }
}

/// Result of one retrieval call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub response: String,

    /// Opaque context data; not rendered by this layer
    #[serde(default)]
    pub context: serde_json::Value,
}
