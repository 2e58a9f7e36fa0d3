use crate::error::{GraphshellError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the shared base settings file at the project root
pub const SETTINGS_FILE: &str = "settings.toml";

/// Environment variable holding the key for LLM-backed calls
pub const DEFAULT_API_KEY_ENV: &str = "GRAPHRAG_API_KEY";

/// Value shipped in template `.env` files; treated the same as a missing key
pub const API_KEY_PLACEHOLDER: &str = "<API_KEY>";

/// Vector store entry that gets isolated per workspace
pub const DEFAULT_VECTOR_STORE: &str = "default_vector_store";

/// Base configuration shared by every workspace.
///
/// Loaded once from [`SETTINGS_FILE`], then rewritten in place by
/// [`crate::workspace::PathResolver`]. After that single mutation it is only
/// ever passed around by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputConfig,
    pub output: StorageConfig,
    pub cache: StorageConfig,
    pub reporting: StorageConfig,
    pub vector_store: BTreeMap<String, VectorStoreConfig>,
    pub engine: EngineConfig,
    pub query: QueryConfig,
}

impl Default for Settings {
    fn default() -> Self {
        let mut vector_store = BTreeMap::new();
        vector_store.insert(
            DEFAULT_VECTOR_STORE.to_string(),
            VectorStoreConfig {
                kind: "lancedb".to_string(),
                db_uri: "output/lancedb".to_string(),
                container_name: None,
            },
        );

        Self {
            input: InputConfig {
                base_dir: PathBuf::from("input"),
                storage: None,
            },
            output: StorageConfig::file("output"),
            cache: StorageConfig::file("cache"),
            reporting: StorageConfig::file("logs"),
            vector_store,
            engine: EngineConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

/// Input section. Older settings files carry the directory directly,
/// newer ones nest it under `[input.storage]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub base_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub base_dir: PathBuf,
}

impl StorageConfig {
    pub fn file(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: "file".to_string(),
            base_dir: base_dir.into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::file(PathBuf::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    #[serde(rename = "type", default = "default_vector_store_kind")]
    pub kind: String,
    #[serde(default)]
    pub db_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

fn default_vector_store_kind() -> String {
    "lancedb".to_string()
}

/// Where the external indexing pipeline and retrieval service live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the retrieval service
    pub endpoint: String,

    /// Indexer command line; `{root}` and `{workspace}` are substituted
    pub index_command: Vec<String>,

    /// Per-request timeout for retrieval calls
    pub timeout_secs: u64,

    /// Environment variable carrying the API key
    pub api_key_env: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8010".to_string(),
            index_command: vec![
                "graphrag-indexer".to_string(),
                "--root".to_string(),
                "{root}".to_string(),
            ],
            timeout_secs: 300,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Fixed options handed to every retrieval call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub community_level: u32,
    pub response_type: String,
    pub dynamic_community_selection: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            community_level: 2,
            response_type: "Multiple Paragraphs".to_string(),
            dynamic_community_selection: false,
        }
    }
}

impl Settings {
    /// Load `settings.toml` from `root` (defaults when absent), then apply
    /// environment overrides.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        let settings = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            tracing::warn!(path = %path.display(), "settings file not found, using defaults");
            Self::default()
        };
        Ok(settings.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GraphshellError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read {}: {}", path.as_ref().display(), e),
            })?;

        toml::from_str(&content).map_err(|e| GraphshellError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })
    }

    /// Apply `GRAPHSHELL_*` environment overrides on top of file values
    pub fn load_from_env(mut self) -> Self {
        if let Ok(endpoint) = env::var("GRAPHSHELL_ENGINE_ENDPOINT") {
            self.engine.endpoint = endpoint;
        }

        if let Ok(command) = env::var("GRAPHSHELL_INDEX_COMMAND") {
            let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
            if parts.is_empty() {
                tracing::warn!("Ignoring empty GRAPHSHELL_INDEX_COMMAND");
            } else {
                self.engine.index_command = parts;
            }
        }

        if let Ok(level) = env::var("GRAPHSHELL_COMMUNITY_LEVEL") {
            match level.parse::<u32>() {
                Ok(level) => self.query.community_level = level,
                Err(_) => tracing::warn!(
                    "Invalid GRAPHSHELL_COMMUNITY_LEVEL value '{}': expected a non-negative integer",
                    level
                ),
            }
        }

        if let Ok(response_type) = env::var("GRAPHSHELL_RESPONSE_TYPE") {
            self.query.response_type = response_type;
        }

        self
    }

    /// Directory the indexer reads documents from
    pub fn input_dir(&self) -> &Path {
        match &self.input.storage {
            Some(storage) => &storage.base_dir,
            None => &self.input.base_dir,
        }
    }

    pub(crate) fn set_input_dir(&mut self, dir: PathBuf) {
        match &mut self.input.storage {
            Some(storage) => storage.base_dir = dir,
            None => self.input.base_dir = dir,
        }
    }

    pub fn default_vector_store(&self) -> Option<&VectorStoreConfig> {
        self.vector_store.get(DEFAULT_VECTOR_STORE)
    }
}

/// Read and validate the API key from the process environment
pub fn require_api_key(var: &str) -> Result<String> {
    validate_api_key(var, env::var(var).ok().as_deref())
}

/// Reject a missing, blank, or placeholder key
pub fn validate_api_key(var: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key.to_string()),
        _ => Err(GraphshellError::MissingApiKey { var: var.to_string() }),
    }
}
