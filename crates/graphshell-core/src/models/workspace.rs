use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sub-directory of the output root holding the vector index
pub const VECTOR_STORE_SUBDIR: &str = "lancedb";

/// Directory layout owned by one named workspace.
///
/// Every path is below `<workspaces_root>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceLayout {
    /// Workspace name as given on the command line
    pub name: String,

    /// `<workspaces_root>/<name>`
    pub root: PathBuf,

    pub input: PathBuf,
    pub output: PathBuf,
    pub cache: PathBuf,
    pub logs: PathBuf,

    /// Vector index location, inside the output root
    pub vector_store: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(workspaces_root: &Path, name: &str) -> Self {
        let root = workspaces_root.join(name);
        let output = root.join("output");
        Self {
            name: name.to_string(),
            input: root.join("input"),
            vector_store: output.join(VECTOR_STORE_SUBDIR),
            output,
            cache: root.join("cache"),
            logs: root.join("logs"),
            root,
        }
    }

    /// The five isolated roots, in input/output/cache/logs/vector-store order
    pub fn roots(&self) -> [&Path; 5] {
        [&self.input, &self.output, &self.cache, &self.logs, &self.vector_store]
    }

    /// Directories created on first use
    pub fn managed_dirs(&self) -> [&Path; 4] {
        [&self.input, &self.output, &self.cache, &self.logs]
    }
}
