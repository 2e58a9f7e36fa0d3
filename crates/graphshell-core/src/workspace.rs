//! Per-workspace isolation of the base settings

use crate::config::{Settings, DEFAULT_VECTOR_STORE};
use crate::error::{GraphshellError, Result};
use crate::models::WorkspaceLayout;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory under the project root that holds every workspace
pub const WORKSPACES_DIR: &str = "workspaces";

/// Derives a workspace's directory layout and points the settings at it
#[derive(Debug, Clone)]
pub struct PathResolver {
    workspaces_root: PathBuf,
}

impl PathResolver {
    pub fn new(workspaces_root: impl Into<PathBuf>) -> Self {
        Self {
            workspaces_root: workspaces_root.into(),
        }
    }

    /// Resolver for `<project_root>/workspaces`
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(WORKSPACES_DIR))
    }

    pub fn workspaces_root(&self) -> &Path {
        &self.workspaces_root
    }

    /// Compute the layout for `name` without touching the filesystem
    pub fn layout(&self, name: &str) -> Result<WorkspaceLayout> {
        validate_workspace_name(name)?;
        Ok(WorkspaceLayout::new(&self.workspaces_root, name))
    }

    /// Isolate `settings` to workspace `name`.
    ///
    /// The workspace directory must already exist. Input, output, cache and
    /// reporting directories are rewritten and created if missing; the
    /// `default_vector_store` entry, when configured, is moved under the
    /// workspace output. Other vector store entries are left untouched.
    pub fn resolve(&self, name: &str, settings: &mut Settings) -> Result<WorkspaceLayout> {
        let layout = self.layout(name)?;

        if !layout.root.is_dir() {
            return Err(GraphshellError::WorkspaceNotFound {
                name: name.to_string(),
                path: layout.root.clone(),
            });
        }

        settings.set_input_dir(layout.input.clone());
        settings.output.base_dir = layout.output.clone();
        settings.cache.base_dir = layout.cache.clone();
        settings.reporting.base_dir = layout.logs.clone();

        if let Some(store) = settings.vector_store.get_mut(DEFAULT_VECTOR_STORE) {
            store.db_uri = layout.vector_store.to_string_lossy().into_owned();
        }
        for id in settings.vector_store.keys().filter(|id| *id != DEFAULT_VECTOR_STORE) {
            tracing::debug!(vector_store = %id, "Vector store not isolated, left as configured");
        }

        for dir in layout.managed_dirs() {
            fs::create_dir_all(dir)?;
        }

        tracing::info!(
            workspace = %layout.name,
            root = %layout.root.display(),
            "Workspace paths isolated"
        );

        Ok(layout)
    }
}

/// A workspace name must be a single plain path component
fn validate_workspace_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| GraphshellError::InvalidWorkspaceName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(invalid("must be a single directory name without separators")),
    }
}
