use crate::config::Settings;
use crate::error::Result;
use crate::models::{ProgressEvent, WorkspaceLayout};
use async_trait::async_trait;

/// Observer for indexing lifecycle and progress.
///
/// Implementations must not fail: a rendering problem never aborts indexing.
pub trait WorkflowCallbacks: Send + Sync {
    fn workflow_start(&self, _name: &str) {}

    fn workflow_end(&self, _name: &str) {}

    fn progress(&self, _event: &ProgressEvent) {}
}

/// Port for the external indexing pipeline
#[async_trait]
pub trait IndexPipeline: Send + Sync {
    /// Run the pipeline for one workspace; returns once it has finished
    async fn build_index(
        &self,
        settings: &Settings,
        layout: &WorkspaceLayout,
        callbacks: &dyn WorkflowCallbacks,
    ) -> Result<()>;
}
