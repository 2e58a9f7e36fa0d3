use crate::events::IndexerEvent;
use async_trait::async_trait;
use graphshell_core::config::Settings;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::WorkspaceLayout;
use graphshell_core::ports::{IndexPipeline, WorkflowCallbacks};
use std::borrow::Cow;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

/// Runs the external indexer as a child process.
///
/// The resolved settings are written to the child's stdin as JSON. Progress
/// comes back as [`IndexerEvent`] lines on stdout; the child's stderr is
/// passed through to ours.
#[derive(Debug, Clone)]
pub struct ProcessIndexPipeline {
    command: Vec<String>,
}

impl ProcessIndexPipeline {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.engine.index_command.clone())
    }

    /// Command line with `{root}`, `{workspace}`, `{input}` and `{output}`
    /// substituted for `layout`
    pub fn command_line(&self, layout: &WorkspaceLayout) -> Result<Vec<String>> {
        if self.command.is_empty() {
            return Err(GraphshellError::ConfigInvalid {
                key: "engine.index_command".to_string(),
                reason: "no indexer command configured".to_string(),
            });
        }

        let root = layout.root.to_string_lossy();
        let input = layout.input.to_string_lossy();
        let output = layout.output.to_string_lossy();

        Ok(self
            .command
            .iter()
            .map(|part| {
                part.replace("{root}", &root)
                    .replace("{workspace}", &layout.name)
                    .replace("{input}", &input)
                    .replace("{output}", &output)
            })
            .collect())
    }
}

#[async_trait]
impl IndexPipeline for ProcessIndexPipeline {
    async fn build_index(
        &self,
        settings: &Settings,
        layout: &WorkspaceLayout,
        callbacks: &dyn WorkflowCallbacks,
    ) -> Result<()> {
        let command_line = self.command_line(layout)?;
        let (program, args) = command_line.split_first().ok_or_else(|| {
            GraphshellError::IndexFailed {
                reason: "empty indexer command".to_string(),
            }
        })?;

        tracing::info!(command = %command_line.join(" "), workspace = %layout.name, "Starting indexer");

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&layout.root)
            .env("GRAPHSHELL_WORKSPACE", &layout.name)
            .env("GRAPHSHELL_WORKSPACE_ROOT", &layout.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| GraphshellError::IndexFailed {
                reason: format!("failed to start '{}': {}", program, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_vec(settings)?;
            // The indexer may not read its settings from stdin at all
            if let Err(e) = stdin.write_all(&payload).await {
                tracing::debug!(error = %e, "Indexer closed stdin early");
            }
        }

        let stdout = child.stdout.take().ok_or_else(|| GraphshellError::IndexFailed {
            reason: "indexer stdout was not captured".to_string(),
        })?;

        let mut lines = BufReader::new(stdout).split(b'\n');
        let mut events = 0usize;
        while let Some(raw) = lines.next_segment().await? {
            let line = String::from_utf8_lossy(&raw);
            if let Cow::Owned(_) = line {
                tracing::debug!(target: "indexer", "Line is not valid UTF-8, decoded lossily");
            }

            match IndexerEvent::parse(&line) {
                Some(event) => {
                    event.dispatch(callbacks);
                    events += 1;
                }
                None if line.trim().is_empty() => {}
                None => tracing::debug!(target: "indexer", "{}", line),
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(GraphshellError::IndexFailed {
                reason: format!("indexer exited with {}", status),
            });
        }

        tracing::info!(events, workspace = %layout.name, "Indexing finished");
        Ok(())
    }
}
