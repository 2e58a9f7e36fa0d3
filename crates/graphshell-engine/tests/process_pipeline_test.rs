//! Integration tests for the subprocess indexer, driven through `sh`

#![cfg(unix)]

use graphshell_core::config::Settings;
use graphshell_core::models::{ProgressEvent, WorkspaceLayout};
use graphshell_core::ports::{IndexPipeline, WorkflowCallbacks};
use graphshell_core::GraphshellError;
use graphshell_engine::ProcessIndexPipeline;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl WorkflowCallbacks for Recorder {
    fn workflow_start(&self, name: &str) {
        self.events.lock().unwrap().push(format!("start:{name}"));
    }

    fn workflow_end(&self, name: &str) {
        self.events.lock().unwrap().push(format!("end:{name}"));
    }

    fn progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(format!(
            "progress:{}:{:?}:{:?}",
            event.description.as_deref().unwrap_or("-"),
            event.completed_items,
            event.total_items
        ));
    }
}

fn workspace() -> (TempDir, WorkspaceLayout) {
    let dir = TempDir::new().unwrap();
    let layout = WorkspaceLayout::new(dir.path(), "acme");
    fs::create_dir_all(&layout.root).unwrap();
    (dir, layout)
}

fn sh(script: &str) -> ProcessIndexPipeline {
    ProcessIndexPipeline::new(vec!["sh".to_string(), "-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn test_events_forwarded_in_order() {
    let (_dir, layout) = workspace();
    let pipeline = sh(concat!(
        "cat > settings.json; ",
        "echo '{\"event\": \"workflow_start\", \"name\": \"extract_graph\"}'; ",
        "echo 'loading model weights'; ",
        "echo '{\"event\": \"progress\", \"description\": \"extract_graph\", \"completed_items\": 1, \"total_items\": 2}'; ",
        "echo '{\"event\": \"progress\", \"completed_items\": 7}'; ",
        "echo '{\"event\": \"workflow_end\", \"name\": \"extract_graph\"}'"
    ));
    let recorder = Recorder::default();

    pipeline.build_index(&Settings::default(), &layout, &recorder).await.unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "start:extract_graph",
            "progress:extract_graph:Some(1):Some(2)",
            "progress:-:Some(7):None",
            "end:extract_graph",
        ]
    );

    // Settings arrive on stdin as JSON; the child runs inside the workspace root
    let written = fs::read_to_string(layout.root.join("settings.json")).unwrap();
    let settings: Settings = serde_json::from_str(&written).unwrap();
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn test_workspace_exposed_to_child() {
    let (_dir, layout) = workspace();
    let pipeline = sh(
        "echo \"{\\\"event\\\": \\\"workflow_start\\\", \\\"name\\\": \\\"$GRAPHSHELL_WORKSPACE\\\"}\"",
    );
    let recorder = Recorder::default();

    pipeline.build_index(&Settings::default(), &layout, &recorder).await.unwrap();

    assert_eq!(recorder.events.lock().unwrap().clone(), vec!["start:acme"]);
}

#[tokio::test]
async fn test_invalid_utf8_output_does_not_abort() {
    let (_dir, layout) = workspace();
    let pipeline = sh(concat!(
        "echo '{\"event\": \"workflow_start\", \"name\": \"a\"}'; ",
        "printf 'caf\\351 log line\\n'; ",
        "printf '{\"event\": \"progress\", \"description\": \"caf\\351\", \"completed_items\": 1}\\n'; ",
        "echo '{\"event\": \"workflow_end\", \"name\": \"a\"}'; ",
        "exit 0"
    ));
    let recorder = Recorder::default();

    pipeline.build_index(&Settings::default(), &layout, &recorder).await.unwrap();

    assert_eq!(
        recorder.events.lock().unwrap().clone(),
        vec!["start:a", "progress:caf\u{FFFD}:Some(1):None", "end:a"]
    );
}

#[tokio::test]
async fn test_non_zero_exit_is_index_failure() {
    let (_dir, layout) = workspace();
    let pipeline = sh("echo '{\"event\": \"workflow_start\", \"name\": \"chunk\"}'; exit 3");
    let recorder = Recorder::default();

    let err = pipeline.build_index(&Settings::default(), &layout, &recorder).await.unwrap_err();

    assert!(matches!(err, GraphshellError::IndexFailed { .. }));
    assert_eq!(recorder.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_program_is_index_failure() {
    let (_dir, layout) = workspace();
    let pipeline = ProcessIndexPipeline::new(vec!["graphshell-no-such-indexer".to_string()]);

    let err = pipeline
        .build_index(&Settings::default(), &layout, &Recorder::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to start 'graphshell-no-such-indexer'"));
}
