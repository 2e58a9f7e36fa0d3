//! Line protocol spoken by the indexer on stdout.
//!
//! ```text
//! {"event": "workflow_start", "name": "extract_graph"}
//! {"event": "progress", "description": "extract_graph", "completed_items": 3, "total_items": 10}
//! {"event": "workflow_end", "name": "extract_graph"}
//! ```

use graphshell_core::models::ProgressEvent;
use graphshell_core::ports::WorkflowCallbacks;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum IndexerEvent {
    WorkflowStart { name: Option<String> },
    WorkflowEnd { name: Option<String> },
    Progress(ProgressEvent),
}

impl IndexerEvent {
    /// Parse one stdout line; `None` for anything that is not an event.
    ///
    /// Only the `event` tag must be well formed. A field of the wrong type
    /// is read as absent.
    pub fn parse(line: &str) -> Option<IndexerEvent> {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }

        let value: Value = serde_json::from_str(line).ok()?;
        let fields = value.as_object()?;

        match fields.get("event")?.as_str()? {
            "workflow_start" => Some(IndexerEvent::WorkflowStart {
                name: text(fields, "name"),
            }),
            "workflow_end" => Some(IndexerEvent::WorkflowEnd {
                name: text(fields, "name"),
            }),
            "progress" => Some(IndexerEvent::Progress(ProgressEvent {
                description: text(fields, "description"),
                completed_items: count(fields, "completed_items"),
                total_items: count(fields, "total_items"),
            })),
            _ => None,
        }
    }

    /// Forward to the matching callback
    pub fn dispatch(&self, callbacks: &dyn WorkflowCallbacks) {
        match self {
            IndexerEvent::WorkflowStart { name } => {
                callbacks.workflow_start(name.as_deref().unwrap_or("unknown"))
            }
            IndexerEvent::WorkflowEnd { name } => {
                callbacks.workflow_end(name.as_deref().unwrap_or("unknown"))
            }
            IndexerEvent::Progress(event) => callbacks.progress(event),
        }
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

fn count(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    fields.get(key).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lifecycle_events() {
        assert_eq!(
            IndexerEvent::parse(r#"{"event": "workflow_start", "name": "create_communities"}"#),
            Some(IndexerEvent::WorkflowStart {
                name: Some("create_communities".to_string())
            })
        );
        assert_eq!(
            IndexerEvent::parse(r#"{"event": "workflow_end"}"#),
            Some(IndexerEvent::WorkflowEnd { name: None })
        );
    }

    #[test]
    fn test_parse_progress_event() {
        let event = IndexerEvent::parse(
            r#"{"event": "progress", "description": "embed", "completed_items": 4, "total_items": 8}"#,
        );
        assert_eq!(
            event,
            Some(IndexerEvent::Progress(ProgressEvent::new("embed", 4, Some(8))))
        );
    }

    #[test]
    fn test_malformed_progress_degrades() {
        let event = IndexerEvent::parse(r#"{"event": "progress", "total_items": 8}"#);
        let Some(IndexerEvent::Progress(progress)) = event else {
            panic!("expected a progress event");
        };
        assert_eq!(progress.description, None);
        assert_eq!(progress.completed_items, None);
        assert_eq!(progress.total_items, Some(8));
    }

    #[test]
    fn test_wrong_typed_fields_read_as_absent() {
        let event = IndexerEvent::parse(
            r#"{"event": "progress", "description": "embed", "completed_items": 3.5, "total_items": "10"}"#,
        );
        assert_eq!(
            event,
            Some(IndexerEvent::Progress(ProgressEvent {
                description: Some("embed".to_string()),
                completed_items: None,
                total_items: None,
            }))
        );

        let event = IndexerEvent::parse(r#"{"event": "progress", "description": 5, "completed_items": 2}"#);
        let Some(IndexerEvent::Progress(progress)) = event else {
            panic!("expected a progress event");
        };
        assert_eq!(progress.description, None);
        assert_eq!(progress.completed_items, Some(2));

        assert_eq!(
            IndexerEvent::parse(r#"{"event": "workflow_end", "name": ["x"]}"#),
            Some(IndexerEvent::WorkflowEnd { name: None })
        );
    }

    #[test]
    fn test_non_event_lines_ignored() {
        assert_eq!(IndexerEvent::parse("Running pipeline..."), None);
        assert_eq!(IndexerEvent::parse(r#"{"event": "unknown_kind"}"#), None);
        assert_eq!(IndexerEvent::parse("{not json"), None);
        assert_eq!(IndexerEvent::parse(""), None);
        assert_eq!(IndexerEvent::parse(r#"{"event": 3}"#), None);
        assert_eq!(IndexerEvent::parse(r#"{"name": "no tag"}"#), None);
    }
}
