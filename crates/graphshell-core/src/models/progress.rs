use serde::{Deserialize, Serialize};

/// Progress report emitted by the indexing pipeline.
///
/// Every field is optional: the pipeline may send partial events and the
/// consumer renders whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed_items: Option<u64>,

    /// Absent or zero means indeterminate progress
    #[serde(default)]
    pub total_items: Option<u64>,
}

impl ProgressEvent {
    pub fn new(description: impl Into<String>, completed: u64, total: Option<u64>) -> Self {
        Self {
            description: Some(description.into()),
            completed_items: Some(completed),
            total_items: total,
        }
    }

    /// Total item count, if progress is determinate
    pub fn determinate_total(&self) -> Option<u64> {
        self.total_items.filter(|total| *total > 0)
    }

    /// Completion percentage when the total is known and non-zero
    pub fn percent(&self) -> Option<f64> {
        let total = self.determinate_total()?;
        let completed = self.completed_items.unwrap_or(0);
        Some(completed as f64 / total as f64 * 100.0)
    }
}
