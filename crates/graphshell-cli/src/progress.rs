//! Terminal rendering of indexing progress

use console::{style, Term};
use graphshell_core::models::ProgressEvent;
use graphshell_core::ports::WorkflowCallbacks;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// One progress line: `[desc] c/t (p%)` or `[desc] c` when the total is unknown
pub fn render_line(event: &ProgressEvent) -> String {
    let description = event.description.as_deref().unwrap_or("progress");
    let completed = event.completed_items.unwrap_or(0);

    match (event.determinate_total(), event.percent()) {
        (Some(total), Some(percent)) => {
            format!("[{}] {}/{} ({:.1}%)", description, completed, total, percent)
        }
        _ => format!("[{}] {}", description, completed),
    }
}

/// Create a spinner for the running workflow
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(
            spinner.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Progress sink attached to the indexing pipeline.
///
/// Draws a spinner per workflow on an interactive terminal and falls back to
/// plain lines otherwise.
pub struct ConsoleProgress {
    plain: bool,
    current: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new(json: bool) -> Self {
        Self::with_plain(json || !Term::stdout().is_term())
    }

    pub fn with_plain(plain: bool) -> Self {
        Self {
            plain,
            current: Mutex::new(None),
        }
    }

    fn with_current(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut current) = self.current.lock() {
            f(&mut current);
        }
    }
}

impl WorkflowCallbacks for ConsoleProgress {
    fn workflow_start(&self, name: &str) {
        if self.plain {
            println!("\nStarting workflow: {}", name);
            return;
        }

        self.with_current(|current| {
            if let Some(previous) = current.take() {
                previous.finish_and_clear();
            }
            *current = Some(create_spinner(&format!("Starting workflow: {}", name)));
        });
    }

    fn workflow_end(&self, name: &str) {
        if self.plain {
            println!("Completed workflow: {}", name);
            return;
        }

        self.with_current(|current| match current.take() {
            Some(pb) => pb.finish_with_message(format!(
                "{} Completed workflow: {}",
                style("✓").green().bold(),
                name
            )),
            None => println!("Completed workflow: {}", name),
        });
    }

    fn progress(&self, event: &ProgressEvent) {
        let line = render_line(event);
        if self.plain {
            println!("{}", line);
            return;
        }

        self.with_current(|current| match current {
            Some(pb) => pb.set_message(line),
            None => println!("{}", line),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinate_line() {
        let event = ProgressEvent::new("extract_graph", 3, Some(4));
        assert_eq!(render_line(&event), "[extract_graph] 3/4 (75.0%)");
    }

    #[test]
    fn test_one_decimal_place() {
        let event = ProgressEvent::new("embed", 1, Some(3));
        assert_eq!(render_line(&event), "[embed] 1/3 (33.3%)");
    }

    #[test]
    fn test_zero_total_renders_count_only() {
        let event = ProgressEvent::new("chunking", 12, Some(0));
        assert_eq!(render_line(&event), "[chunking] 12");
    }

    #[test]
    fn test_missing_total_renders_count_only() {
        let event = ProgressEvent::new("chunking", 7, None);
        assert_eq!(render_line(&event), "[chunking] 7");
    }

    #[test]
    fn test_partial_event_does_not_panic() {
        assert_eq!(render_line(&ProgressEvent::default()), "[progress] 0");
    }

    #[test]
    fn test_plain_sink_accepts_every_callback() {
        let sink = ConsoleProgress::with_plain(true);
        sink.workflow_start("create_base_text_units");
        sink.progress(&ProgressEvent::new("chunking", 1, Some(2)));
        sink.workflow_end("create_base_text_units");
        assert!(sink.current.lock().unwrap().is_none());
    }
}
