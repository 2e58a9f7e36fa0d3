use crate::output::OutputWriter;
use console::style;
use dialoguer::Input;
use graphshell_core::models::{SearchMode, SearchResponse};
use graphshell_core::GraphshellError;
use graphshell_retrieval::SessionIo;
use std::io::{self, BufRead, IsTerminal, Write};

const MODE_PROMPT: &str = "Select search type (1: Global, 2: Local, 3: Drift, 4: Basic) [Default: 1]";

/// Query prompts on the controlling terminal.
///
/// Uses dialoguer when stdin and stdout are both terminals; piped input is
/// read line by line so scripted sessions end cleanly at end of input.
pub struct TerminalIo<'a> {
    workspace: String,
    output: &'a OutputWriter,
    interactive: bool,
}

impl<'a> TerminalIo<'a> {
    pub fn new(workspace: impl Into<String>, output: &'a OutputWriter) -> Self {
        Self {
            workspace: workspace.into(),
            output,
            interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }

    fn query_prompt(&self) -> String {
        format!("[{}] Enter your query (or type 'exit' to quit)", self.workspace)
    }

    fn prompt(&self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            let answer = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text();
            return match answer {
                Ok(line) => Ok(Some(line)),
                Err(dialoguer::Error::IO(e)) if is_end_of_input(&e) => Ok(None),
                Err(dialoguer::Error::IO(e)) => Err(e),
            };
        }

        if !self.output.is_json() {
            print!("{}: ", prompt);
            io::stdout().flush()?;
        }
        read_line(&mut io::stdin().lock())
    }
}

/// Ctrl-D or Ctrl-C at a dialoguer prompt
fn is_end_of_input(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted)
}

/// Read one line without its terminator; `None` at end of input
pub fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

impl SessionIo for TerminalIo<'_> {
    fn read_query(&mut self) -> io::Result<Option<String>> {
        if !self.output.is_json() {
            println!("\n{}", "=".repeat(50));
        }
        self.prompt(&self.query_prompt())
    }

    fn read_mode(&mut self) -> io::Result<Option<String>> {
        self.prompt(MODE_PROMPT)
    }

    fn running(&mut self, mode: SearchMode, query: &str) {
        if !self.output.is_json() {
            println!("\nRunning {} Search for: {}", mode.label(), query);
        }
    }

    fn response(&mut self, mode: SearchMode, response: &SearchResponse) {
        if self.output.is_json() {
            let payload = serde_json::json!({
                "mode": mode,
                "response": response.response,
            });
            if let Err(e) = self.output.result(payload) {
                tracing::error!(error = %e, "Failed to write response");
            }
        } else {
            println!("\n{}\n{}", style("Response:").bold(), response.response);
        }
    }

    fn failure(&mut self, _mode: SearchMode, error: &GraphshellError) {
        self.output.error(format!("Error during search: {}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_terminator() {
        let mut input = Cursor::new("who is Scrooge?\r\n2\n");
        assert_eq!(read_line(&mut input).unwrap(), Some("who is Scrooge?".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), Some("2".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_blank_line_is_not_end_of_input() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_line(&mut input).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_query_prompt_names_workspace() {
        let output = OutputWriter::new(false);
        let io = TerminalIo::new("acme", &output);
        assert_eq!(io.query_prompt(), "[acme] Enter your query (or type 'exit' to quit)");
    }
}
