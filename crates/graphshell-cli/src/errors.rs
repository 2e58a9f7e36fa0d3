use console::style;
use graphshell_core::GraphshellError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Whether `error` ends the run cleanly instead of failing the process
pub fn is_clean_halt(error: &GraphshellError) -> bool {
    error.is_startup()
        || matches!(
            error,
            GraphshellError::CriticalTableMissing { .. } | GraphshellError::OutputEmpty { .. }
        )
}

/// User-facing rendering of a halting error
pub fn from_graphshell(error: &GraphshellError) -> CliError {
    match error {
        GraphshellError::MissingApiKey { var } => api_key_missing(var),
        GraphshellError::WorkspaceNotFound { name, path } => {
            workspace_not_found(name, &path.display().to_string())
        }
        GraphshellError::InvalidWorkspaceName { name, reason } => {
            CliError::new(format!("Invalid workspace name '{}'", name))
                .with_context(reason.clone())
                .with_suggestion("Use a plain directory name such as --workspace acme")
        }
        GraphshellError::ConfigInvalid { key, reason } => CliError::new("Invalid configuration")
            .with_context(format!("Key: {}\n\n{}", key, reason))
            .with_suggestion("Fix settings.toml or the matching GRAPHSHELL_* variable"),
        GraphshellError::CriticalTableMissing { names } => critical_tables_missing(names),
        GraphshellError::OutputEmpty { path } => output_empty(&path.display().to_string()),
        other => CliError::new(other.to_string()),
    }
}

/// Create error for a missing or placeholder API key
pub fn api_key_missing(var: &str) -> CliError {
    CliError::new(format!("WARNING: {} is not set correctly in .env file.", var))
        .with_context("Indexing and search both need a valid key; nothing was run.")
        .with_suggestion(format!("Add {}=<your key> to .env in the current directory", var))
        .with_suggestion(format!("Or export {} in your shell", var))
}

/// Create error for a workspace directory that does not exist
pub fn workspace_not_found(name: &str, path: &str) -> CliError {
    CliError::new(format!("Workspace '{}' does not exist at {}", name, path))
        .with_suggestion(format!("Please create the directory structure: {}/input", path))
        .with_suggestion("Put the documents to index in the input directory")
        .with_help("Run: graphshell --help")
}

/// Create error for mandatory tables that could not be loaded
pub fn critical_tables_missing(names: &[String]) -> CliError {
    CliError::new("Critical tables missing. Please run indexing.")
        .with_context(format!("Could not load: {}", names.join(", ")))
        .with_suggestion("Re-run with --index to rebuild the workspace output")
}

/// Create error for a workspace that has never been indexed
pub fn output_empty(path: &str) -> CliError {
    CliError::new("Output directory is empty. Please run with --index first.")
        .with_context(format!("Output directory: {}", path))
        .with_suggestion("Re-run the same command with --index")
}
