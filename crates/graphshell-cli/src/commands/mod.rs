//! Command implementations

mod inspect;
mod run;

use crate::cli::Cli;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use graphshell_core::GraphshellError;

/// Execute a CLI invocation.
///
/// Startup problems and missing index output are reported and end the run
/// with a zero status; anything else propagates.
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match run::execute(&cli, &output).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<GraphshellError>() {
            Some(err) if errors::is_clean_halt(err) => {
                tracing::debug!(error = %err, "Halting");
                if output.is_json() {
                    output.error(err);
                } else {
                    errors::from_graphshell(err).display();
                }
                Ok(())
            }
            _ => Err(e),
        },
    }
}
