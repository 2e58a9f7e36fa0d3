use super::inspect;
use crate::cli::Cli;
use crate::interactive::TerminalIo;
use crate::output::OutputWriter;
use crate::progress::ConsoleProgress;
use anyhow::Result;
use graphshell_core::config::{require_api_key, Settings};
use graphshell_core::ports::{IndexPipeline, TableStorage};
use graphshell_core::{GraphshellError, PathResolver};
use graphshell_engine::{HttpSearchEngine, ProcessIndexPipeline};
use graphshell_retrieval::{QueryDispatcher, QuerySession};
use graphshell_store::{FileTableStorage, ResultTables, TableLoader};

pub async fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    // The indexer runs from inside the workspace, so paths handed to it
    // must not be relative to our working directory
    let root = std::path::absolute(&cli.root)?;

    let mut settings = Settings::load(&root)?;
    let api_key = require_api_key(&settings.engine.api_key_env)?;

    let resolver = PathResolver::for_project(&root);
    let layout = resolver.resolve(&cli.workspace, &mut settings)?;

    output.info(format!("Starting GraphRAG for workspace: {}", layout.name));
    output.kv("Workspace path", layout.root.display());

    if cli.index {
        output.section("Step 1: Indexing data");
        let pipeline = ProcessIndexPipeline::from_settings(&settings);
        let progress = ConsoleProgress::new(output.is_json());
        pipeline.build_index(&settings, &layout, &progress).await?;
        output.success("Indexing complete");
    }

    output.section("Loading data for search");
    let storage = FileTableStorage::new(layout.output.clone());
    if storage.list_tables().await?.is_empty() {
        return Err(GraphshellError::OutputEmpty {
            path: layout.output.clone(),
        }
        .into());
    }

    let tables = TableLoader::new(&storage).load_all().await?;
    report_absent_tables(&tables, output);

    if cli.inspect {
        return inspect::execute(&tables, output);
    }

    let engine = HttpSearchEngine::from_settings(&settings, Some(api_key))?;
    let mut session = QuerySession::new(QueryDispatcher::new(&engine, &settings, &tables));
    let mut io = TerminalIo::new(layout.name.clone(), output);

    let summary = session.run(&mut io).await?;

    if output.is_json() {
        output.result(summary)?;
    } else {
        output.info(format!(
            "Session ended: {} answered, {} failed",
            summary.answered, summary.failed
        ));
    }

    Ok(())
}

/// Warn about optional tables that failed to load. A missing covariates
/// table only means claim extraction was off.
fn report_absent_tables(tables: &ResultTables, output: &OutputWriter) {
    for status in tables.statuses() {
        if status.rows.is_none() && !status.name.needs_existence_check() {
            output.warning(format!(
                "Could not load table {}; searches that need it will fail",
                status.name
            ));
        }
    }
}
