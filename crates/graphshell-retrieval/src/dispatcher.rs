use graphshell_core::config::Settings;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{SearchMode, SearchOptions, SearchResponse, Table, TableName};
use graphshell_core::ports::{
    BasicSearchTables, DriftSearchTables, GlobalSearchTables, LocalSearchTables, SearchEngine,
};
use graphshell_store::ResultTables;

/// Routes a query to the retrieval mode it was submitted under.
///
/// Holds shared references only: the settings and the loaded tables are
/// never modified by a dispatch, whatever its outcome.
pub struct QueryDispatcher<'a, E: SearchEngine + ?Sized> {
    engine: &'a E,
    settings: &'a Settings,
    tables: &'a ResultTables,
    options: SearchOptions,
}

impl<'a, E: SearchEngine + ?Sized> QueryDispatcher<'a, E> {
    pub fn new(engine: &'a E, settings: &'a Settings, tables: &'a ResultTables) -> Self {
        Self {
            engine,
            settings,
            tables,
            options: SearchOptions::from(&settings.query),
        }
    }

    /// Run `query` under `mode`, passing exactly the tables that mode reads
    pub async fn dispatch(&self, mode: SearchMode, query: &str) -> Result<SearchResponse> {
        tracing::info!(mode = %mode, query, "Running search");
        let t = self.tables;

        match mode {
            SearchMode::Global => {
                let tables = GlobalSearchTables {
                    entities: &t.entities,
                    communities: &t.communities,
                    community_reports: self.require(mode, TableName::CommunityReports)?,
                };
                self.engine.global_search(self.settings, tables, query, &self.options).await
            }
            SearchMode::Local => {
                let tables = LocalSearchTables {
                    entities: &t.entities,
                    communities: &t.communities,
                    community_reports: self.require(mode, TableName::CommunityReports)?,
                    text_units: self.require(mode, TableName::TextUnits)?,
                    relationships: self.require(mode, TableName::Relationships)?,
                    covariates: t.covariates.as_ref(),
                };
                self.engine.local_search(self.settings, tables, query, &self.options).await
            }
            SearchMode::Drift => {
                let tables = DriftSearchTables {
                    entities: &t.entities,
                    communities: &t.communities,
                    community_reports: self.require(mode, TableName::CommunityReports)?,
                    text_units: self.require(mode, TableName::TextUnits)?,
                    relationships: self.require(mode, TableName::Relationships)?,
                };
                self.engine.drift_search(self.settings, tables, query, &self.options).await
            }
            SearchMode::Basic => {
                let tables = BasicSearchTables {
                    text_units: self.require(mode, TableName::TextUnits)?,
                };
                self.engine.basic_search(self.settings, tables, query, &self.options).await
            }
        }
    }

    /// A table the mode cannot run without
    fn require(&self, mode: SearchMode, name: TableName) -> Result<&'a Table> {
        self.tables.get(name).ok_or_else(|| GraphshellError::Search {
            mode: mode.to_string(),
            reason: format!("table '{}' was not loaded; re-run with --index", name),
        })
    }
}
