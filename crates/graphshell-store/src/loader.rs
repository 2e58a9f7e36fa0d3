//! Loading the fixed result-table set with per-table failure isolation.
//!
//! `entities` and `communities` are mandatory: their failures propagate.
//! Every other table degrades to "absent" when it cannot be read, and
//! `covariates` is only read after an existence check.

use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{Table, TableName};
use graphshell_core::ports::TableStorage;
use serde::Serialize;

/// Tables held by a query session. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTables {
    pub entities: Table,
    pub communities: Table,
    pub community_reports: Option<Table>,
    pub text_units: Option<Table>,
    pub relationships: Option<Table>,
    pub covariates: Option<Table>,
}

impl ResultTables {
    pub fn get(&self, name: TableName) -> Option<&Table> {
        match name {
            TableName::Entities => Some(&self.entities),
            TableName::Communities => Some(&self.communities),
            TableName::CommunityReports => self.community_reports.as_ref(),
            TableName::TextUnits => self.text_units.as_ref(),
            TableName::Relationships => self.relationships.as_ref(),
            TableName::Covariates => self.covariates.as_ref(),
        }
    }

    /// Load status of every table, in load order
    pub fn statuses(&self) -> Vec<TableStatus> {
        TableName::ALL
            .into_iter()
            .map(|name| match self.get(name) {
                Some(table) => TableStatus {
                    name,
                    rows: Some(table.len()),
                    columns: table.columns(),
                },
                None => TableStatus {
                    name,
                    rows: None,
                    columns: Vec::new(),
                },
            })
            .collect()
    }
}

/// Summary line for one table; `rows` is `None` when the table is absent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStatus {
    pub name: TableName,
    pub rows: Option<usize>,
    pub columns: Vec<String>,
}

pub struct TableLoader<'a, S: TableStorage + ?Sized> {
    storage: &'a S,
}

impl<'a, S: TableStorage + ?Sized> TableLoader<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Existence check. A failing check counts as "absent".
    pub async fn exists(&self, name: TableName) -> bool {
        match self.storage.has_table(name).await {
            Ok(present) => present,
            Err(e) => {
                tracing::warn!(table = %name, error = %e, "Table existence check failed");
                false
            }
        }
    }

    /// Load one table.
    ///
    /// Mandatory tables fail with `TableLoad`; any other table is returned
    /// as `None` when the read fails.
    pub async fn load(&self, name: TableName) -> Result<Option<Table>> {
        tracing::info!(table = %name, "Loading table");

        match self.storage.load_table(name).await {
            Ok(table) => Ok(Some(table)),
            Err(e) if name.is_mandatory() => Err(match e {
                GraphshellError::TableLoad { .. } => e,
                other => GraphshellError::TableLoad {
                    name: name.to_string(),
                    reason: other.to_string(),
                },
            }),
            Err(e) => {
                tracing::warn!(table = %name, error = %e, "Could not load table, treating as absent");
                Ok(None)
            }
        }
    }

    /// Check first, then load. Never reads a table the check reports missing.
    pub async fn load_if_present(&self, name: TableName) -> Result<Option<Table>> {
        if !self.exists(name).await {
            tracing::debug!(table = %name, "Table not produced, skipping");
            return Ok(None);
        }
        self.load(name).await
    }

    /// Load the whole result set.
    ///
    /// Fails with `CriticalTableMissing`, naming every missing mandatory
    /// table, when `entities` or `communities` could not be loaded.
    pub async fn load_all(&self) -> Result<ResultTables> {
        let mut missing = Vec::new();

        let entities = self.load_mandatory(TableName::Entities, &mut missing).await;
        let communities = self.load_mandatory(TableName::Communities, &mut missing).await;
        let community_reports = self.load(TableName::CommunityReports).await?;
        let text_units = self.load(TableName::TextUnits).await?;
        let relationships = self.load(TableName::Relationships).await?;
        let covariates = self.load_if_present(TableName::Covariates).await?;

        match (entities, communities) {
            (Some(entities), Some(communities)) => Ok(ResultTables {
                entities,
                communities,
                community_reports,
                text_units,
                relationships,
                covariates,
            }),
            _ => Err(GraphshellError::CriticalTableMissing { names: missing }),
        }
    }

    async fn load_mandatory(&self, name: TableName, missing: &mut Vec<String>) -> Option<Table> {
        match self.load(name).await {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(table = %name, error = %e, "Mandatory table could not be loaded");
                missing.push(name.to_string());
                None
            }
        }
    }
}
