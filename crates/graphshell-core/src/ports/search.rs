use crate::config::Settings;
use crate::error::Result;
use crate::models::{SearchOptions, SearchResponse, Table};
use async_trait::async_trait;
use serde::Serialize;

/// Tables consumed by global search
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalSearchTables<'a> {
    pub entities: &'a Table,
    pub communities: &'a Table,
    pub community_reports: &'a Table,
}

/// Tables consumed by local search
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocalSearchTables<'a> {
    pub entities: &'a Table,
    pub communities: &'a Table,
    pub community_reports: &'a Table,
    pub text_units: &'a Table,
    pub relationships: &'a Table,
    /// Absent when claim extraction never ran
    pub covariates: Option<&'a Table>,
}

/// Tables consumed by drift search
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DriftSearchTables<'a> {
    pub entities: &'a Table,
    pub communities: &'a Table,
    pub community_reports: &'a Table,
    pub text_units: &'a Table,
    pub relationships: &'a Table,
}

/// Tables consumed by basic search
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BasicSearchTables<'a> {
    pub text_units: &'a Table,
}

/// Port for the external retrieval algorithms
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn global_search(
        &self,
        settings: &Settings,
        tables: GlobalSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse>;

    async fn local_search(
        &self,
        settings: &Settings,
        tables: LocalSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse>;

    async fn drift_search(
        &self,
        settings: &Settings,
        tables: DriftSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse>;

    async fn basic_search(
        &self,
        settings: &Settings,
        tables: BasicSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse>;
}
