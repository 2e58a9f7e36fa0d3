use crate::error::Result;
use crate::models::{Table, TableName};
use async_trait::async_trait;

/// Port for reading the pipeline's result tables from one output root
#[async_trait]
pub trait TableStorage: Send + Sync {
    /// Read a whole table
    async fn load_table(&self, name: TableName) -> Result<Table>;

    /// Cheap existence check; never reads table contents
    async fn has_table(&self, name: TableName) -> Result<bool>;

    /// Tables present in storage
    async fn list_tables(&self) -> Result<Vec<TableName>>;
}
