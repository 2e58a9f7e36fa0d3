//! In-memory table storage for tests and embedding callers.
//!
//! Lock poisoning is treated as fatal.

use async_trait::async_trait;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{Table, TableName};
use graphshell_core::ports::TableStorage;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct MemoryTableStorage {
    tables: Arc<RwLock<HashMap<TableName, Table>>>,
    failing: Arc<RwLock<HashSet<TableName>>>,
    load_calls: Arc<RwLock<HashMap<TableName, usize>>>,
}

impl MemoryTableStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_table(self, table: Table) -> Self {
        self.insert(table);
        self
    }

    pub fn insert(&self, table: Table) {
        self.tables.write().unwrap().insert(table.name, table);
    }

    /// Make reads of `name` fail while still reporting it as present
    pub fn fail_on(&self, name: TableName) {
        self.failing.write().unwrap().insert(name);
    }

    /// Number of `load_table` calls made for `name`
    pub fn load_calls(&self, name: TableName) -> usize {
        self.load_calls.read().unwrap().get(&name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl TableStorage for MemoryTableStorage {
    async fn load_table(&self, name: TableName) -> Result<Table> {
        *self.load_calls.write().unwrap().entry(name).or_insert(0) += 1;

        if self.failing.read().unwrap().contains(&name) {
            return Err(GraphshellError::TableLoad {
                name: name.to_string(),
                reason: "injected read failure".to_string(),
            });
        }

        self.tables.read().unwrap().get(&name).cloned().ok_or_else(|| {
            GraphshellError::TableLoad {
                name: name.to_string(),
                reason: "table not present".to_string(),
            }
        })
    }

    async fn has_table(&self, name: TableName) -> Result<bool> {
        Ok(self.tables.read().unwrap().contains_key(&name)
            || self.failing.read().unwrap().contains(&name))
    }

    async fn list_tables(&self) -> Result<Vec<TableName>> {
        let mut names: Vec<TableName> = self.tables.read().unwrap().keys().copied().collect();
        names.sort();
        Ok(names)
    }
}
