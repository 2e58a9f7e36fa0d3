//! Filesystem table storage bound to one workspace output root.
//!
//! A table named `entities` is stored either as `entities.json` (a JSON
//! array of objects) or `entities.jsonl` (one object per line). When both
//! exist the `.json` file wins.

use async_trait::async_trait;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{Row, Table, TableName};
use graphshell_core::ports::TableStorage;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Json,
    JsonLines,
}

impl TableFormat {
    const ALL: [TableFormat; 2] = [TableFormat::Json, TableFormat::JsonLines];

    fn extension(&self) -> &'static str {
        match self {
            TableFormat::Json => "json",
            TableFormat::JsonLines => "jsonl",
        }
    }

    fn from_extension(ext: &str) -> Option<TableFormat> {
        TableFormat::ALL.into_iter().find(|format| format.extension() == ext)
    }
}

#[derive(Debug, Clone)]
pub struct FileTableStorage {
    base_dir: PathBuf,
}

impl FileTableStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn table_path(&self, name: TableName, format: TableFormat) -> PathBuf {
        self.base_dir.join(format!("{}.{}", name.as_str(), format.extension()))
    }

    /// First existing file for `name`, if any
    async fn locate(&self, name: TableName) -> Result<Option<(PathBuf, TableFormat)>> {
        for format in TableFormat::ALL {
            let path = self.table_path(name, format);
            if tokio::fs::try_exists(&path).await? {
                return Ok(Some((path, format)));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl TableStorage for FileTableStorage {
    async fn load_table(&self, name: TableName) -> Result<Table> {
        let (path, format) = self.locate(name).await?.ok_or_else(|| GraphshellError::TableLoad {
            name: name.to_string(),
            reason: format!("no table file in {}", self.base_dir.display()),
        })?;

        let content =
            tokio::fs::read_to_string(&path).await.map_err(|e| GraphshellError::TableLoad {
                name: name.to_string(),
                reason: format!("failed to read {}: {}", path.display(), e),
            })?;

        let rows = match format {
            TableFormat::Json => parse_json_rows(&content),
            TableFormat::JsonLines => parse_json_lines(&content),
        }
        .map_err(|reason| GraphshellError::TableLoad {
            name: name.to_string(),
            reason: format!("{}: {}", path.display(), reason),
        })?;

        tracing::debug!(table = %name, rows = rows.len(), path = %path.display(), "Loaded table");
        Ok(Table::new(name, rows))
    }

    async fn has_table(&self, name: TableName) -> Result<bool> {
        Ok(self.locate(name).await?.is_some())
    }

    async fn list_tables(&self) -> Result<Vec<TableName>> {
        if !tokio::fs::try_exists(&self.base_dir).await? {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.base_dir).await?;
        let mut tables = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                continue;
            };

            if TableFormat::from_extension(ext).is_none() {
                continue;
            }
            if let Some(name) = TableName::parse(stem) {
                tables.push(name);
            }
        }

        tables.sort();
        tables.dedup();
        Ok(tables)
    }
}

fn parse_json_rows(content: &str) -> std::result::Result<Vec<Row>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let serde_json::Value::Array(items) = value else {
        return Err("expected a JSON array of objects".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| into_row(item).ok_or_else(|| format!("row {} is not an object", idx)))
        .collect()
}

fn parse_json_lines(content: &str) -> std::result::Result<Vec<Row>, String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let value: serde_json::Value =
                serde_json::from_str(line).map_err(|e| format!("line {}: {}", idx + 1, e))?;
            into_row(value).ok_or_else(|| format!("line {} is not an object", idx + 1))
        })
        .collect()
}

fn into_row(value: serde_json::Value) -> Option<Row> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}
