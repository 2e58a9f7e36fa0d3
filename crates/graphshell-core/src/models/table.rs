use serde::{Deserialize, Serialize};
use std::fmt;

/// One record of a result table
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Result tables produced by the indexing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Entities,
    Communities,
    CommunityReports,
    TextUnits,
    Relationships,
    Covariates,
}

impl TableName {
    /// Every table, in load order
    pub const ALL: [TableName; 6] = [
        TableName::Entities,
        TableName::Communities,
        TableName::CommunityReports,
        TableName::TextUnits,
        TableName::Relationships,
        TableName::Covariates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Entities => "entities",
            TableName::Communities => "communities",
            TableName::CommunityReports => "community_reports",
            TableName::TextUnits => "text_units",
            TableName::Relationships => "relationships",
            TableName::Covariates => "covariates",
        }
    }

    /// Tables without which no retrieval mode can run
    pub fn is_mandatory(&self) -> bool {
        matches!(self, TableName::Entities | TableName::Communities)
    }

    /// Tables only produced by optional pipeline stages; checked for before loading
    pub fn needs_existence_check(&self) -> bool {
        matches!(self, TableName::Covariates)
    }

    pub fn parse(name: &str) -> Option<TableName> {
        TableName::ALL.into_iter().find(|table| table.as_str() == name)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded table. Columns are defined by the indexing pipeline, so rows are
/// kept as loosely typed JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: TableName,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: TableName, rows: Vec<Row>) -> Self {
        Self { name, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order across all rows
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_table_name_round_trip_through_str() {
        for table in TableName::ALL {
            assert_eq!(TableName::parse(table.as_str()), Some(table));
        }
        assert_eq!(TableName::parse("nodes"), None);
    }

    #[test]
    fn test_mandatory_tables() {
        let mandatory: Vec<_> = TableName::ALL.into_iter().filter(|t| t.is_mandatory()).collect();
        assert_eq!(mandatory, vec![TableName::Entities, TableName::Communities]);
        assert!(TableName::Covariates.needs_existence_check());
        assert!(!TableName::TextUnits.needs_existence_check());
    }

    #[test]
    fn test_columns_union() {
        let table = Table::new(
            TableName::Entities,
            vec![
                row(json!({"id": "e1", "title": "SCROOGE"})),
                row(json!({"id": "e2", "degree": 4})),
            ],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 3);
        assert!(table.columns().contains(&"degree".to_string()));
    }
}
