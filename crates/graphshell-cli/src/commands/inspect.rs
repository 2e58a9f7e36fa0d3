//! Loaded-table summary for `--inspect`

use crate::output::OutputWriter;
use anyhow::Result;
use graphshell_store::ResultTables;
use tabled::Tabled;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Table")]
    name: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "Columns")]
    columns: String,
}

pub fn execute(tables: &ResultTables, output: &OutputWriter) -> Result<()> {
    let statuses = tables.statuses();

    if output.is_json() {
        return output.result(statuses);
    }

    output.section("Loaded Tables");

    let rows: Vec<TableRow> = statuses
        .into_iter()
        .map(|status| TableRow {
            name: status.name.to_string(),
            rows: status.rows.map_or_else(|| "absent".to_string(), |n| n.to_string()),
            columns: status.columns.join(", "),
        })
        .collect();

    output.table(rows);
    Ok(())
}
