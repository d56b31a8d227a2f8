//! Fare table export to SQLite.
//!
//! Runs the planner once per station and writes one table per origin,
//! `from_<origin name>`, holding the fare, distance and path to every
//! other reachable station.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, params};
use tracing::{debug, info, warn};

use crate::network::Graph;
use crate::output::format_path;
use crate::planner::{PlanError, price_all, shortest_paths_from};

/// Errors from exporting fare tables.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// SQLite operation failed
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Planner failed for an origin
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// What an export wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    /// Distinct tables in the database after the export.
    pub tables: usize,
    /// Rows across those tables.
    pub rows: usize,
}

/// Table name for an origin: `from_` plus the name with spaces as `_`.
pub fn table_name(origin_name: &str) -> String {
    format!("from_{}", origin_name.replace(' ', "_"))
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Export fare tables for every origin into the SQLite file at `path`.
pub fn export_fare_tables(graph: &Graph, path: &Path) -> Result<ExportSummary, ExportError> {
    let mut conn = Connection::open(path)?;
    let summary = write_fare_tables(graph, &mut conn)?;
    info!(
        path = %path.display(),
        tables = summary.tables,
        rows = summary.rows,
        "Fare tables exported"
    );
    Ok(summary)
}

/// Write fare tables for every origin into an open connection.
///
/// Each table is replaced in its own transaction, so re-running an export
/// leaves the same content. Origins whose names map to the same table
/// overwrite it in ascending ID order; the summary counts what remains.
pub fn write_fare_tables(
    graph: &Graph,
    conn: &mut Connection,
) -> Result<ExportSummary, ExportError> {
    let mut written: BTreeMap<String, usize> = BTreeMap::new();

    for origin in graph.stations() {
        let reachable = shortest_paths_from(graph, origin.id())?;
        let priced = price_all(&reachable, graph.free_distance());
        let table = table_name(origin.name());
        let quoted = quote_identifier(&table);

        let tx = conn.transaction()?;
        tx.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {quoted} (
                to_station TEXT NOT NULL,
                price INTEGER NOT NULL,
                distance INTEGER NOT NULL,
                path TEXT NOT NULL
            );
            DELETE FROM {quoted};"
        ))?;

        let mut rows = 0;
        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {quoted} (to_station, price, distance, path) VALUES (?1, ?2, ?3, ?4)"
            ))?;

            for entry in priced.iter().filter(|entry| entry.station != origin.id()) {
                let distance = i64::try_from(entry.distance).unwrap_or(i64::MAX);
                insert.execute(params![
                    graph.id_to_name(entry.station).into_owned(),
                    entry.price,
                    distance,
                    format_path(graph, &entry.path),
                ])?;
                rows += 1;
            }
        }
        tx.commit()?;

        debug!(table = %table, rows, "Fare table written");
        if written.insert(table, rows).is_some() {
            warn!(
                origin = %origin.id(),
                name = origin.name(),
                "Fare table name collides with an earlier origin; replaced"
            );
        }
    }

    Ok(ExportSummary {
        tables: written.len(),
        rows: written.values().sum(),
    })
}
