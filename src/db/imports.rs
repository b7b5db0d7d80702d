// src/db/imports.rs
use crate::domain::Partition;
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

/// Bookkeeping for the last import of a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRun {
    pub city: String,
    pub period: String,
    pub source_digest: String,
    pub row_count: i64,
    pub imported_at: DateTime<Utc>,
}

pub fn get_import_run(
    conn: &Connection,
    partition: &Partition,
) -> Result<Option<ImportRun>, ServerError> {
    conn.query_row(
        r#"
        select city, period, source_digest, row_count, imported_at
        from import_runs
        where city = ?1 and period = ?2
        "#,
        params![partition.city(), partition.period()],
        |row| {
            Ok(ImportRun {
                city: row.get(0)?,
                period: row.get(1)?,
                source_digest: row.get(2)?,
                row_count: row.get(3)?,
                imported_at: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("failed to load import run: {e}")))
}

pub fn record_import_run(
    conn: &Connection,
    partition: &Partition,
    source_digest: &str,
    row_count: usize,
    now: DateTime<Utc>,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into import_runs (city, period, source_digest, row_count, imported_at)
        values (?1, ?2, ?3, ?4, ?5)
        on conflict(city, period) do update set
            source_digest = excluded.source_digest,
            row_count = excluded.row_count,
            imported_at = excluded.imported_at
        "#,
        params![
            partition.city(),
            partition.period(),
            source_digest,
            row_count as i64,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("record import run failed: {e}")))?;
    Ok(())
}
