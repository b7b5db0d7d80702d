use crate::db::{imports, init_db, listings, Database};
use crate::domain::{ListingRecord, Partition};
use crate::errors::ServerError;
use crate::importer::ImportBatch;
use crate::store::{ImportMode, ImportOutcome, ListingStore};
use chrono::Utc;
use std::path::PathBuf;
use tracing::debug;

/// `listings` table in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open for importing: creates the file and schema when needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ServerError> {
        let db = Database::new(path);
        init_db(&db)?;
        Ok(Self { db })
    }

    /// Open for serving. Nothing is created or written; a missing file
    /// surfaces as a database error on the first query.
    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        Self {
            db: Database::read_only(path),
        }
    }

    #[cfg(test)]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl ListingStore for SqliteStore {
    fn import_partition(
        &self,
        batch: &ImportBatch,
        mode: ImportMode,
    ) -> Result<ImportOutcome, ServerError> {
        self.db.with_conn(|conn| {
            if mode == ImportMode::SkipUnchanged {
                if let Some(run) = imports::get_import_run(conn, &batch.partition)? {
                    if run.source_digest == batch.source_digest {
                        return Ok(ImportOutcome::Unchanged);
                    }
                }
            }

            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(format!("begin transaction failed: {e}")))?;

            let removed = listings::delete_partition(&tx, &batch.partition)?;
            let inserted = listings::insert_listings(&tx, &batch.rows)?;
            imports::record_import_run(
                &tx,
                &batch.partition,
                &batch.source_digest,
                inserted,
                Utc::now(),
            )?;

            tx.commit()
                .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

            debug!(partition = %batch.partition, removed, inserted, "Replaced partition");
            Ok(ImportOutcome::Imported(inserted))
        })
    }

    fn query(&self, partition: &Partition) -> Result<Vec<ListingRecord>, ServerError> {
        self.db
            .with_conn(|conn| listings::get_listings_for_partition(conn, partition))
    }
}
