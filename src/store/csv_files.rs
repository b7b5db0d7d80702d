use crate::domain::{ListingRecord, Partition};
use crate::errors::ServerError;
use crate::importer::{self, ImportBatch};
use crate::store::{ImportMode, ImportOutcome, ListingStore};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Partition files under one directory, re-read on every query.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn partition_path(&self, partition: &Partition) -> PathBuf {
        self.data_dir.join(partition.source_file_name())
    }
}

impl ListingStore for CsvStore {
    fn import_partition(
        &self,
        batch: &ImportBatch,
        mode: ImportMode,
    ) -> Result<ImportOutcome, ServerError> {
        let dest = self.partition_path(&batch.partition);

        // Importing a directory into itself.
        if let (Ok(a), Ok(b)) = (dest.canonicalize(), batch.source_path.canonicalize()) {
            if a == b {
                return Ok(ImportOutcome::Unchanged);
            }
        }

        let rendered = importer::write_listings(&batch.rows)?;
        if mode == ImportMode::SkipUnchanged {
            if let Ok(existing) = fs::read(&dest) {
                if existing == rendered {
                    return Ok(ImportOutcome::Unchanged);
                }
            }
        }

        fs::create_dir_all(&self.data_dir)?;
        fs::write(&dest, rendered)?;
        debug!(partition = %batch.partition, path = %dest.display(), "Wrote partition file");
        Ok(ImportOutcome::Imported(batch.rows.len()))
    }

    fn query(&self, partition: &Partition) -> Result<Vec<ListingRecord>, ServerError> {
        let path = self.partition_path(partition);
        if !path.is_file() {
            return Err(ServerError::NotFound(format!(
                "No data for {} ({})",
                partition.city(),
                partition.period()
            )));
        }

        let batch = importer::read_partition_file(&path, partition)?;
        Ok(batch.rows)
    }
}
