//! Listing storage behind one interface: a SQLite table for production and
//! the raw CSV partition files as a fallback.

mod csv_files;
mod sqlite;

pub use csv_files::CsvStore;
pub use sqlite::SqliteStore;

use crate::domain::{ListingRecord, Partition};
use crate::errors::ServerError;
use crate::importer::ImportBatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Leave a partition alone when its source has not changed.
    SkipUnchanged,
    /// Always replace the partition.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(usize),
    Unchanged,
}

pub trait ListingStore: Send + Sync {
    /// Replace the batch's partition with its rows. Other partitions are
    /// never touched, so importing the same data twice cannot duplicate rows.
    fn import_partition(
        &self,
        batch: &ImportBatch,
        mode: ImportMode,
    ) -> Result<ImportOutcome, ServerError>;

    /// Records of one partition in storage order.
    fn query(&self, partition: &Partition) -> Result<Vec<ListingRecord>, ServerError>;
}
