//! One-shot import of the `{city}_{period}s.csv` files into a listing store.

mod source;

pub use source::{read_partition_file, write_listings, ImportBatch};

use crate::config::DashboardConfig;
use crate::store::{ImportMode, ImportOutcome, ListingStore};
use std::path::Path;
use tracing::{debug, error, info};

/// Per-run tally, one bucket per file outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported_files: usize,
    pub unchanged_files: usize,
    pub missing_files: usize,
    pub failed_files: usize,
    pub rows_imported: usize,
}

/// Import every configured partition found in `data_dir`.
///
/// Missing files are skipped. A file that fails to parse or persist is logged
/// and counted, and the remaining files are still processed.
pub fn run_import(
    config: &DashboardConfig,
    data_dir: &Path,
    store: &dyn ListingStore,
    mode: ImportMode,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for partition in config.partitions() {
        let filename = partition.source_file_name();
        let path = data_dir.join(&filename);

        if !path.is_file() {
            debug!("Skipping {filename}: not present in {}", data_dir.display());
            summary.missing_files += 1;
            continue;
        }

        info!("Importing {filename}...");

        let outcome = read_partition_file(&path, &partition)
            .and_then(|batch| store.import_partition(&batch, mode));

        match outcome {
            Ok(ImportOutcome::Imported(rows)) => {
                info!("Successfully imported {rows} rows from {filename}");
                summary.imported_files += 1;
                summary.rows_imported += rows;
            }
            Ok(ImportOutcome::Unchanged) => {
                info!("Skipped {filename}: unchanged since last import");
                summary.unchanged_files += 1;
            }
            Err(e) => {
                error!("Error importing {filename}: {e}");
                summary.failed_files += 1;
            }
        }
    }

    info!(
        imported = summary.imported_files,
        unchanged = summary.unchanged_files,
        missing = summary.missing_files,
        failed = summary.failed_files,
        rows = summary.rows_imported,
        "Import completed"
    );
    summary
}
