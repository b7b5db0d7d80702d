// src/importer/source.rs
//
// Reads one `{city}_{period}s.csv` file into canonical listing records.

use crate::domain::{ListingRecord, Partition, LISTING_COLUMNS};
use crate::errors::ServerError;
use csv::{ReaderBuilder, StringRecord, Trim};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A parsed source file, ready to be handed to a store.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub partition: Partition,
    pub rows: Vec<ListingRecord>,
    /// SHA-256 of the raw file bytes, lowercase hex.
    pub source_digest: String,
    pub source_path: PathBuf,
}

/// Pandas writes its index as an unnamed column ("" or "Unnamed: 0").
fn is_artifact_column(header: &str) -> bool {
    header.is_empty() || header.contains("Unnamed")
}

/// Cells pandas reads as NA by default. Matching is case-sensitive.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

pub fn digest_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Position of each canonical column present in the file.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if is_artifact_column(header) {
                continue;
            }
            if let Some(column) = LISTING_COLUMNS.iter().copied().find(|c| *c == header) {
                // First occurrence wins if a header is repeated.
                positions.entry(column).or_insert(i);
            }
        }
        Self { positions }
    }

    fn has(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }
}

/// Cell accessor for one data row, carrying enough context for error messages.
struct RowReader<'a> {
    columns: &'a ColumnIndex,
    record: &'a StringRecord,
    source: &'a str,
    line: u64,
}

impl RowReader<'_> {
    fn text(&self, column: &str) -> Option<&str> {
        self.columns
            .positions
            .get(column)
            .and_then(|&i| self.record.get(i))
            .filter(|cell| !is_missing(cell))
    }

    fn invalid(&self, column: &str, value: &str) -> ServerError {
        ServerError::CsvError(format!(
            "{}: line {}: invalid value '{}' for {}",
            self.source, self.line, value, column
        ))
    }

    fn float(&self, column: &str) -> Result<Option<f64>, ServerError> {
        match self.text(column) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| self.invalid(column, raw)),
        }
    }

    fn required_float(&self, column: &str) -> Result<f64, ServerError> {
        self.float(column)?.ok_or_else(|| {
            ServerError::CsvError(format!(
                "{}: line {}: missing required value for {}",
                self.source, self.line, column
            ))
        })
    }

    /// Accepts `2` as well as the `2.0` pandas writes for integer columns
    /// that contained gaps.
    fn integer(&self, column: &str) -> Result<Option<i64>, ServerError> {
        let Some(raw) = self.text(column) else {
            return Ok(None);
        };
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(Some(v));
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Ok(Some(v as i64))
            }
            _ => Err(self.invalid(column, raw)),
        }
    }
}

/// Parse CSV content into records for `partition`. `city` and `period`
/// columns in the file are ignored in favour of the partition's values.
pub fn read_listings<R: std::io::Read>(
    reader: R,
    partition: &Partition,
    source: &str,
) -> Result<Vec<ListingRecord>, ServerError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| ServerError::CsvError(format!("{source}: unreadable header: {e}")))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers);

    let synthesized: Vec<&str> = LISTING_COLUMNS
        .iter()
        .copied()
        .filter(|c| *c != "city" && *c != "period" && !columns.has(c))
        .collect();
    if !synthesized.is_empty() {
        debug!(source, missing = ?synthesized, "Filling absent columns with nulls");
    }

    let mut rows = Vec::new();
    for result in csv.records() {
        let record =
            result.map_err(|e| ServerError::CsvError(format!("{source}: malformed row: {e}")))?;
        let row = RowReader {
            columns: &columns,
            record: &record,
            source,
            line: record.position().map_or(0, |p| p.line()),
        };

        rows.push(ListingRecord {
            id: None,
            city: partition.city().to_string(),
            period: partition.period().to_string(),
            lat: row.required_float("lat")?,
            lng: row.required_float("lng")?,
            room_type: row.text("room_type").map(str::to_string),
            person_capacity: row.integer("person_capacity")?,
            real_sum: row.float("realSum")?,
            guest_satisfaction_overall: row.float("guest_satisfaction_overall")?,
            cleanliness_rating: row.float("cleanliness_rating")?,
            dist: row.float("dist")?,
            metro_dist: row.float("metro_dist")?,
            attr_index: row.float("attr_index")?,
            rest_index: row.float("rest_index")?,
        });
    }

    Ok(rows)
}

/// Read and normalize a partition file from disk.
pub fn read_partition_file(path: &Path, partition: &Partition) -> Result<ImportBatch, ServerError> {
    let bytes = fs::read(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| partition.source_file_name());

    let rows = read_listings(bytes.as_slice(), partition, &source)?;

    Ok(ImportBatch {
        partition: partition.clone(),
        rows,
        source_digest: digest_hex(&bytes),
        source_path: path.to_path_buf(),
    })
}

/// Render records as a normalized CSV document with the canonical header.
pub fn write_listings(records: &[ListingRecord]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(LISTING_COLUMNS)
        .map_err(|e| ServerError::CsvError(format!("write header failed: {e}")))?;
    for record in records {
        writer
            .write_record(record.to_csv_fields())
            .map_err(|e| ServerError::CsvError(format!("write row failed: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| ServerError::CsvError(format!("flush csv failed: {e}")))
}
