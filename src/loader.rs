// 📂 Dataset Loader - CSV → ordered Vec<BinRecord>
//
// All or nothing: either every row parses or the whole load fails.
// File order is preserved because the matcher relies on it.

use crate::error::{LookupError, Result};
use crate::record::{BinRecord, CSV_HEADER};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// PARSING
// ============================================================================

/// Load and parse the dataset at `path`
pub fn load_bins(path: &Path) -> Result<Vec<BinRecord>> {
    let file = File::open(path).map_err(|source| LookupError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_bins(file).map_err(|e| match e {
        // reader I/O errors carry no path
        LookupError::DataUnavailable { source, .. } => LookupError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    debug!(path = %path.display(), records = records.len(), "loaded BIN dataset");
    Ok(records)
}

/// Parse a dataset from any reader (header row required)
pub fn parse_bins<R: Read>(reader: R) -> Result<Vec<BinRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    if !headers.iter().eq(CSV_HEADER.iter().copied()) {
        return Err(LookupError::DataMalformed {
            line: 1,
            reason: format!(
                "expected header '{}', found '{}'",
                CSV_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let record: BinRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| LookupError::DataMalformed {
                line,
                reason: describe_kind(e.kind()),
            })?;

        if record.number.is_empty() {
            return Err(LookupError::DataMalformed {
                line,
                reason: "empty number field".to_string(),
            });
        }

        records.push(record);
    }

    Ok(records)
}

fn csv_error(err: csv::Error) -> LookupError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);

    match err.into_kind() {
        csv::ErrorKind::Io(source) => LookupError::DataUnavailable {
            path: PathBuf::new(),
            source,
        },
        kind => LookupError::DataMalformed {
            line,
            reason: describe_kind(&kind),
        },
    }
}

fn describe_kind(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} columns, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {}", err),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        other => format!("{:?}", other),
    }
}

// ============================================================================
// DATASET SOURCE
// ============================================================================

/// Where lookups get their table from
///
/// `PerRequest` rereads the file on every call. `Snapshot` holds a table
/// loaded once; the `Arc` is only built after a complete load, so readers
/// never see a partial table.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    PerRequest(PathBuf),
    Snapshot {
        path: PathBuf,
        records: Arc<Vec<BinRecord>>,
    },
}

impl DatasetSource {
    pub fn per_request<P: Into<PathBuf>>(path: P) -> Self {
        DatasetSource::PerRequest(path.into())
    }

    /// Load once now and keep the result
    pub fn snapshot<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let records = load_bins(&path)?;
        info!(path = %path.display(), records = records.len(), "BIN snapshot loaded");

        Ok(DatasetSource::Snapshot {
            path,
            records: Arc::new(records),
        })
    }

    /// Snapshot over records already in memory
    pub fn from_records<P: Into<PathBuf>>(path: P, records: Vec<BinRecord>) -> Self {
        DatasetSource::Snapshot {
            path: path.into(),
            records: Arc::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DatasetSource::PerRequest(path) => path,
            DatasetSource::Snapshot { path, .. } => path,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            DatasetSource::PerRequest(_) => "per-request",
            DatasetSource::Snapshot { .. } => "snapshot",
        }
    }

    /// Current table (blocking file read in per-request mode)
    pub fn load(&self) -> Result<Arc<Vec<BinRecord>>> {
        match self {
            DatasetSource::PerRequest(path) => load_bins(path).map(Arc::new),
            DatasetSource::Snapshot { records, .. } => Ok(Arc::clone(records)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
