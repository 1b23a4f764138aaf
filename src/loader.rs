use crate::constants::{FEATURE_RICH_INPUT, YEAR_BEARING_INPUT, YEAR_BEARING_MARKER_COLUMN};
use crate::error::{AggregatorError, Result};
use csv::StringRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The two source column layouts the normalizer knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// MSD-style export with `song.*`/`artist.*` columns and a release year
    YearBearing,
    /// Audio-feature export with canonical feature columns
    FeatureRich,
}

impl SourceLayout {
    /// Layout is decided by the header, not the file name: the presence of
    /// the `song.year` column marks the year-bearing export.
    pub fn detect(headers: &StringRecord) -> SourceLayout {
        if headers.iter().any(|h| h.trim() == YEAR_BEARING_MARKER_COLUMN) {
            SourceLayout::YearBearing
        } else {
            SourceLayout::FeatureRich
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLayout::YearBearing => "year-bearing",
            SourceLayout::FeatureRich => "feature-rich",
        }
    }
}

/// A fully loaded input file: header plus every readable row, in file order
#[derive(Debug)]
pub struct RawDataset {
    pub path: PathBuf,
    pub layout: SourceLayout,
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
    /// Rows the CSV reader could not decode; skipped, not fatal
    pub malformed_rows: usize,
}

/// Pick the input file for this run. The year-bearing source wins when it is
/// present and readable; otherwise the feature-rich source is used. Neither
/// being available is a dataset-level error for the caller to handle.
pub fn discover_source(data_dir: &Path) -> Result<PathBuf> {
    let candidates = [YEAR_BEARING_INPUT, FEATURE_RICH_INPUT];

    for name in candidates {
        let path = data_dir.join(name);
        match File::open(&path) {
            Ok(_) => {
                info!("Selected input source {}", path.display());
                return Ok(path);
            }
            Err(e) => {
                info!("Candidate {} unavailable: {}", path.display(), e);
            }
        }
    }

    Err(AggregatorError::MissingInput(format!(
        "no readable dataset under '{}' (looked for {} and {})",
        data_dir.display(),
        YEAR_BEARING_INPUT,
        FEATURE_RICH_INPUT
    )))
}

/// Read the whole file into memory. Individual undecodable rows are skipped
/// and counted; only an unreadable file or header is fatal.
pub fn load_dataset(path: &Path) -> Result<RawDataset> {
    let file = File::open(path).map_err(|e| {
        AggregatorError::MissingInput(format!("failed to open '{}': {}", path.display(), e))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let layout = SourceLayout::detect(&headers);

    let mut rows = Vec::new();
    let mut malformed_rows = 0usize;
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record),
            Err(e) => {
                malformed_rows += 1;
                warn!("Skipping undecodable CSV row: {}", e);
            }
        }
    }

    info!(
        "Loaded {} records from {} ({} layout, {} malformed rows skipped)",
        rows.len(),
        path.display(),
        layout.name(),
        malformed_rows
    );

    Ok(RawDataset {
        path: path.to_path_buf(),
        layout,
        headers,
        rows,
        malformed_rows,
    })
}

/// Convenience wrapper: discover, then load.
pub fn load_from_dir(data_dir: &Path) -> Result<RawDataset> {
    let path = discover_source(data_dir)?;
    load_dataset(&path)
}
