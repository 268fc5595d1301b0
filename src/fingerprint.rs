use crate::error::{FlareplotError, Result};
use crate::types::*;
use log::{debug, warn};
use polars::lazy::dsl::*;
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Name pandas writes for the frame index of a fingerprint DataFrame
const INDEX_NAME: &str = "Frame";

/// Anything that can be deserialized into an interaction frequency table
pub trait FingerprintSource {
    fn load(&self) -> Result<FingerprintTable>;
}

/// A fingerprint DataFrame exported with pandas `to_csv()`.
///
/// The three column levels are written as three header rows, each led by the
/// level name, optionally followed by an index-name row (`Frame,,,`):
///
/// ```text
/// ligand,LIG1.G,LIG1.G
/// protein,ALA50.B,ASP52.B
/// interaction,Hydrophobic,HBDonor
/// Frame,,
/// 0,True,False
/// 1,True,True
/// ```
#[derive(Debug, Clone)]
pub struct CsvFingerprint {
    path: PathBuf,
}

impl CsvFingerprint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FingerprintSource for CsvFingerprint {
    fn load(&self) -> Result<FingerprintTable> {
        // Read everything as strings; the header rows are not a schema
        let raw = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;
        parse_multi_header(&raw)
    }
}

/// A parquet file whose column names are flattened `ligand|protein|interaction` triples
#[derive(Debug, Clone)]
pub struct ParquetFingerprint {
    path: PathBuf,
}

impl ParquetFingerprint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FingerprintSource for ParquetFingerprint {
    fn load(&self) -> Result<FingerprintTable> {
        let file = File::open(&self.path)?;
        let df = ParquetReader::new(file).finish()?;
        FingerprintTable::from_frame(df)
    }
}

/// Loads a fingerprint table, choosing the reader from the file extension.
///
/// # Arguments
/// * `path` - Path to a `.csv` (pandas multi-header export) or `.parquet`/`.pq` file
///
/// # Errors
/// * `FlareplotError::Io` if the file does not exist or cannot be read
/// * `FlareplotError::UnsupportedFormat` for any other extension
/// * `FlareplotError::ColumnStructure` if the columns are not three-level labels
/// * `FlareplotError::InvalidFileFormat` if a cell is not a presence flag
pub fn load_fingerprint(path: impl AsRef<Path>) -> Result<FingerprintTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FlareplotError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("fingerprint file not found: {}", path.display()),
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let table = match extension.as_deref() {
        Some("csv") => CsvFingerprint::new(path).load()?,
        Some("parquet") | Some("pq") => ParquetFingerprint::new(path).load()?,
        _ => {
            return Err(FlareplotError::UnsupportedFormat(format!(
                "{} (expected .csv, .parquet or .pq)",
                path.display()
            )))
        }
    };

    debug!(
        "loaded {} interactions over {} frames from {}",
        table.n_interactions(),
        table.n_frames(),
        path.display()
    );
    Ok(table)
}

/// Converts a header-less, all-string read of a pandas multi-header CSV into a table
fn parse_multi_header(raw: &DataFrame) -> Result<FingerprintTable> {
    let columns: Vec<&StringChunked> = raw
        .get_columns()
        .iter()
        .map(|column| column.str())
        .collect::<PolarsResult<_>>()?;

    let Some((index_column, data_columns)) = columns.split_first() else {
        return Err(FlareplotError::invalid_file_format("empty fingerprint file"));
    };

    if raw.height() < LEVEL_NAMES.len() {
        return Err(FlareplotError::column_structure(format!(
            "expected {} header rows, found {}",
            LEVEL_NAMES.len(),
            raw.height()
        )));
    }
    for (row, level) in LEVEL_NAMES.iter().enumerate() {
        let found = index_column.get(row).unwrap_or("");
        if found != *level {
            return Err(FlareplotError::column_structure(format!(
                "header row {} is '{}', expected column level '{}'",
                row + 1,
                found,
                level
            )));
        }
    }

    let keys = data_columns
        .iter()
        .map(|column| {
            let level = |row: usize| column.get(row).unwrap_or("").trim().to_string();
            let key = InteractionKey::new(level(0), level(1), level(2));
            if key.ligand.is_empty() || key.protein.is_empty() || key.interaction.is_empty() {
                return Err(FlareplotError::column_structure(format!(
                    "incomplete column label {}",
                    key
                )));
            }
            Ok(key)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut first_frame = LEVEL_NAMES.len();
    if first_frame < raw.height() && is_index_name_row(index_column, data_columns, first_frame) {
        first_frame += 1;
    }
    let n_frames = raw.height() - first_frame;

    let flags = data_columns
        .iter()
        .zip(&keys)
        .map(|(column, key)| {
            (first_frame..raw.height())
                .map(|row| {
                    parse_flag(column.get(row)).ok_or_else(|| {
                        FlareplotError::invalid_file_format(format!(
                            "cell '{}' of column {} in frame {} is not a presence flag",
                            column.get(row).unwrap_or(""),
                            key,
                            row - first_frame
                        ))
                    })
                })
                .collect::<Result<Vec<bool>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    FingerprintTable::from_columns(keys, flags, n_frames)
}

fn is_index_name_row(
    index_column: &StringChunked,
    data_columns: &[&StringChunked],
    row: usize,
) -> bool {
    let named = index_column
        .get(row)
        .is_some_and(|name| name.trim() == INDEX_NAME);
    named
        && data_columns
            .iter()
            .all(|column| column.get(row).map_or(true, |cell| cell.trim().is_empty()))
}

/// Interprets a CSV cell as a presence flag; empty cells count as absent
fn parse_flag(cell: Option<&str>) -> Option<bool> {
    match cell.map(str::trim) {
        None | Some("") => Some(false),
        Some("True" | "true" | "TRUE" | "1" | "1.0") => Some(true),
        Some("False" | "false" | "FALSE" | "0" | "0.0") => Some(false),
        Some(_) => None,
    }
}

/// Computes the fraction of frames in which each interaction is present.
///
/// # Returns
/// * One `(key, frequency)` pair per column in table order. The frequency is
///   `None` when the table has no frames.
pub fn interaction_frequencies(
    table: &FingerprintTable,
) -> Result<Vec<(InteractionKey, Option<f64>)>> {
    if table.n_frames() == 0 || table.n_interactions() == 0 {
        if table.n_frames() == 0 {
            warn!("fingerprint has no frames; interaction frequencies are undefined");
        }
        return Ok(table.keys().iter().map(|key| (key.clone(), None)).collect());
    }

    // table cells are never null, so the mean is present frames / all frames
    let means = table
        .frame()
        .clone()
        .lazy()
        .select([all().cast(DataType::Float64).mean()])
        .collect()?;

    table
        .keys()
        .iter()
        .zip(means.get_columns())
        .map(|(key, mean)| Ok((key.clone(), mean.f64()?.get(0))))
        .collect()
}

/// Keeps the interactions present in at least `threshold` of the frames.
///
/// # Arguments
/// * `table` - Interaction frequency table
/// * `threshold` - Minimum presence frequency, between 0 and 1 inclusive
///
/// # Returns
/// * A table with the passing columns in their original order. A table
///   without frames keeps no column.
///
/// # Errors
/// * `FlareplotError::InvalidParameter` if the threshold is outside [0, 1] or NaN
pub fn filter_by_threshold(table: &FingerprintTable, threshold: f64) -> Result<FingerprintTable> {
    validate_threshold(threshold)?;

    let keep: HashSet<InteractionKey> = interaction_frequencies(table)?
        .into_iter()
        .filter_map(|(key, frequency)| match frequency {
            Some(frequency) if frequency >= threshold => Some(key),
            _ => None,
        })
        .collect();

    debug!(
        "{} of {} interactions pass threshold {}",
        keep.len(),
        table.n_interactions(),
        threshold
    );
    table.select(&keep)
}
