use crate::error::{FlareplotError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Separator used when a three-level column label is flattened into a single
/// DataFrame column name
pub const LEVEL_SEPARATOR: char = '|';

/// Names of the three column levels, in order
pub const LEVEL_NAMES: [&str; 3] = ["ligand", "protein", "interaction"];

/// One column of a fingerprint: a (ligand residue, protein residue, interaction type) triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractionKey {
    pub ligand: String,
    pub protein: String,
    pub interaction: String,
}

impl InteractionKey {
    pub fn new(
        ligand: impl Into<String>,
        protein: impl Into<String>,
        interaction: impl Into<String>,
    ) -> Self {
        Self {
            ligand: ligand.into(),
            protein: protein.into(),
            interaction: interaction.into(),
        }
    }

    /// Parses a flattened `ligand|protein|interaction` column name.
    ///
    /// # Errors
    /// * Returns `FlareplotError::ColumnStructure` unless the name has exactly
    ///   three non-empty levels
    pub fn from_flat_name(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split(LEVEL_SEPARATOR).collect();
        match parts.as_slice() {
            [ligand, protein, interaction]
                if !ligand.is_empty() && !protein.is_empty() && !interaction.is_empty() =>
            {
                Ok(Self::new(*ligand, *protein, *interaction))
            }
            _ => Err(FlareplotError::column_structure(format!(
                "column '{}' is not a three-level ligand{sep}protein{sep}interaction label",
                name,
                sep = LEVEL_SEPARATOR
            ))),
        }
    }

    pub fn flat_name(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.ligand,
            self.protein,
            self.interaction,
            sep = LEVEL_SEPARATOR
        )
    }
}

impl fmt::Display for InteractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.ligand, self.protein, self.interaction)
    }
}

/// Interaction frequency table: one Boolean column per interaction, one row per frame.
///
/// Column `i` of `frame` holds the flags of `keys[i]` and is named by position,
/// so residue labels never have to be valid or unique column names. Cells are
/// never null. The frame count is stored separately because a DataFrame
/// without columns has no height.
#[derive(Debug, Clone)]
pub struct FingerprintTable {
    keys: Vec<InteractionKey>,
    frame: DataFrame,
    n_frames: usize,
}

fn column_name(position: usize) -> PlSmallStr {
    format!("interaction_{}", position).into()
}

impl FingerprintTable {
    /// Builds a table from keys and per-column presence flags.
    ///
    /// # Errors
    /// * `FlareplotError::ColumnStructure` if keys repeat or the number of keys and columns differ
    /// * `FlareplotError::InvalidFileFormat` if columns have different lengths
    pub fn from_columns(
        keys: Vec<InteractionKey>,
        columns: Vec<Vec<bool>>,
        n_frames: usize,
    ) -> Result<Self> {
        if keys.len() != columns.len() {
            return Err(FlareplotError::column_structure(format!(
                "{} column labels for {} data columns",
                keys.len(),
                columns.len()
            )));
        }
        check_unique(&keys)?;

        let mut series = Vec::with_capacity(columns.len());
        for (position, (key, values)) in keys.iter().zip(columns).enumerate() {
            if values.len() != n_frames {
                return Err(FlareplotError::invalid_file_format(format!(
                    "column {} has {} frames, expected {}",
                    key,
                    values.len(),
                    n_frames
                )));
            }
            series.push(Column::new(column_name(position), values));
        }

        let frame = DataFrame::new(series)?;
        Ok(Self {
            keys,
            frame,
            n_frames,
        })
    }

    /// Builds a table from a DataFrame whose column names are flattened
    /// `ligand|protein|interaction` triples.
    ///
    /// A column named `Frame` (the frame index) is skipped. Integer and float
    /// columns are cast to Boolean, so 0/1 flags are accepted. Null cells
    /// become absent.
    ///
    /// # Errors
    /// * `FlareplotError::ColumnStructure` if a column name is not a three-level label,
    ///   a triple repeats, or a column cannot be read as presence flags
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        let n_frames = df.height();
        let mut keys = Vec::new();
        let mut flags = Vec::new();

        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == "Frame" {
                continue;
            }
            let key = InteractionKey::from_flat_name(name)?;
            let column = match column.dtype() {
                DataType::Boolean => column.clone(),
                dtype if dtype.is_numeric() => column.cast(&DataType::Boolean)?,
                dtype => {
                    return Err(FlareplotError::column_structure(format!(
                        "column {} has dtype {}, expected presence flags",
                        key, dtype
                    )))
                }
            };
            let values: Vec<bool> = column
                .bool()?
                .into_iter()
                .map(|flag| flag == Some(true))
                .collect();
            keys.push(key);
            flags.push(values);
        }

        Self::from_columns(keys, flags, n_frames)
    }

    pub fn keys(&self) -> &[InteractionKey] {
        &self.keys
    }

    /// Presence flags, one Boolean column per key in key order
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of frames (rows)
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Number of interaction columns
    pub fn n_interactions(&self) -> usize {
        self.keys.len()
    }

    /// Counts the frames in which an interaction is present.
    ///
    /// # Errors
    /// * `FlareplotError::ColumnStructure` if the key is not a column of this table
    pub fn present_count(&self, key: &InteractionKey) -> Result<usize> {
        let position = self
            .keys
            .iter()
            .position(|candidate| candidate == key)
            .ok_or_else(|| {
                FlareplotError::column_structure(format!("no interaction column {}", key))
            })?;
        let flags = self.frame.get_columns()[position].bool()?;
        Ok(flags.into_iter().filter(|flag| *flag == Some(true)).count())
    }

    /// Returns a table restricted to `keep`, preserving the original column order.
    pub fn select(&self, keep: &HashSet<InteractionKey>) -> Result<Self> {
        let mut keys = Vec::new();
        let mut columns = Vec::new();
        for (key, column) in self.keys.iter().zip(self.frame.get_columns()) {
            if keep.contains(key) {
                let mut column = column.clone();
                column.rename(column_name(keys.len()));
                keys.push(key.clone());
                columns.push(column);
            }
        }

        let frame = DataFrame::new(columns)?;
        Ok(Self {
            keys,
            frame,
            n_frames: self.n_frames,
        })
    }
}

fn check_unique(keys: &[InteractionKey]) -> Result<()> {
    let mut seen = HashSet::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            return Err(FlareplotError::column_structure(format!(
                "duplicate interaction column {}",
                key
            )));
        }
    }
    Ok(())
}

/// Parameters for a flareplot conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareplotOptions {
    /// Minimum fraction of frames an interaction must be present in
    pub threshold: f64,
    /// Plot width in pixels
    pub width: u32,
    /// Plot height in pixels
    pub height: u32,
    /// Keep only the first track/tree entry per node instead of one per edge endpoint
    pub dedupe_nodes: bool,
}

impl Default for FlareplotOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            width: 500,
            height: 500,
            dedupe_nodes: false,
        }
    }
}

impl FlareplotOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_dedupe_nodes(mut self, dedupe_nodes: bool) -> Self {
        self.dedupe_nodes = dedupe_nodes;
        self
    }

    /// # Errors
    /// * `FlareplotError::InvalidParameter` if the threshold is outside [0, 1]
    ///   or either dimension is zero
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if self.width == 0 {
            return Err(FlareplotError::invalid_parameter(
                "width",
                self.width,
                "must be greater than 0",
            ));
        }
        if self.height == 0 {
            return Err(FlareplotError::invalid_parameter(
                "height",
                self.height,
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(FlareplotError::invalid_parameter(
            "threshold",
            threshold,
            "must be between 0 and 1",
        ));
    }
    Ok(())
}
