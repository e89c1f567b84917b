//! Dataset loading from delimited tabular sources.
//!
//! A [`Dataset`] holds the raw string cells of a CSV file after the
//! missing-value sweep, plus the inferred kind of each column. Encoding
//! into numeric features happens later, in the pipeline.

use crate::error::{PosturaError, Result};
use std::io::Read;
use std::path::Path;

/// How a column's cells are interpreted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell parses as a finite number.
    Numeric,
    /// At least one cell is non-numeric text.
    Categorical,
}

/// An in-memory table of raw cells under a fixed header.
///
/// Invariant: no row contains an empty cell — rows with missing values
/// are dropped at load time.
///
/// # Examples
///
/// ```
/// use postura::data::Dataset;
///
/// let csv = "Age,Pose,Risk Level\n25,Tree Pose,Low\n31,Headstand,High\n";
/// let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(ds.shape(), (2, 3));
/// assert_eq!(ds.column_names(), vec!["Age", "Pose", "Risk Level"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    kinds: Vec<ColumnKind>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Loads a dataset from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::Load`] if the file cannot be opened or
    /// parsed as comma-separated data with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|e| {
            PosturaError::load(format!("cannot open '{}': {e}", path.display()))
        })?;
        Self::load_from(reader)
    }

    /// Loads a dataset from any byte stream of CSV data.
    ///
    /// # Errors
    ///
    /// Returns [`PosturaError::Load`] if the stream cannot be parsed as
    /// comma-separated data with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::load_from(csv::Reader::from_reader(reader))
    }

    fn load_from<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| PosturaError::load(format!("cannot read header row: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if columns.is_empty() {
            return Err(PosturaError::load("header row has no columns"));
        }
        let mut sorted = columns.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(PosturaError::load("duplicate column names in header"));
        }

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                PosturaError::load(format!("malformed row {}: {e}", idx + 2))
            })?;
            let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            if cells.iter().any(String::is_empty) {
                dropped += 1;
                continue;
            }
            rows.push(cells);
        }

        if dropped > 0 {
            log::debug!("dropped {dropped} row(s) with missing values");
        }

        let kinds = infer_kinds(&columns, &rows);
        Ok(Self {
            columns,
            kinds,
            rows,
        })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in header order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Returns the position of a column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the inferred kind of the column at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn kind(&self, idx: usize) -> ColumnKind {
        self.kinds[idx]
    }

    /// Returns all cells of a named column, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| PosturaError::from(format!("column '{name}' not found")))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Returns the rows as raw cell slices.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the first `n` rows (fewer if the dataset is shorter).
    #[must_use]
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// A column is numeric iff it has rows and every cell parses as a
/// finite number; anything else is categorical.
fn infer_kinds(columns: &[String], rows: &[Vec<String>]) -> Vec<ColumnKind> {
    (0..columns.len())
        .map(|j| {
            let numeric = !rows.is_empty()
                && rows
                    .iter()
                    .all(|row| row[j].parse::<f32>().is_ok_and(f32::is_finite));
            if numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Categorical
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "Age,Weight,Flexibility Level,Injury,Medical Condition,Pose,Risk Level\n\
        25,60,High,None,None,Tree Pose,Low\n\
        48,82,Low,Knee,Hypertension,Headstand,High\n\
        33,70,Medium,None,Asthma,Cobra Pose,Medium\n";

    #[test]
    fn test_load_basic() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).expect("load should succeed");
        assert_eq!(ds.shape(), (3, 7));
        assert_eq!(ds.column_index("Pose"), Some(5));
        assert_eq!(
            ds.column_values("Risk Level").expect("label column"),
            vec!["Low", "High", "Medium"]
        );
    }

    #[test]
    fn test_kind_inference() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).expect("load should succeed");
        assert_eq!(ds.kind(0), ColumnKind::Numeric); // Age
        assert_eq!(ds.kind(1), ColumnKind::Numeric); // Weight
        assert_eq!(ds.kind(5), ColumnKind::Categorical); // Pose
    }

    #[test]
    fn test_rows_with_missing_cells_are_dropped() {
        let csv = "Age,Pose,Risk Level\n25,Tree Pose,Low\n30,,High\n41,Cobra Pose,Medium\n";
        let ds = Dataset::from_reader(csv.as_bytes()).expect("load should succeed");
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(
            ds.column_values("Age").expect("column"),
            vec!["25", "41"]
        );
    }

    #[test]
    fn test_whitespace_only_cell_counts_as_missing() {
        let csv = "Age,Pose,Risk Level\n25,   ,Low\n30,Headstand,High\n";
        let ds = Dataset::from_reader(csv.as_bytes()).expect("load should succeed");
        assert_eq!(ds.n_rows(), 1);
    }

    #[test]
    fn test_idempotent_load() {
        let a = Dataset::from_reader(SAMPLE.as_bytes()).expect("first load");
        let b = Dataset::from_reader(SAMPLE.as_bytes()).expect("second load");
        assert_eq!(a, b);
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let csv = "Age,Pose,Risk Level\n25,Tree Pose\n";
        let err = Dataset::from_reader(csv.as_bytes()).expect_err("ragged row should fail");
        assert!(matches!(err, PosturaError::Load { .. }));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let csv = "Age,Age,Risk Level\n25,26,Low\n";
        let err = Dataset::from_reader(csv.as_bytes()).expect_err("duplicate header");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Dataset::from_path("/no/such/file.csv").expect_err("missing file");
        assert!(matches!(err, PosturaError::Load { .. }));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        let ds = Dataset::from_path(file.path()).expect("load from path");
        assert_eq!(ds.shape(), (3, 7));
    }

    #[test]
    fn test_head_preview() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).expect("load");
        assert_eq!(ds.head(2).len(), 2);
        assert_eq!(ds.head(10).len(), 3);
        assert_eq!(ds.head(2)[0][0], "25");
    }

    #[test]
    fn test_empty_dataset_columns_are_categorical() {
        let csv = "Age,Pose\n";
        let ds = Dataset::from_reader(csv.as_bytes()).expect("header-only load");
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.kind(0), ColumnKind::Categorical);
    }
}
