//! Movie dataset loading and cleaning
//!
//! Rows are kept only when the movie was a clear commercial release
//! (`budget > 100000` and `gross > 1.2 × budget`). Remaining gaps in the
//! feature columns are filled with the median of the kept rows.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const FEATURE_COUNT: usize = 5;

/// Feature column names, in model order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["budget", "score", "votes", "runtime", "year"];

/// Smallest budget (dollars) considered a real release
pub const MIN_BUDGET: f64 = 100_000.0;

/// Gross must exceed budget by this factor
pub const MIN_GROSS_RATIO: f64 = 1.2;

pub type FeatureRow = [f64; FEATURE_COUNT];

/// Model inputs for one movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovieFeatures {
    /// Production budget in dollars
    pub budget: f64,
    /// Audience score, 1-10
    pub score: f64,
    pub votes: f64,
    /// Minutes
    pub runtime: f64,
    pub year: f64,
}

impl MovieFeatures {
    pub fn to_row(&self) -> FeatureRow {
        [self.budget, self.score, self.votes, self.runtime, self.year]
    }

    pub fn is_finite(&self) -> bool {
        self.to_row().iter().all(|v| v.is_finite())
    }
}

/// Column medians used to fill missing cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureMedians {
    pub budget: f64,
    pub score: f64,
    pub votes: f64,
    pub runtime: f64,
    pub year: f64,
}

impl FeatureMedians {
    fn from_row(row: FeatureRow) -> Self {
        let [budget, score, votes, runtime, year] = row;
        Self {
            budget,
            score,
            votes,
            runtime,
            year,
        }
    }

    pub fn to_row(&self) -> FeatureRow {
        [self.budget, self.score, self.votes, self.runtime, self.year]
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    budget: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    gross: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    votes: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    runtime: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year: Option<f64>,
}

impl RawRow {
    /// Budget and gross when the row passes the release filter
    fn release_figures(&self) -> Option<(f64, f64)> {
        let budget = self.budget.filter(|b| b.is_finite())?;
        let gross = self.gross.filter(|g| g.is_finite())?;
        (budget > MIN_BUDGET && gross > budget * MIN_GROSS_RATIO).then_some((budget, gross))
    }

    fn feature_cells(&self) -> [Option<f64>; FEATURE_COUNT] {
        [self.budget, self.score, self.votes, self.runtime, self.year]
            .map(|cell| cell.filter(|v| v.is_finite()))
    }
}

/// One cleaned training example
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieRecord {
    pub features: FeatureRow,
    /// Worldwide gross in dollars
    pub gross: f64,
}

/// Cleaned dataset ready for training
#[derive(Debug, Clone)]
pub struct MovieDataset {
    records: Vec<MovieRecord>,
    medians: FeatureMedians,
    rows_loaded: usize,
}

impl MovieDataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Dataset(format!("cannot open {}: {}", path.display(), e)))?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            loaded = dataset.rows_loaded,
            kept = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows_loaded = 0;
        let mut kept = Vec::new();
        for row in csv_reader.deserialize::<RawRow>() {
            let row = row?;
            rows_loaded += 1;
            if let Some((_, gross)) = row.release_figures() {
                kept.push((row.feature_cells(), gross));
            }
        }

        if kept.is_empty() {
            return Err(Error::Dataset(format!(
                "no usable rows among {} (need budget > {} and gross > {} x budget)",
                rows_loaded, MIN_BUDGET, MIN_GROSS_RATIO
            )));
        }

        let mut median_row = [0.0; FEATURE_COUNT];
        for (col, name) in FEATURE_NAMES.iter().enumerate() {
            let values: Vec<f64> = kept.iter().filter_map(|(cells, _)| cells[col]).collect();
            median_row[col] = median(values)
                .ok_or_else(|| Error::Dataset(format!("column '{}' has no values", name)))?;
        }

        let records = kept
            .into_iter()
            .map(|(cells, gross)| {
                let mut features = median_row;
                for (col, cell) in cells.iter().enumerate() {
                    if let Some(value) = cell {
                        features[col] = *value;
                    }
                }
                MovieRecord { features, gross }
            })
            .collect();

        Ok(Self {
            records,
            medians: FeatureMedians::from_row(median_row),
            rows_loaded,
        })
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn medians(&self) -> FeatureMedians {
        self.medians
    }

    /// Rows read before filtering
    pub fn rows_loaded(&self) -> usize {
        self.rows_loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Median of a column; even-length columns average the two middle values
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
