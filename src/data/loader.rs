//! Dataset loading, caching and summary statistics

use crate::error::{HeartError, Result};
use super::record::{FeatureVector, HealthRecord, FEATURE_COLUMNS, N_FEATURES, TARGET_COLUMN};
use ndarray::{Array1, Array2};
use parking_lot::RwLock;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The full set of training records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    records: Vec<HealthRecord>,
}

impl Corpus {
    pub fn new(records: Vec<HealthRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature matrix, one row per record in `FEATURE_COLUMNS` order
    pub fn features(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.records.len(), N_FEATURES), |(r, c)| {
            self.records[r].features.values()[c]
        })
    }

    /// Label vector (1.0 = disease present)
    pub fn labels(&self) -> Array1<f64> {
        self.records.iter().map(HealthRecord::label).collect()
    }

    /// Aggregate statistics backing the exploration charts
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_corpus(self)
    }
}

/// CSV loader for the heart dataset
pub struct DatasetLoader {
    /// Rows used for schema inference
    infer_schema_length: usize,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self { infer_schema_length: 100 }
    }

    /// Load a CSV file from disk
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<Corpus> {
        let path = path.as_ref();
        let start = Instant::now();
        let file = File::open(path)
            .map_err(|e| HeartError::DataError(format!("{}: {}", path.display(), e)))?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(file)
            .finish()?;

        let corpus = Self::corpus_from_frame(&df)?;
        info!(
            path = %path.display(),
            rows = corpus.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset loaded"
        );
        Ok(corpus)
    }

    /// Load CSV content already held in memory
    pub fn load_csv_bytes(&self, bytes: &[u8]) -> Result<Corpus> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::corpus_from_frame(&df)
    }

    /// Decode a frame into records, selecting columns by name
    pub fn corpus_from_frame(df: &DataFrame) -> Result<Corpus> {
        let mut columns: HashMap<&str, Vec<f64>> = HashMap::new();
        for name in FEATURE_COLUMNS.iter().copied().chain(std::iter::once(TARGET_COLUMN)) {
            columns.insert(name, Self::column_f64(df, name)?);
        }

        let records = (0..df.height())
            .map(|row| {
                let features = FeatureVector::from_lookup(|name| {
                    columns
                        .get(name)
                        .map(|values| values[row])
                        .ok_or_else(|| HeartError::FeatureNotFound(name.to_string()))
                })?;
                let label = columns[TARGET_COLUMN][row];
                Ok(HealthRecord::new(features, label.round() as i64 == 1))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = records.len(), "Decoded dataset frame");
        Ok(Corpus::new(records))
    }

    fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let column = df
            .column(name)
            .map_err(|_| HeartError::FeatureNotFound(name.to_string()))?;
        let column_f64 = column.cast(&DataType::Float64)?;
        let values = column_f64
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.ok_or_else(|| HeartError::DataError(format!("missing value in column '{}' at row {}", name, row)))
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(values)
    }
}

/// Lazily loaded, shared dataset. The file is read at most once.
pub struct DatasetCache {
    path: PathBuf,
    loader: DatasetLoader,
    corpus: RwLock<Option<Arc<Corpus>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loader: DatasetLoader::new(),
            corpus: RwLock::new(None),
        }
    }

    /// Cache pre-populated with an in-memory corpus
    pub fn preloaded(corpus: Corpus) -> Self {
        Self {
            path: PathBuf::new(),
            loader: DatasetLoader::new(),
            corpus: RwLock::new(Some(Arc::new(corpus))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.corpus.read().is_some()
    }

    pub fn get_or_load(&self) -> Result<Arc<Corpus>> {
        if let Some(corpus) = self.corpus.read().as_ref() {
            return Ok(Arc::clone(corpus));
        }

        let mut slot = self.corpus.write();
        // Another caller may have loaded it while we waited for the lock
        if let Some(corpus) = slot.as_ref() {
            return Ok(Arc::clone(corpus));
        }
        let corpus = Arc::new(self.loader.load_csv(&self.path)?);
        *slot = Some(Arc::clone(&corpus));
        Ok(corpus)
    }
}

/// Mean value of one feature column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMean {
    pub name: String,
    pub mean: f64,
}

/// Equal-width histogram bin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Dataset overview: the numbers behind the "Health Patterns" charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub positive_rate: f64,
    pub feature_means: Vec<FeatureMean>,
    pub age_histogram: Vec<HistogramBin>,
}

impl DatasetSummary {
    pub const AGE_BINS: usize = 10;

    pub fn from_corpus(corpus: &Corpus) -> Self {
        let rows = corpus.len();
        let x = corpus.features();

        let feature_means = FEATURE_COLUMNS
            .iter()
            .enumerate()
            .map(|(c, name)| FeatureMean {
                name: name.to_string(),
                mean: if rows > 0 { x.column(c).sum() / rows as f64 } else { 0.0 },
            })
            .collect();

        let positives = corpus.records().iter().filter(|r| r.has_disease).count();
        let ages: Vec<f64> = corpus.records().iter().map(|r| r.features.age).collect();

        Self {
            rows,
            positive_rate: if rows > 0 { positives as f64 / rows as f64 } else { 0.0 },
            feature_means,
            age_histogram: histogram(&ages, Self::AGE_BINS),
        }
    }
}

fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for &v in values {
        // Last bin is closed on the right
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}
