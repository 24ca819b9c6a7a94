//! Heart dataset: records, feature vectors and CSV loading

mod loader;
mod record;

pub use loader::{Corpus, DatasetCache, DatasetLoader, DatasetSummary, FeatureMean, HistogramBin};
pub use record::{Answer, FeatureVector, Gender, HealthRecord, FEATURE_COLUMNS, FEATURE_RANGES, N_FEATURES, TARGET_COLUMN};
