//! Classifier trainer: split, fit, evaluate

use crate::data::{Corpus, FeatureVector, FEATURE_COLUMNS};
use crate::error::{HeartError, Result};
use super::config::TrainerConfig;
use super::models::ModelMetrics;
use super::random_forest::RandomForest;
use super::split::train_test_split;
use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// A fitted risk classifier with the metadata needed to use it safely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    forest: RandomForest,
    feature_names: Vec<String>,
    metrics: ModelMetrics,
    config: TrainerConfig,
    trained_at: DateTime<Utc>,
}

impl TrainedModel {
    /// Held-out accuracy in [0, 1]
    pub fn accuracy(&self) -> f64 {
        self.metrics.accuracy
    }

    pub fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }

    /// Feature importances paired with names, most important first
    pub fn feature_importances(&self) -> Vec<(String, f64)> {
        let mut pairs: Vec<(String, f64)> = match self.forest.feature_importances() {
            Some(imp) => self.feature_names.iter().cloned().zip(imp.iter().copied()).collect(),
            None => Vec::new(),
        };
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        pairs
    }

    /// Input row laid out in the column order the forest was fitted on
    fn row(&self, features: &FeatureVector) -> Result<Array2<f64>> {
        let values = self
            .feature_names
            .iter()
            .map(|name| {
                features
                    .get(name)
                    .ok_or_else(|| HeartError::FeatureNotFound(name.clone()))
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(Array2::from_shape_vec((1, values.len()), values)?)
    }

    /// Predicted label (0.0 or 1.0) for one person
    pub fn predict_one(&self, features: &FeatureVector) -> Result<f64> {
        let x = self.row(features)?;
        Ok(self.forest.predict(&x)?[0])
    }

    /// Share of trees voting for the positive (disease) class
    pub fn positive_probability(&self, features: &FeatureVector) -> Result<f64> {
        let x = self.row(features)?;
        let proba = self.forest.predict_proba(&x)?;
        Ok(self
            .forest
            .classes()
            .iter()
            .position(|c| *c == 1.0)
            .map(|idx| proba[[0, idx]])
            .unwrap_or(0.0))
    }
}

/// Result of one training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
    pub training_time_secs: f64,
}

/// Splits a corpus, fits the forest and measures held-out accuracy
#[derive(Debug, Clone, Default)]
pub struct ClassifierTrainer {
    config: TrainerConfig,
}

impl ClassifierTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn train(&self, corpus: &Corpus) -> Result<TrainingOutcome> {
        if self.config.n_estimators == 0 {
            return Err(HeartError::InvalidInput(
                "Number of trees must be at least 1".to_string(),
            ));
        }
        if corpus.len() < 2 {
            return Err(HeartError::DataError(format!(
                "Need at least 2 records to train, got {}",
                corpus.len()
            )));
        }

        let start = Instant::now();
        let x = corpus.features();
        let y = corpus.labels();

        let split = train_test_split(&x, &y, self.config.test_size, self.config.random_state)?;
        debug!(
            n_train = split.x_train.nrows(),
            n_test = split.x_test.nrows(),
            "Split corpus"
        );

        let mut forest = RandomForest::new(self.config.n_estimators)
            .with_max_depth(self.config.max_depth)
            .with_random_state(self.config.random_state);
        forest.fit(&split.x_train, &split.y_train)?;

        let y_pred = forest.predict(&split.x_test)?;
        let metrics = ModelMetrics::compute_classification(&split.y_test, &y_pred);
        let training_time_secs = start.elapsed().as_secs_f64();

        info!(
            trees = forest.n_trees(),
            max_depth = self.config.max_depth,
            accuracy = metrics.accuracy,
            n_train = split.x_train.nrows(),
            n_test = split.x_test.nrows(),
            elapsed_secs = training_time_secs,
            "Model trained"
        );

        let accuracy = metrics.accuracy;
        Ok(TrainingOutcome {
            n_train: split.x_train.nrows(),
            n_test: split.x_test.nrows(),
            accuracy,
            training_time_secs,
            model: TrainedModel {
                forest,
                feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
                metrics,
                config: self.config.clone(),
                trained_at: Utc::now(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Answer, Gender, HealthRecord};

    fn corpus(n: usize) -> Corpus {
        let records = (0..n)
            .map(|i| {
                let sick = i % 2 == 0;
                let features = FeatureVector {
                    age: if sick { 60.0 + (i % 7) as f64 } else { 30.0 + (i % 7) as f64 },
                    gender: if i % 3 == 0 { Gender::Male } else { Gender::Female },
                    resting_bp: if sick { 150.0 } else { 115.0 },
                    heart_rate: 70.0 + (i % 11) as f64,
                    cholesterol: if sick { 260.0 } else { 180.0 },
                    stress_level: (i % 5 + 1) as f64,
                    smoker: Answer::from(sick),
                    diabetes: Answer::No,
                    bmi: 22.0 + (i % 9) as f64,
                };
                HealthRecord::new(features, sick)
            })
            .collect();
        Corpus::new(records)
    }

    fn small_trainer() -> ClassifierTrainer {
        ClassifierTrainer::new(TrainerConfig::default().with_n_estimators(20))
    }

    #[test]
    fn test_train_separable() {
        let outcome = small_trainer().train(&corpus(40)).unwrap();
        assert_eq!(outcome.n_test, 8);
        assert_eq!(outcome.n_train, 32);
        assert!(outcome.accuracy >= 0.85, "accuracy: {}", outcome.accuracy);
        assert_eq!(outcome.model.n_trees(), 20);
        assert_eq!(outcome.model.feature_names().len(), FEATURE_COLUMNS.len());
    }

    #[test]
    fn test_importances_sorted() {
        let outcome = small_trainer().train(&corpus(40)).unwrap();
        let importances = outcome.model.feature_importances();
        assert_eq!(importances.len(), FEATURE_COLUMNS.len());
        for pair in importances.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        let total: f64 = importances.iter().map(|(_, v)| v).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_small_corpus() {
        let err = small_trainer().train(&corpus(1)).unwrap_err();
        assert!(matches!(err, HeartError::DataError(_)));
    }

    #[test]
    fn test_zero_trees_rejected() {
        let trainer = ClassifierTrainer::new(TrainerConfig::default().with_n_estimators(0));
        let err = trainer.train(&corpus(40)).unwrap_err();
        assert!(matches!(err, HeartError::InvalidInput(_)));
    }

    #[test]
    fn test_row_follows_stored_feature_names() {
        let mut model = small_trainer().train(&corpus(40)).unwrap().model;
        let person = corpus(1).records()[0].features;

        model.feature_names = vec!["bmi".to_string(), "age".to_string()];
        let row = model.row(&person).unwrap();
        assert_eq!(row.row(0).to_vec(), vec![person.bmi, person.age]);

        model.feature_names = vec!["weight".to_string()];
        assert!(matches!(model.row(&person), Err(HeartError::FeatureNotFound(_))));
    }

    #[test]
    fn test_probability_in_range() {
        let outcome = small_trainer().train(&corpus(40)).unwrap();
        let p = outcome.model.positive_probability(&corpus(1).records()[0].features).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
