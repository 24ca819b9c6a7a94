//! Integration test: training on the bundled heart dataset

use heart_studio::data::{Answer, DatasetLoader, FeatureVector, Gender, FEATURE_COLUMNS};
use heart_studio::inference::{Identity, RiskLevel, RiskPredictor};
use heart_studio::training::{ClassifierTrainer, TrainerConfig};
use heart_studio::HeartError;

fn dataset_path() -> String {
    format!("{}/data/heart.csv", env!("CARGO_MANIFEST_DIR"))
}

fn trainer() -> ClassifierTrainer {
    ClassifierTrainer::new(TrainerConfig::default().with_n_estimators(40))
}

fn person() -> FeatureVector {
    FeatureVector {
        age: 48.0,
        gender: Gender::Female,
        resting_bp: 124.0,
        heart_rate: 76.0,
        cholesterol: 205.0,
        stress_level: 4.0,
        smoker: Answer::No,
        diabetes: Answer::No,
        bmi: 25.4,
    }
}

#[test]
fn test_load_dataset() {
    let corpus = DatasetLoader::new().load_csv(dataset_path()).unwrap();
    assert_eq!(corpus.len(), 300);
    assert_eq!(corpus.features().ncols(), FEATURE_COLUMNS.len());
}

#[test]
fn test_missing_dataset() {
    let err = DatasetLoader::new().load_csv("does/not/exist.csv").unwrap_err();
    assert!(matches!(err, HeartError::IoError(_) | HeartError::DataError(_)));
}

#[test]
fn test_default_hyperparameters() {
    let config = TrainerConfig::default();
    assert_eq!(config.n_estimators, 300);
    assert_eq!(config.max_depth, 10);
    assert_eq!(config.random_state, 42);
    assert_eq!(config.test_size, 0.2);
}

#[test]
fn test_training_is_reproducible() {
    let corpus = DatasetLoader::new().load_csv(dataset_path()).unwrap();

    let first = trainer().train(&corpus).unwrap();
    let second = trainer().train(&corpus).unwrap();

    assert!((0.0..=1.0).contains(&first.accuracy));
    assert_eq!(first.accuracy.to_bits(), second.accuracy.to_bits());
    assert_eq!(first.n_train, 240);
    assert_eq!(first.n_test, 60);

    let a = first.model.predict_one(&person()).unwrap();
    let b = second.model.predict_one(&person()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        first.model.positive_probability(&person()).unwrap().to_bits(),
        second.model.positive_probability(&person()).unwrap().to_bits()
    );
}

#[test]
fn test_predict_after_training() {
    let corpus = DatasetLoader::new().load_csv(dataset_path()).unwrap();
    let outcome = trainer().train(&corpus).unwrap();

    let prediction =
        RiskPredictor::assess(Some(&outcome.model), Identity::new("Jo"), person()).unwrap();
    assert!(matches!(prediction.risk, RiskLevel::Low | RiskLevel::High));
    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(prediction.risk.is_high(), !prediction.risk.tips().is_empty());
}

#[test]
fn test_predict_without_training() {
    let err = RiskPredictor::predict(None, &person()).unwrap_err();
    assert!(matches!(err, HeartError::ModelNotTrained));
}
