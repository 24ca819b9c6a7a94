//! Heart Health Studio - heart disease risk prediction
//!
//! This crate provides:
//! - Loading of the heart dataset from CSV
//! - A seeded random-forest classifier with held-out accuracy
//! - Per-person risk prediction with lifestyle recommendations
//! - BMI and total-cholesterol calculators
//! - PDF report generation
//!
//! # Modules
//!
//! ## Core
//! - [`data`] - Dataset records, feature vectors and CSV loading
//! - [`training`] - Decision trees, random forest and the classifier trainer
//! - [`inference`] - Risk prediction from a trained model
//! - [`calculators`] - BMI and total cholesterol
//! - [`report`] - PDF health report
//! - [`session`] - Per-user state tying the above together
//!
//! ## Services
//! - [`server`] - HTTP server with REST API
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Core modules
pub mod data;
pub mod training;
pub mod inference;
pub mod calculators;
pub mod report;
pub mod session;

// Services
pub mod server;
pub mod cli;

pub use error::{HeartError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{HeartError, Result};

    pub use crate::data::{Answer, Corpus, DatasetLoader, FeatureVector, Gender, HealthRecord};

    pub use crate::training::{ClassifierTrainer, TrainedModel, TrainerConfig, TrainingOutcome};

    pub use crate::inference::{Identity, Prediction, RiskLevel, RiskPredictor};

    pub use crate::calculators::{bmi, total_cholesterol, BmiCategory, BmiReading, CholesterolCategory, CholesterolReading};

    pub use crate::report::{render, REPORT_FILENAME};

    pub use crate::session::Session;
}
