//! Model training module
//!
//! Provides the risk classifier:
//! - Decision trees with random per-split feature selection
//! - Random forest (bootstrap + majority vote)
//! - Seeded train/test split and held-out metrics
//! - [`ClassifierTrainer`] tying them together

mod config;
mod models;
mod split;
mod trainer;
pub mod decision_tree;
pub mod random_forest;

pub use config::TrainerConfig;
pub use models::ModelMetrics;
pub use split::{train_test_split, TrainTestSplit};
pub use trainer::{ClassifierTrainer, TrainedModel, TrainingOutcome};
pub use decision_tree::{DecisionTree, TreeNode};
pub use random_forest::{MaxFeatures, RandomForest};
