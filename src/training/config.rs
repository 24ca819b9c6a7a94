//! Training configuration

use serde::{Deserialize, Serialize};

/// Hyperparameters and split settings for the risk classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree
    pub max_depth: usize,
    /// Seed shared by the split and the forest
    pub random_state: u64,
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: 10,
            random_state: 42,
            test_size: 0.2,
        }
    }
}

impl TrainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }
}
