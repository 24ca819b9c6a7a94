//! Risk prediction from a trained model

use crate::data::FeatureVector;
use crate::error::{HeartError, Result};
use crate::training::TrainedModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Lifestyle recommendations attached to a high-risk verdict
pub const HIGH_RISK_TIPS: [&str; 7] = [
    "Walk 20-30 minutes daily.",
    "Eat more fruits, vegetables & whole grains.",
    "Reduce salty and fried foods.",
    "If you smoke, consider reducing/quitting.",
    "Practice breathing exercises.",
    "Maintain consistent sleep.",
    "Get regular health checkups.",
];

/// Binary verdict of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    /// Map a classifier label (1 = disease) to a risk level
    pub fn from_label(label: f64) -> Self {
        if label.round() as i64 == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> u8 {
        match self {
            RiskLevel::High => 1,
            RiskLevel::Low => 0,
        }
    }

    pub fn is_high(self) -> bool {
        self == RiskLevel::High
    }

    /// Fixed score drawn on the report's risk meter (0-100)
    pub fn risk_score(self) -> u8 {
        match self {
            RiskLevel::High => 80,
            RiskLevel::Low => 30,
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &HIGH_RISK_TIPS,
            RiskLevel::Low => &[],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => write!(f, "High Risk"),
            RiskLevel::Low => write!(f, "Low Risk"),
        }
    }
}

/// Free-text identity fields shown on the report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of one prediction, consumed by the report generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub identity: Identity,
    pub features: FeatureVector,
    pub risk: RiskLevel,
    /// Share of trees voting high risk
    pub probability: f64,
}

/// Stateless predictor over an optional model
pub struct RiskPredictor;

impl RiskPredictor {
    /// Predict the risk label; fails with `ModelNotTrained` when no model exists
    /// and `InvalidInput` when a value is out of range
    pub fn predict(model: Option<&TrainedModel>, features: &FeatureVector) -> Result<RiskLevel> {
        let model = model.ok_or_else(|| {
            warn!("Prediction requested before training");
            HeartError::ModelNotTrained
        })?;
        features.validate()?;
        Ok(RiskLevel::from_label(model.predict_one(features)?))
    }

    /// Full prediction including identity and vote share
    pub fn assess(
        model: Option<&TrainedModel>,
        identity: Identity,
        features: FeatureVector,
    ) -> Result<Prediction> {
        let risk = Self::predict(model, &features)?;
        let probability = model
            .map(|m| m.positive_probability(&features))
            .transpose()?
            .unwrap_or(0.0);

        info!(risk = %risk, probability, "Risk assessed");
        Ok(Prediction {
            identity,
            features,
            risk,
            probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Answer, Gender};

    fn features() -> FeatureVector {
        FeatureVector {
            age: 45.0,
            gender: Gender::Female,
            resting_bp: 120.0,
            heart_rate: 72.0,
            cholesterol: 190.0,
            stress_level: 2.0,
            smoker: Answer::No,
            diabetes: Answer::No,
            bmi: 23.0,
        }
    }

    #[test]
    fn test_predict_without_model() {
        let err = RiskPredictor::predict(None, &features()).unwrap_err();
        assert!(matches!(err, HeartError::ModelNotTrained));

        let err = RiskPredictor::assess(None, Identity::new("Ann"), features()).unwrap_err();
        assert!(matches!(err, HeartError::ModelNotTrained));
    }

    #[test]
    fn test_risk_level_mapping() {
        assert_eq!(RiskLevel::from_label(1.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_label(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::High.risk_score(), 80);
        assert_eq!(RiskLevel::Low.risk_score(), 30);
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
        assert_eq!(RiskLevel::High.tips().len(), 7);
        assert!(RiskLevel::Low.tips().is_empty());
    }
}
