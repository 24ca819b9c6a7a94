//! Per-user session state
//!
//! A session owns at most one trained model plus the latest BMI reading and
//! prediction. Sessions never share models.

use crate::calculators::{self, BmiReading};
use crate::data::{Corpus, FeatureVector};
use crate::error::{HeartError, Result};
use crate::inference::{Identity, Prediction, RiskPredictor};
use crate::report;
use crate::training::{ClassifierTrainer, TrainedModel, TrainingOutcome};
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    model: Option<TrainedModel>,
    last_bmi: Option<BmiReading>,
    last_prediction: Option<Prediction>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            model: None,
            last_bmi: None,
            last_prediction: None,
        }
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn last_bmi(&self) -> Option<&BmiReading> {
        self.last_bmi.as_ref()
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Train on `corpus` and replace any previous model
    pub fn train(&mut self, trainer: &ClassifierTrainer, corpus: &Corpus) -> Result<f64> {
        let outcome = trainer.train(corpus)?;
        Ok(self.install(outcome))
    }

    /// Install a model trained elsewhere, returning its accuracy
    pub fn install(&mut self, outcome: TrainingOutcome) -> f64 {
        info!(session = %self.id, accuracy = outcome.accuracy, "Model installed");
        self.model = Some(outcome.model);
        outcome.accuracy
    }

    pub fn predict(&mut self, identity: Identity, features: FeatureVector) -> Result<&Prediction> {
        let prediction = RiskPredictor::assess(self.model.as_ref(), identity, features)?;
        Ok(self.last_prediction.insert(prediction))
    }

    pub fn calculate_bmi(&mut self, weight_kg: f64, height_cm: f64) -> Result<BmiReading> {
        let reading = calculators::bmi(weight_kg, height_cm)?;
        self.last_bmi = Some(reading);
        Ok(reading)
    }

    /// PDF report for the latest prediction
    pub fn report(&self) -> Result<Vec<u8>> {
        let prediction = self.last_prediction.as_ref().ok_or(HeartError::NoPrediction)?;
        report::render(&prediction.identity, &prediction.features, prediction.risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Answer, Gender};

    fn features() -> FeatureVector {
        FeatureVector {
            age: 50.0,
            gender: Gender::Male,
            resting_bp: 130.0,
            heart_rate: 75.0,
            cholesterol: 210.0,
            stress_level: 3.0,
            smoker: Answer::No,
            diabetes: Answer::Yes,
            bmi: 26.0,
        }
    }

    #[test]
    fn test_untrained_session() {
        let mut session = Session::new("abc");
        assert!(!session.is_trained());
        let err = session.predict(Identity::new("Lee"), features()).unwrap_err();
        assert!(matches!(err, HeartError::ModelNotTrained));
        assert!(session.last_prediction().is_none());
        assert!(matches!(session.report().unwrap_err(), HeartError::NoPrediction));
    }

    #[test]
    fn test_bmi_does_not_need_model() {
        let mut session = Session::new("abc");
        let reading = session.calculate_bmi(70.0, 175.0).unwrap();
        assert_eq!(session.last_bmi(), Some(&reading));
        assert!(session.calculate_bmi(70.0, 0.0).is_err());
        assert_eq!(session.last_bmi(), Some(&reading));
    }
}
