//! Risk inference module
//!
//! Turns a [`FeatureVector`](crate::data::FeatureVector) into a
//! [`RiskLevel`] using the session's trained model. Predicting without a
//! model is an error ([`HeartError::ModelNotTrained`](crate::error::HeartError)),
//! never a panic.

mod predictor;

pub use predictor::{Identity, Prediction, RiskLevel, RiskPredictor, HIGH_RISK_TIPS};
