//! Health calculators
//!
//! Standalone BMI and total-cholesterol calculators. Neither depends on a
//! trained model. The BMI computed here is not fed into the classifier's
//! `bmi` feature.

mod bmi;
mod cholesterol;

pub use bmi::{bmi, BmiCategory, BmiMeter, BmiReading};
pub use cholesterol::{total_cholesterol, CholesterolCategory, CholesterolReading};
