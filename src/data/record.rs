//! Health records and feature vectors

use crate::error::{HeartError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the model features, in the order used for every matrix row.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "age",
    "gender",
    "resting_bp",
    "heart_rate",
    "cholesterol",
    "stress_level",
    "smoker",
    "diabetes",
    "bmi",
];

/// Column holding the binary disease label.
pub const TARGET_COLUMN: &str = "target";

/// Number of model features
pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// Biological sex as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Dataset encoding: Male = 1, Female = 0
    pub fn code(self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }

    pub fn from_code(code: f64) -> Result<Self> {
        match code.round() as i64 {
            1 => Ok(Gender::Male),
            0 => Ok(Gender::Female),
            other => Err(HeartError::InvalidInput(format!("gender code must be 0 or 1, got {}", other))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = HeartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "1" => Ok(Gender::Male),
            "female" | "f" | "0" => Ok(Gender::Female),
            _ => Err(HeartError::InvalidInput(format!("unknown gender: {}", s))),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = HeartError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A yes/no answer (smoker, diabetes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Answer {
    No,
    Yes,
}

impl Answer {
    /// Dataset encoding: Yes = 1, No = 0
    pub fn code(self) -> f64 {
        match self {
            Answer::Yes => 1.0,
            Answer::No => 0.0,
        }
    }

    pub fn from_code(code: f64) -> Result<Self> {
        match code.round() as i64 {
            1 => Ok(Answer::Yes),
            0 => Ok(Answer::No),
            other => Err(HeartError::InvalidInput(format!("flag must be 0 or 1, got {}", other))),
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value { Answer::Yes } else { Answer::No }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "Yes"),
            Answer::No => write!(f, "No"),
        }
    }
}

impl FromStr for Answer {
    type Err = HeartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Ok(Answer::Yes),
            "no" | "n" | "false" | "0" => Ok(Answer::No),
            _ => Err(HeartError::InvalidInput(format!("expected yes or no, got {}", s))),
        }
    }
}

impl TryFrom<String> for Answer {
    type Error = HeartError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Accepted input range per numeric feature, inclusive
pub const FEATURE_RANGES: [(&str, f64, f64); 6] = [
    ("age", 0.0, 90.0),
    ("resting_bp", 60.0, 200.0),
    ("heart_rate", 40.0, 200.0),
    ("cholesterol", 120.0, 350.0),
    ("stress_level", 1.0, 5.0),
    ("bmi", 15.0, 40.0),
];

/// Health measurements for one person, the model's input.
///
/// Fields are addressed by name everywhere; [`FeatureVector::named_values`]
/// is the only place that fixes their numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age: f64,
    pub gender: Gender,
    pub resting_bp: f64,
    pub heart_rate: f64,
    pub cholesterol: f64,
    pub stress_level: f64,
    pub smoker: Answer,
    pub diabetes: Answer,
    pub bmi: f64,
}

impl FeatureVector {
    /// Feature values paired with their column names, in [`FEATURE_COLUMNS`] order
    pub fn named_values(&self) -> [(&'static str, f64); N_FEATURES] {
        [
            ("age", self.age),
            ("gender", self.gender.code()),
            ("resting_bp", self.resting_bp),
            ("heart_rate", self.heart_rate),
            ("cholesterol", self.cholesterol),
            ("stress_level", self.stress_level),
            ("smoker", self.smoker.code()),
            ("diabetes", self.diabetes.code()),
            ("bmi", self.bmi),
        ]
    }

    /// Value of one feature by column name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.named_values()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Reject values outside [`FEATURE_RANGES`]
    pub fn validate(&self) -> Result<()> {
        for (name, min, max) in FEATURE_RANGES {
            let value = self
                .get(name)
                .ok_or_else(|| HeartError::FeatureNotFound(name.to_string()))?;
            if !value.is_finite() || value < min || value > max {
                return Err(HeartError::InvalidInput(format!(
                    "{} must be between {} and {}, got {}",
                    name, min, max, value
                )));
            }
        }
        Ok(())
    }

    /// Numeric row for the classifier
    pub fn values(&self) -> [f64; N_FEATURES] {
        self.named_values().map(|(_, v)| v)
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(self.values().to_vec())
    }

    /// Build a vector from a name lookup, the way dataset rows are decoded
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<f64>,
    {
        Ok(Self {
            age: lookup("age")?,
            gender: Gender::from_code(lookup("gender")?)?,
            resting_bp: lookup("resting_bp")?,
            heart_rate: lookup("heart_rate")?,
            cholesterol: lookup("cholesterol")?,
            stress_level: lookup("stress_level")?,
            smoker: Answer::from_code(lookup("smoker")?)?,
            diabetes: Answer::from_code(lookup("diabetes")?)?,
            bmi: lookup("bmi")?,
        })
    }

    /// Human readable (label, value) rows used by reports
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Age", format!("{}", self.age)),
            ("Gender", self.gender.to_string()),
            ("Rest BP", format!("{}", self.resting_bp)),
            ("Heart Rate", format!("{}", self.heart_rate)),
            ("Cholesterol", format!("{}", self.cholesterol)),
            ("Stress", format!("{}", self.stress_level)),
            ("Smoker", self.smoker.to_string()),
            ("Diabetes", self.diabetes.to_string()),
            ("BMI", format!("{:.1}", self.bmi)),
        ]
    }
}

/// One row of the training dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub features: FeatureVector,
    pub has_disease: bool,
}

impl HealthRecord {
    pub fn new(features: FeatureVector, has_disease: bool) -> Self {
        Self { features, has_disease }
    }

    /// Label as used by the classifier (1.0 = disease present)
    pub fn label(&self) -> f64 {
        if self.has_disease { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> FeatureVector {
        FeatureVector {
            age: 54.0,
            gender: Gender::Male,
            resting_bp: 140.0,
            heart_rate: 88.0,
            cholesterol: 260.0,
            stress_level: 4.0,
            smoker: Answer::Yes,
            diabetes: Answer::No,
            bmi: 31.2,
        }
    }

    #[test]
    fn test_named_values_follow_feature_columns() {
        let names: Vec<&str> = sample().named_values().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
    }

    #[test]
    fn test_values_encode_categoricals() {
        let v = sample().values();
        assert_eq!(v[1], 1.0);
        assert_eq!(v[3], 88.0);
        assert_eq!(v[4], 260.0);
        assert_eq!(v[6], 1.0);
        assert_eq!(v[7], 0.0);
    }

    #[test]
    fn test_from_lookup_is_order_independent() {
        let fv = sample();
        let by_name: HashMap<&str, f64> = fv.named_values().into_iter().collect();
        let rebuilt = FeatureVector::from_lookup(|name| {
            by_name.get(name).copied().ok_or_else(|| HeartError::FeatureNotFound(name.to_string()))
        })
        .unwrap();
        assert_eq!(rebuilt, fv);
    }

    #[test]
    fn test_parse_categoricals() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Yes".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!("no".parse::<Answer>().unwrap(), Answer::No);
        assert!("maybe".parse::<Answer>().is_err());
        assert!(Gender::from_code(2.0).is_err());
    }

    #[test]
    fn test_json_categoricals_ignore_case() {
        let gender: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(gender, Gender::Male);
        let answer: Answer = serde_json::from_str("\"YES\"").unwrap();
        assert_eq!(answer, Answer::Yes);
        assert!(serde_json::from_str::<Gender>("\"other\"").is_err());
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
    }

    #[test]
    fn test_validate_ranges() {
        assert!(sample().validate().is_ok());

        let edges = FeatureVector { age: 0.0, stress_level: 5.0, bmi: 40.0, cholesterol: 120.0, ..sample() };
        assert!(edges.validate().is_ok());

        let cases = [
            FeatureVector { age: -40.0, ..sample() },
            FeatureVector { age: 91.0, ..sample() },
            FeatureVector { resting_bp: -5.0, ..sample() },
            FeatureVector { heart_rate: 201.0, ..sample() },
            FeatureVector { cholesterol: 99999.0, ..sample() },
            FeatureVector { stress_level: 8.0, ..sample() },
            FeatureVector { bmi: -3.0, ..sample() },
            FeatureVector { bmi: f64::NAN, ..sample() },
        ];
        for fv in cases {
            assert!(matches!(fv.validate(), Err(HeartError::InvalidInput(_))), "{:?}", fv);
        }
    }
}
