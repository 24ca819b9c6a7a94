//! Body-mass index calculator

use crate::error::{HeartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower and upper bound of the BMI meter scale
const METER_MIN: f64 = 15.0;
const METER_MAX: f64 = 40.0;

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// `< 18.5` Underweight, `< 24.9` Normal, `< 29.9` Overweight, otherwise Obese
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Below the healthy range. Consider a nutrition check-in.",
            BmiCategory::Normal => "Healthy range. Keep up your routine!",
            BmiCategory::Overweight => "Slightly above the healthy range. Add daily activity.",
            BmiCategory::Obese => "Well above the healthy range. Consider consulting a doctor.",
        }
    }

    /// Meter color
    pub fn color(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "blue",
            BmiCategory::Normal => "green",
            BmiCategory::Overweight => "orange",
            BmiCategory::Obese => "red",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(s)
    }
}

/// A computed BMI with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            category: BmiCategory::from_value(value),
        }
    }

    pub fn advice(&self) -> &'static str {
        self.category.advice()
    }

    pub fn meter(&self) -> BmiMeter {
        BmiMeter::from_reading(self)
    }
}

/// Fill level of the BMI meter over the 15-40 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BmiMeter {
    /// Truncated percentage, clamped to 0..=100
    pub percent: u8,
    pub color: &'static str,
}

impl BmiMeter {
    pub fn from_reading(reading: &BmiReading) -> Self {
        let raw = ((reading.value - METER_MIN) / (METER_MAX - METER_MIN) * 100.0).trunc();
        Self {
            percent: raw.clamp(0.0, 100.0) as u8,
            color: reading.category.color(),
        }
    }
}

/// `weight_kg / (height_cm / 100)^2`
///
/// Weight and height must be finite and strictly positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<BmiReading> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(HeartError::InvalidInput(format!(
            "weight must be a positive number of kilograms, got {}",
            weight_kg
        )));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(HeartError::InvalidInput(format!(
            "height must be a positive number of centimeters, got {}",
            height_cm
        )));
    }

    let height_m = height_cm / 100.0;
    Ok(BmiReading::from_value(weight_kg / (height_m * height_m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal() {
        let reading = bmi(70.0, 175.0).unwrap();
        assert!((reading.value - 22.857).abs() < 0.01);
        assert_eq!(reading.category, BmiCategory::Normal);
    }

    #[test]
    fn test_underweight() {
        let reading = bmi(45.0, 170.0).unwrap();
        assert!((reading.value - 15.57).abs() < 0.01);
        assert_eq!(reading.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(BmiCategory::from_value(18.4999), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Obese);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(bmi(70.0, 0.0), Err(HeartError::InvalidInput(_))));
        assert!(matches!(bmi(-1.0, 170.0), Err(HeartError::InvalidInput(_))));
        assert!(matches!(bmi(f64::NAN, 170.0), Err(HeartError::InvalidInput(_))));
    }

    #[test]
    fn test_meter() {
        assert_eq!(BmiReading::from_value(27.5).meter().percent, 50);
        assert_eq!(BmiReading::from_value(10.0).meter().percent, 0);
        assert_eq!(BmiReading::from_value(45.0).meter().percent, 100);
        assert_eq!(BmiReading::from_value(45.0).meter().color, "red");
    }
}
