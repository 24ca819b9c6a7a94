//! Total cholesterol calculator

use crate::error::{HeartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Total cholesterol band (mg/dL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CholesterolCategory {
    Desirable,
    BorderlineHigh,
    High,
}

impl CholesterolCategory {
    pub fn from_total(total: f64) -> Self {
        if total < 200.0 {
            CholesterolCategory::Desirable
        } else if total <= 239.0 {
            CholesterolCategory::BorderlineHigh
        } else {
            CholesterolCategory::High
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CholesterolCategory::Desirable => "Healthy range. Maintain your lifestyle!",
            CholesterolCategory::BorderlineHigh => "A bit elevated. Watch your food choices.",
            CholesterolCategory::High => "Risky level. Consider consulting a doctor.",
        }
    }
}

impl fmt::Display for CholesterolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CholesterolCategory::Desirable => write!(f, "Desirable"),
            CholesterolCategory::BorderlineHigh => write!(f, "Borderline High"),
            CholesterolCategory::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CholesterolReading {
    pub total: f64,
    pub category: CholesterolCategory,
}

impl CholesterolReading {
    pub fn message(&self) -> &'static str {
        self.category.message()
    }
}

fn check_part(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(HeartError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Total cholesterol as `HDL + LDL + TG / 5`
pub fn total_cholesterol(hdl: f64, ldl: f64, triglycerides: f64) -> Result<CholesterolReading> {
    check_part("HDL", hdl)?;
    check_part("LDL", ldl)?;
    check_part("triglycerides", triglycerides)?;

    let total = hdl + ldl + triglycerides / 5.0;
    Ok(CholesterolReading {
        total,
        category: CholesterolCategory::from_total(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desirable() {
        let reading = total_cholesterol(50.0, 100.0, 150.0).unwrap();
        assert_eq!(reading.total, 180.0);
        assert_eq!(reading.category, CholesterolCategory::Desirable);
        assert_eq!(reading.message(), "Healthy range. Maintain your lifestyle!");
    }

    #[test]
    fn test_high() {
        let reading = total_cholesterol(40.0, 160.0, 300.0).unwrap();
        assert_eq!(reading.total, 260.0);
        assert_eq!(reading.category, CholesterolCategory::High);
        assert_eq!(reading.message(), "Risky level. Consider consulting a doctor.");

        let reading = total_cholesterol(40.0, 180.0, 200.0).unwrap();
        assert_eq!(reading.total, 260.0);
        assert_eq!(reading.category, CholesterolCategory::High);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(CholesterolCategory::from_total(199.9), CholesterolCategory::Desirable);
        assert_eq!(CholesterolCategory::from_total(200.0), CholesterolCategory::BorderlineHigh);
        assert_eq!(CholesterolCategory::from_total(239.0), CholesterolCategory::BorderlineHigh);
        assert_eq!(CholesterolCategory::from_total(239.5), CholesterolCategory::High);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            total_cholesterol(-1.0, 100.0, 100.0),
            Err(HeartError::InvalidInput(_))
        ));
        assert!(total_cholesterol(0.0, 0.0, 0.0).is_ok());
    }
}
