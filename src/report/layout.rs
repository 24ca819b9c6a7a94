//! Report content model, independent of the output format

use crate::data::FeatureVector;
use crate::inference::{Identity, RiskLevel};

pub const REPORT_TITLE: &str = "Heart Health Report";

pub const FACTORS_TEXT: &str = "Your result is based on age, blood pressure, heart rate, \
cholesterol, stress level, smoking, diabetes and BMI. Blood pressure, cholesterol and \
smoking carry the most weight for heart disease risk. This report is an estimate from a \
statistical model and is not a medical diagnosis.";

pub const RECOMMENDATIONS_HEADING: &str = "Recommendations";

/// RGB color in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const ACCENT: Rgb = Rgb(0.80, 0.10, 0.20);
    pub const RED: Rgb = Rgb(0.85, 0.15, 0.15);
    pub const GREEN: Rgb = Rgb(0.15, 0.65, 0.30);
    pub const TRACK: Rgb = Rgb(0.88, 0.88, 0.88);
    pub const TEXT: Rgb = Rgb(0.10, 0.10, 0.10);
}

/// One vertical element of the report
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    AccentBar,
    /// Two-column label/value table
    Table(Vec<(String, String)>),
    /// Horizontal meter filled to `score` percent
    RiskMeter { score: u8, color: Rgb },
    Paragraph(String),
    Verdict { text: String, color: Rgb },
    Heading(String),
    Bullets(Vec<String>),
}

impl Block {
    /// Vertical space in millimeters the block occupies
    pub fn height(&self) -> f32 {
        match self {
            Block::Title(_) => 14.0,
            Block::AccentBar => 8.0,
            Block::Table(rows) => 7.0 * rows.len() as f32 + 4.0,
            Block::RiskMeter { .. } => 16.0,
            Block::Paragraph(text) => 5.5 * wrap(text, PARAGRAPH_WIDTH).len() as f32 + 4.0,
            Block::Verdict { .. } => 12.0,
            Block::Heading(_) => 10.0,
            Block::Bullets(items) => 6.5 * items.len() as f32 + 4.0,
        }
    }
}

/// Characters per paragraph line at the body font size
pub const PARAGRAPH_WIDTH: usize = 90;

/// Greedy word wrap
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Ordered blocks making up one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub blocks: Vec<Block>,
}

impl ReportLayout {
    pub fn build(identity: &Identity, features: &FeatureVector, risk: RiskLevel) -> Self {
        let mut rows = vec![("Name".to_string(), display_name(identity))];
        rows.extend(
            features
                .display_rows()
                .into_iter()
                .map(|(label, value)| (label.to_string(), value)),
        );

        let color = if risk.is_high() { Rgb::RED } else { Rgb::GREEN };
        let mut blocks = vec![
            Block::Title(REPORT_TITLE.to_string()),
            Block::AccentBar,
            Block::Table(rows),
            Block::RiskMeter {
                score: risk.risk_score(),
                color,
            },
            Block::Paragraph(FACTORS_TEXT.to_string()),
            Block::Verdict {
                text: format!("Prediction: {}", risk),
                color,
            },
        ];

        if risk.is_high() {
            blocks.push(Block::Heading(RECOMMENDATIONS_HEADING.to_string()));
            blocks.push(Block::Bullets(
                risk.tips().iter().map(|t| t.to_string()).collect(),
            ));
        }

        Self { blocks }
    }

    pub fn has_recommendations(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, Block::Heading(h) if h == RECOMMENDATIONS_HEADING))
    }

    pub fn verdict(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Verdict { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

fn display_name(identity: &Identity) -> String {
    let name = identity.name.trim();
    if name.is_empty() {
        "-".to_string()
    } else {
        // builtin PDF fonts only cover ASCII
        name.chars()
            .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Answer, Gender};

    fn features() -> FeatureVector {
        FeatureVector {
            age: 58.0,
            gender: Gender::Male,
            resting_bp: 150.0,
            heart_rate: 88.0,
            cholesterol: 250.0,
            stress_level: 4.0,
            smoker: Answer::Yes,
            diabetes: Answer::No,
            bmi: 29.0,
        }
    }

    #[test]
    fn test_high_risk_layout() {
        let layout = ReportLayout::build(&Identity::new("Sam"), &features(), RiskLevel::High);
        assert!(layout.has_recommendations());
        assert_eq!(layout.verdict(), Some("Prediction: High Risk"));
        assert!(layout
            .blocks
            .contains(&Block::RiskMeter { score: 80, color: Rgb::RED }));
    }

    #[test]
    fn test_low_risk_layout() {
        let layout = ReportLayout::build(&Identity::new("Sam"), &features(), RiskLevel::Low);
        assert!(!layout.has_recommendations());
        assert_eq!(layout.verdict(), Some("Prediction: Low Risk"));
        assert!(layout
            .blocks
            .contains(&Block::RiskMeter { score: 30, color: Rgb::GREEN }));
    }

    #[test]
    fn test_table_rows() {
        let layout = ReportLayout::build(&Identity::new(""), &features(), RiskLevel::Low);
        let rows = layout
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(rows) => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], ("Name".to_string(), "-".to_string()));
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
        assert!(wrap("", 10).is_empty());
    }
}
