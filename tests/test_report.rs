//! Integration test: PDF report

use heart_studio::data::{Answer, FeatureVector, Gender};
use heart_studio::inference::{Identity, RiskLevel};
use heart_studio::report::{render, render_pdf, Block, ReportLayout, FACTORS_TEXT, REPORT_TITLE};

fn features() -> FeatureVector {
    FeatureVector {
        age: 63.0,
        gender: Gender::Male,
        resting_bp: 160.0,
        heart_rate: 95.0,
        cholesterol: 270.0,
        stress_level: 5.0,
        smoker: Answer::Yes,
        diabetes: Answer::Yes,
        bmi: 32.1,
    }
}

#[test]
fn test_high_risk_report_has_recommendations() {
    let layout = ReportLayout::build(&Identity::new("Robin"), &features(), RiskLevel::High);
    assert!(layout.has_recommendations());
    let bullets = layout
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Bullets(items) => Some(items.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(bullets, 7);
}

#[test]
fn test_low_risk_report_omits_recommendations() {
    let layout = ReportLayout::build(&Identity::new("Robin"), &features(), RiskLevel::Low);
    assert!(!layout.has_recommendations());
    assert!(!layout.blocks.iter().any(|b| matches!(b, Block::Bullets(_))));
}

#[test]
fn test_report_starts_with_title() {
    let layout = ReportLayout::build(&Identity::new("Robin"), &features(), RiskLevel::Low);
    assert_eq!(layout.blocks[0], Block::Title(REPORT_TITLE.to_string()));
}

#[test]
fn test_render_pdf_bytes() {
    let bytes = render(&Identity::new("Robin"), &features(), RiskLevel::High).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn test_render_non_ascii_name() {
    let bytes = render(&Identity::new("Zoë"), &features(), RiskLevel::Low).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_standard_report_fits_one_page() {
    let layout = ReportLayout::build(&Identity::new("Robin"), &features(), RiskLevel::High);
    let rendered = render_pdf(&layout).unwrap();
    assert_eq!(rendered.pages, 1);
}

#[test]
fn test_long_layout_breaks_onto_new_pages() {
    let mut layout = ReportLayout::build(&Identity::new("Robin"), &features(), RiskLevel::High);
    let overflow: Vec<Block> = (0..20)
        .map(|_| Block::Paragraph(FACTORS_TEXT.to_string()))
        .collect();
    let total: f32 = overflow.iter().map(Block::height).sum();
    assert!(total > 279.4);
    layout.blocks.extend(overflow);

    let rendered = render_pdf(&layout).unwrap();
    assert!(rendered.pages > 1, "pages: {}", rendered.pages);
    assert!(rendered.bytes.starts_with(b"%PDF"));
}
