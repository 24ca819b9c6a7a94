//! Heart Health Studio CLI
//!
//! Command-line access to training, prediction, reports and the calculators.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::calculators::{self, BmiCategory, CholesterolCategory};
use crate::data::{Answer, DatasetLoader, FeatureVector, Gender};
use crate::inference::{Identity, RiskLevel};
use crate::session::Session;
use crate::training::{ClassifierTrainer, TrainerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }
fn alert(s: &str) -> ColoredString  { s.truecolor(235, 90, 90) }
fn warm(s: &str) -> ColoredString   { s.truecolor(240, 170, 70) }
fn cool(s: &str) -> ColoredString   { s.truecolor(120, 170, 255) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", cool("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn risk_colored(risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::High => alert(&risk.to_string()).bold(),
        RiskLevel::Low => ok(&risk.to_string()).bold(),
    }
}

fn bmi_colored(category: BmiCategory) -> ColoredString {
    let label = category.to_string();
    match category {
        BmiCategory::Underweight => cool(&label),
        BmiCategory::Normal => ok(&label),
        BmiCategory::Overweight => warm(&label),
        BmiCategory::Obese => alert(&label),
    }
}

fn cholesterol_colored(category: CholesterolCategory) -> ColoredString {
    let label = category.to_string();
    match category {
        CholesterolCategory::Desirable => ok(&label),
        CholesterolCategory::BorderlineHigh => warm(&label),
        CholesterolCategory::High => alert(&label),
    }
}

fn default_dataset() -> PathBuf {
    std::env::var("DATASET_PATH")
        .unwrap_or_else(|_| "data/heart.csv".to_string())
        .into()
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "heart-studio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Heart disease risk prediction and health calculators")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Health measurements given on the command line
#[derive(clap::Args, Debug, Clone)]
pub struct FeatureArgs {
    #[arg(long)]
    pub age: f64,

    /// Male or Female
    #[arg(long)]
    pub gender: Gender,

    /// Resting blood pressure (mmHg)
    #[arg(long)]
    pub resting_bp: f64,

    #[arg(long)]
    pub heart_rate: f64,

    /// Cholesterol (mg/dL)
    #[arg(long)]
    pub cholesterol: f64,

    /// Stress level, 1-5
    #[arg(long)]
    pub stress_level: f64,

    /// Yes or No
    #[arg(long)]
    pub smoker: Answer,

    /// Yes or No
    #[arg(long)]
    pub diabetes: Answer,

    #[arg(long)]
    pub bmi: f64,
}

impl From<FeatureArgs> for FeatureVector {
    fn from(args: FeatureArgs) -> Self {
        FeatureVector {
            age: args.age,
            gender: args.gender,
            resting_bp: args.resting_bp,
            heart_rate: args.heart_rate,
            cholesterol: args.cholesterol,
            stress_level: args.stress_level,
            smoker: args.smoker,
            diabetes: args.diabetes,
            bmi: args.bmi,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the risk classifier and report held-out accuracy
    Train {
        /// Heart dataset CSV
        #[arg(short, long, default_value_os_t = default_dataset())]
        data: PathBuf,

        /// Number of trees
        #[arg(long, default_value = "300")]
        trees: usize,
    },

    /// Train, then predict risk for one person
    Predict {
        #[arg(short, long, default_value_os_t = default_dataset())]
        data: PathBuf,

        /// Name shown on the report
        #[arg(short, long, default_value = "")]
        name: String,

        #[command(flatten)]
        features: FeatureArgs,

        /// Write a PDF report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Body-mass index
    Bmi {
        /// Weight in kilograms
        #[arg(short, long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,
    },

    /// Total cholesterol from HDL, LDL and triglycerides
    Cholesterol {
        #[arg(long)]
        hdl: f64,

        #[arg(long)]
        ldl: f64,

        #[arg(long)]
        triglycerides: f64,
    },

    /// Show dataset summary
    Info {
        #[arg(short, long, default_value_os_t = default_dataset())]
        data: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Server host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

fn train_session(data_path: &Path, trees: usize) -> anyhow::Result<Session> {
    step_run("Loading data");
    let start = Instant::now();
    let corpus = DatasetLoader::new().load_csv(data_path)?;
    step_done(&format!("{} rows in {:?}", corpus.len(), start.elapsed()));

    step_run(&format!("Training {} trees", trees));
    let start = Instant::now();
    let trainer = ClassifierTrainer::new(TrainerConfig::default().with_n_estimators(trees));
    let mut session = Session::new("cli");
    let accuracy = session.train(&trainer, &corpus)?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    println!(
        "  {:<16} {}",
        muted("Accuracy"),
        format!("{:.2}%", accuracy * 100.0).white().bold()
    );
    Ok(session)
}

pub fn cmd_train(data_path: &Path, trees: usize) -> anyhow::Result<()> {
    section("Train");
    let session = train_session(data_path, trees)?;

    if let Some(model) = session.model() {
        let metrics = model.metrics();
        for (label, value) in [
            ("Precision", metrics.precision),
            ("Recall", metrics.recall),
            ("F1", metrics.f1_score),
        ] {
            println!("  {:<16} {}", muted(label), format!("{:.4}", value).white());
        }
        println!("  {:<16} {}", muted("Test rows"), metrics.n_samples);

        println!();
        println!("  {:<16} {:>10}", muted("Feature"), muted("Importance"));
        println!("  {}", dim(&"─".repeat(28)));
        for (name, importance) in model.feature_importances() {
            println!("  {:<16} {:>10.4}", name, importance);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_predict(
    data_path: &Path,
    name: &str,
    features: FeatureVector,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    section("Predict");
    features.validate()?;
    let mut session = train_session(data_path, TrainerConfig::default().n_estimators)?;

    let prediction = session.predict(Identity::new(name), features)?;
    println!("  {:<16} {}", muted("Prediction"), risk_colored(prediction.risk));
    println!(
        "  {:<16} {}",
        muted("High-risk votes"),
        format!("{:.1}%", prediction.probability * 100.0).white()
    );

    let tips = prediction.risk.tips();
    if !tips.is_empty() {
        section("Recommendations");
        for tip in tips {
            println!("  {} {}", warm("•"), tip);
        }
    }

    if let Some(path) = report {
        step_run(&format!("Writing report → {}", path.display()));
        let bytes = session.report()?;
        std::fs::write(path, &bytes)?;
        step_done(&format!("{} bytes", bytes.len()));
    }

    println!();
    Ok(())
}

pub fn cmd_bmi(weight_kg: f64, height_cm: f64) -> anyhow::Result<()> {
    section("BMI");
    let reading = calculators::bmi(weight_kg, height_cm)?;
    let meter = reading.meter();

    println!("  {:<12} {}", muted("BMI"), format!("{:.2}", reading.value).white().bold());
    println!("  {:<12} {}", muted("Category"), bmi_colored(reading.category));
    println!("  {:<12} {}", muted("Advice"), reading.advice());

    let filled = usize::from(meter.percent) * 40 / 100;
    println!(
        "  {:<12} {}{} {}",
        muted("Meter"),
        "█".repeat(filled),
        dim(&"░".repeat(40 - filled)),
        dim(&format!("{}%", meter.percent))
    );
    println!();
    Ok(())
}

pub fn cmd_cholesterol(hdl: f64, ldl: f64, triglycerides: f64) -> anyhow::Result<()> {
    section("Cholesterol");
    let reading = calculators::total_cholesterol(hdl, ldl, triglycerides)?;

    println!("  {:<12} {} mg/dL", muted("Total"), format!("{:.1}", reading.total).white().bold());
    println!("  {:<12} {}", muted("Category"), cholesterol_colored(reading.category));
    println!("  {:<12} {}", muted("Note"), reading.message());
    println!();
    Ok(())
}

pub fn cmd_info(data_path: &Path) -> anyhow::Result<()> {
    section("Dataset");

    let corpus = DatasetLoader::new().load_csv(data_path)?;
    let summary = corpus.summary();

    println!("  {:<14} {}", muted("File"), data_path.display());
    println!("  {:<14} {}", muted("Rows"), summary.rows);
    println!("  {:<14} {:.1}%", muted("With disease"), summary.positive_rate * 100.0);
    println!();

    println!("  {:<16} {:>10}", muted("Feature"), muted("Mean"));
    println!("  {}", dim(&"─".repeat(28)));
    for feature in &summary.feature_means {
        println!("  {:<16} {:>10.2}", feature.name, feature.mean);
    }

    section("Age distribution");
    let max = summary.age_histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in &summary.age_histogram {
        let width = bin.count * 30 / max;
        println!(
            "  {:>5.1}-{:<5.1} {} {}",
            bin.lower,
            bin.upper,
            cool(&"█".repeat(width)),
            dim(&bin.count.to_string())
        );
    }

    println!();
    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    let config = crate::server::ServerConfig {
        host: host.to_string(),
        port,
        ..Default::default()
    };
    serve(config).await
}

/// Serve with host and port from the environment
pub async fn cmd_serve_default() -> anyhow::Result<()> {
    serve(crate::server::ServerConfig::default()).await
}

async fn serve(config: crate::server::ServerConfig) -> anyhow::Result<()> {
    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Heart Health Studio".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("API    ", &format!("http://{}:{}/api", config.host, config.port)));
    line_box(&kv("Health ", &format!("http://{}:{}/api/health", config.host, config.port)));
    line_box(&kv("Data   ", &config.dataset_path.display().to_string()));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    crate::server::run_server(config).await
}
