//! Heart Health Studio - Main Entry Point
//!
//! Runs a CLI command, or the HTTP server when no command is given.

use clap::Parser;
use heart_studio::cli::{
    cmd_bmi, cmd_cholesterol, cmd_info, cmd_predict, cmd_serve, cmd_serve_default, cmd_train, Cli,
    Commands,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heart_studio=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train { data, trees }) => {
            cmd_train(&data, trees)?;
        }
        Some(Commands::Predict { data, name, features, report }) => {
            cmd_predict(&data, &name, features.into(), report.as_deref())?;
        }
        Some(Commands::Bmi { weight, height }) => {
            cmd_bmi(weight, height)?;
        }
        Some(Commands::Cholesterol { hdl, ldl, triglycerides }) => {
            cmd_cholesterol(hdl, ldl, triglycerides)?;
        }
        Some(Commands::Info { data }) => {
            cmd_info(&data)?;
        }
        Some(Commands::Serve { port, host }) => {
            cmd_serve(&host, port).await?;
        }
        None => {
            cmd_serve_default().await?;
        }
    }

    Ok(())
}
