//! YouNotes CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use younotes::cli::{commands, Cli, Commands};
use younotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let mut settings = Settings::load_from(config_path.as_ref())?;

    if let Some(url) = &cli.service_url {
        settings.transcript.service_url = url.clone();
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("younotes={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match cli.command {
        Commands::Notes {
            text,
            file,
            youtube,
            lang,
            output,
        } => {
            commands::run_notes(text, file, youtube, lang, output, settings).await?;
        }

        Commands::Transcript { url, lang } => {
            commands::run_transcript(&url, lang, settings).await?;
        }

        Commands::Budget { text, file } => {
            commands::run_budget(text, file, &settings)?;
        }

        Commands::Languages => {
            commands::run_languages();
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(())
}
