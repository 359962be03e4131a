use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use socialsense::analysis::{AnalysisClient, AnalysisMode, AnalysisRequest};
use socialsense::config::{AnalyzerSettings, FileLogSettings};
use socialsense::dashboard::run_dashboard;
use socialsense::logging::init_tracing;
use socialsense::report::render_report;
use socialsense::server::run_http_server;

#[derive(Debug, Parser)]
#[command(
    name = "socialsense",
    about = "AI-powered social listening dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the native dashboard.
    Dashboard,
    /// Run one analysis and print the result.
    Analyze {
        /// `brand`, `youtube` or `competitor`.
        mode: AnalysisMode,
        /// Brand/topic, video reference, or your brand handle.
        primary: String,
        /// Competitor handle (competitor mode only).
        secondary: Option<String>,
        /// Print the result as JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },
    /// Serve the analysis endpoint over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let file_log = FileLogSettings::from_env();
    let _log_guard = init_tracing(file_log.as_ref())?;

    let settings = AnalyzerSettings::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Dashboard => run_dashboard(&settings)?,
        Commands::Analyze {
            mode,
            primary,
            secondary,
            json,
        } => run_analyze(&settings, mode, &primary, secondary.as_deref(), json).await?,
        Commands::Serve { bind } => run_http_server(&settings, &bind).await?,
    }

    Ok(())
}

async fn run_analyze(
    settings: &AnalyzerSettings,
    mode: AnalysisMode,
    primary: &str,
    secondary: Option<&str>,
    json: bool,
) -> Result<()> {
    let request = AnalysisRequest::from_inputs(mode, primary, secondary.unwrap_or_default())?;
    info!(mode = %mode, model = %settings.model, "running analysis");

    let result = AnalysisClient::from_settings(settings)
        .analyze(&request)
        .await
        .context("analysis did not complete")?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&result).context("failed to serialize analysis result")?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&result, &request.label()));
    }

    Ok(())
}
