use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use metrics_analyzer::{Analyzer, AnalyzerResult, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, settings = ?cli.settings, "parsed CLI arguments");

    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> AnalyzerResult<String> {
    let analyzer = Analyzer::new(&cli.settings)?;
    analyzer.run(cli.command).await
}
