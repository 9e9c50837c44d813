use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_curator::{
    config::{Config, defaults::DEFAULT_CONFIG_FILE},
    errors::{AppError, EXIT_STARTUP_FAILURE, EXIT_SUCCESS},
    pipeline::Orchestrator,
};

#[derive(Parser)]
#[command(name = "m3u-curator")]
#[command(version)]
#[command(about = "Downloads IPTV M3U playlists, keeps channels matching keywords and writes one merged playlist")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (built-in defaults are used if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output playlist path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Per-source download timeout, e.g. "20s" (overrides config file)
    #[arg(short, long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("m3u_curator={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U Curator v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            error!("{}", config_hint(&cli.config, cli.config.exists()));
            return ExitCode::from(EXIT_STARTUP_FAILURE);
        }
    };

    let orchestrator = match Orchestrator::from_config(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => return report(e),
    };

    match orchestrator.run().await {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => report(e),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load_from_file(&cli.config)?;

    // Override config with CLI arguments
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout = timeout;
    }

    config.validate()?;
    Ok(config)
}

fn config_hint(path: &Path, exists: bool) -> String {
    if exists {
        format!(
            "Fix the values in {} or the --output/--timeout flags and run again",
            path.display()
        )
    } else {
        format!(
            "No configuration file at {}; fix the --output/--timeout flags or create the file and run again",
            path.display()
        )
    }
}

fn report(e: AppError) -> ExitCode {
    match &e {
        AppError::Startup { .. } | AppError::Configuration { .. } => {
            error!("Cannot start: {}", e);
        }
        _ => error!("Run failed: {}", e),
    }
    ExitCode::from(e.exit_code())
}
