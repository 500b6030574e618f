//! Command-line interface for opsdeck.
//!
//! Run `opsdeck` to start the refresh loop with sensible defaults; each
//! tick writes one JSON frame to stdout for a downstream renderer.

use crate::core::config::{Config, ConfigBuilder};
use crate::core::error::{OpsdeckError, Result};
use crate::core::types::ColorScheme;
use crate::dashboard::{Dashboard, RefreshScheduler};
use crate::render::{JsonRenderer, Renderer, SummaryRenderer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// MLOps telemetry dashboard core - synthesizes metrics, composes charts.
#[derive(Parser, Debug)]
#[command(name = "opsdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.config/opsdeck/config.yaml)
    #[arg(short, long, env = "OPSDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(long, env = "OPSDECK_REFRESH_SECS")]
    pub refresh_secs: Option<u64>,

    /// Performance chart color scheme: violet, cyan, purple or green.
    /// Unknown names fall back to violet.
    #[arg(long, env = "OPSDECK_COLOR_SCHEME")]
    pub color_scheme: Option<String>,

    /// Render a single frame to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// Log one-line frame summaries instead of emitting JSON frames
    #[arg(long, env = "OPSDECK_SUMMARY")]
    pub summary: bool,

    /// Enable debug logging
    #[arg(short, long, env = "OPSDECK_DEBUG")]
    pub debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Load configuration with proper precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (via clap's env support)
    /// 3. Config file
    /// 4. Defaults (lowest priority)
    pub async fn load_config(&self) -> Result<Config> {
        let config_path = match &self.config {
            Some(path) => Some(path.clone()),
            None => dirs::config_dir()
                .map(|d| d.join("opsdeck").join("config.yaml"))
                .filter(|p| p.exists()),
        };

        let mut builder = ConfigBuilder::new();
        if let Some(path) = config_path {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                OpsdeckError::config(format!("failed to read {}: {}", path.display(), e))
            })?;
            builder = builder.from_yaml(&content)?;
        }

        if let Some(secs) = self.refresh_secs {
            builder = builder.refresh_interval(Duration::from_secs(secs));
        }
        if let Some(name) = &self.color_scheme {
            builder = builder.color_scheme(ColorScheme::from_name(name));
        }
        builder = builder.debug(self.debug);

        builder.build()
    }
}

/// Execute the parsed command.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.load_config().await?;
    init_logging(&config);

    if cli.check_config {
        println!("configuration OK");
        return Ok(());
    }

    let dashboard = Arc::new(Dashboard::new(config.clone()));

    if cli.once {
        let frame = dashboard.recompute();
        let mut renderer = JsonRenderer::new(std::io::stdout());
        return renderer.render(&frame);
    }

    let interval = config.dashboard.refresh_interval;
    tracing::info!(
        refresh = ?interval,
        color_scheme = %config.dashboard.color_scheme,
        "starting dashboard refresh loop"
    );

    let handle = if cli.summary {
        RefreshScheduler::spawn(dashboard, interval, SummaryRenderer::new())
    } else {
        RefreshScheduler::spawn(dashboard, interval, JsonRenderer::new(std::io::stdout()))
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    handle.shutdown().await
}

fn init_logging(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let default_level = if config.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("opsdeck_lib={default_level}")));

    // Frames go to stdout; keep logs on stderr so piping stays clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cli_overrides_take_precedence() {
        let cli = Cli::parse_from([
            "opsdeck",
            "--refresh-secs",
            "5",
            "--color-scheme",
            "green",
        ]);
        let config = cli.load_config().await.unwrap();
        assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.dashboard.color_scheme, ColorScheme::Green);
    }

    #[tokio::test]
    async fn test_unknown_color_scheme_falls_back() {
        let cli = Cli::parse_from(["opsdeck", "--color-scheme", "magenta"]);
        let config = cli.load_config().await.unwrap();
        assert_eq!(config.dashboard.color_scheme, ColorScheme::Violet);
    }

    #[tokio::test]
    async fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["opsdeck", "--config", "/nonexistent/opsdeck.yaml"]);
        assert!(cli.load_config().await.is_err());
    }
}
