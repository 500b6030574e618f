//! Configuration management for opsdeck.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - Environment variable overrides (via the CLI layer)
//! - Validation and defaults

use crate::core::error::{OpsdeckError, Result};
use crate::core::types::ColorScheme;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete configuration for opsdeck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard-facing configuration.
    pub dashboard: DashboardConfig,
    /// Metric synthesis parameters.
    pub synth: SynthConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Debug mode.
    #[serde(skip)]
    pub debug: bool,
}

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Full recomposition interval.
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,
    /// Accent color for the performance chart.
    pub color_scheme: ColorScheme,
    /// Render the 3-D topology panel.
    pub show_topology: bool,
    /// Render the model lineage panel.
    pub show_lineage: bool,
}

/// Metric synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Samples in the performance telemetry series.
    pub performance_samples: usize,
    /// Samples in each resource series.
    pub resource_samples: usize,
    /// Bins in the drift distribution.
    pub drift_bins: usize,
    /// Feature-value domain the drift bins span, `[lo, hi]`.
    pub drift_domain: (f64, f64),
    /// Fixed seed for topology node placement. Stable positions keep the
    /// panel from jittering on every refresh.
    pub topology_seed: u64,
    /// Nodes in the topology cloud.
    pub topology_nodes: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,
}

/// Log levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dashboard: DashboardConfig::default(),
            synth: SynthConfig::default(),
            logging: LoggingConfig::default(),
            debug: false,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            refresh_interval: Duration::from_millis(30_000),
            color_scheme: ColorScheme::Violet,
            show_topology: true,
            show_lineage: true,
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            performance_samples: 30,
            resource_samples: 20,
            drift_bins: 50,
            drift_domain: (-5.0, 5.0),
            topology_seed: 42,
            topology_nodes: 20,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Create new config with defaults.
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dashboard.refresh_interval.is_zero() {
            return Err(OpsdeckError::config("refresh_interval must be non-zero"));
        }

        if self.synth.performance_samples == 0 {
            return Err(OpsdeckError::config(
                "performance_samples must be greater than 0",
            ));
        }

        if self.synth.resource_samples == 0 {
            return Err(OpsdeckError::config(
                "resource_samples must be greater than 0",
            ));
        }

        if self.synth.drift_bins < 2 {
            return Err(OpsdeckError::config("drift_bins must be at least 2"));
        }

        let (lo, hi) = self.synth.drift_domain;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(OpsdeckError::config(format!(
                "drift_domain must be a finite [lo, hi] range with lo < hi, got [{lo}, {hi}]"
            )));
        }

        if self.synth.topology_nodes == 0 {
            return Err(OpsdeckError::config(
                "topology_nodes must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Configuration builder for programmatic construction.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string.
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| OpsdeckError::config(format!("Failed to parse YAML config: {}", e)))?;
        Ok(self)
    }

    /// Set the refresh interval.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.dashboard.refresh_interval = interval;
        self
    }

    /// Set the performance chart color scheme.
    pub fn color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.config.dashboard.color_scheme = scheme;
        self
    }

    /// Set the performance series sample count.
    pub fn performance_samples(mut self, n: usize) -> Self {
        self.config.synth.performance_samples = n;
        self
    }

    /// Set the resource series sample count.
    pub fn resource_samples(mut self, n: usize) -> Self {
        self.config.synth.resource_samples = n;
        self
    }

    /// Set the drift bin count.
    pub fn drift_bins(mut self, bins: usize) -> Self {
        self.config.synth.drift_bins = bins;
        self
    }

    /// Set the topology seed.
    pub fn topology_seed(mut self, seed: u64) -> Self {
        self.config.synth.topology_seed = seed;
        self
    }

    /// Set debug mode.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
