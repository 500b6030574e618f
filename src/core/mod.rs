//! Core domain models and configuration for opsdeck.
//!
//! This module contains the fundamental types that flow between metric
//! synthesis, chart composition, and the renderer boundary.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, LogLevel, SynthConfig};
pub use error::{OpsdeckError, Result};
pub use types::{
    BranchPoint, Channel, ColorScheme, ContainerStat, CostBreakdown, CostSlice, DriftDistribution,
    DriftScore, DriftVerdict, HealthEntry, HealthGrade, KpiCard, LineageStage, MetricSeries,
    PipelineRun, PipelineStatus, SampleFreq, SamplePoint, SeriesBundle, TopologyCloud,
    TrendDirection, TriggerSource,
};
