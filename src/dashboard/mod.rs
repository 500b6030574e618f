//! Dashboard assembly: one `recompute()` producing a full frame.
//!
//! A frame is everything the renderer needs for one refresh: chart specs
//! for every visual panel plus the tabular records. Panels fail
//! independently; a generator rejecting its parameters marks that one
//! panel failed and leaves the rest of the frame intact.

pub mod refresh;

pub use refresh::{RefreshHandle, RefreshScheduler};

use crate::chart::{self, palette, ChartSpec};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{Channel, ContainerStat, DriftScore, HealthEntry, KpiCard, PipelineRun};
use crate::synth::{generators, MetricSynthesizer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of composing one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PanelState<T> {
    Ready(T),
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PanelState::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            PanelState::Failed(_) => None,
        }
    }
}

/// Sparkline spec tagged with the channel it tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklinePanel {
    pub channel: Channel,
    pub chart: ChartSpec,
}

/// One full recomposition result, handed read-only to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    /// Wall-clock instant this frame was assembled. The only field
    /// expected to change between refreshes while the cache is warm.
    pub generated_at: DateTime<Utc>,
    pub performance: PanelState<ChartSpec>,
    pub drift: PanelState<ChartSpec>,
    pub cost: PanelState<ChartSpec>,
    pub sparklines: PanelState<Vec<SparklinePanel>>,
    /// `None` when the panel is disabled in configuration.
    pub topology: Option<PanelState<ChartSpec>>,
    pub lineage: Option<PanelState<ChartSpec>>,
    pub pipelines: PanelState<Vec<PipelineRun>>,
    pub health: Vec<HealthEntry>,
    pub kpis: Vec<KpiCard>,
    pub drift_scores: Vec<DriftScore>,
    pub containers: Vec<ContainerStat>,
}

impl DashboardFrame {
    /// Number of panels that failed to compose.
    pub fn failed_panels(&self) -> usize {
        let mut failed = 0;
        let mut count = |ready: bool| {
            if !ready {
                failed += 1;
            }
        };
        count(self.performance.is_ready());
        count(self.drift.is_ready());
        count(self.cost.is_ready());
        count(self.sparklines.is_ready());
        count(self.pipelines.is_ready());
        if let Some(panel) = &self.topology {
            count(panel.is_ready());
        }
        if let Some(panel) = &self.lineage {
            count(panel.is_ready());
        }
        failed
    }
}

/// The dashboard core: synthesizer plus configuration, recomputed per tick.
#[derive(Debug)]
pub struct Dashboard {
    config: Config,
    synth: MetricSynthesizer,
}

impl Dashboard {
    pub fn new(config: Config) -> Self {
        let synth = MetricSynthesizer::new(config.synth.clone());
        Dashboard { config, synth }
    }

    /// Assembles a complete frame. Idempotent per tick: cached metric
    /// domains return their stored values, so successive frames differ
    /// only in `generated_at`.
    pub fn recompute(&self) -> DashboardFrame {
        let started = std::time::Instant::now();
        let scheme = self.config.dashboard.color_scheme;

        let performance = panel("performance", || {
            let bundle = self.synth.performance()?;
            chart::performance_chart(&bundle, scheme)
        });
        let drift = panel("drift", || {
            let dist = self.synth.drift()?;
            Ok(chart::drift_chart(&dist))
        });
        let cost = panel("cost", || {
            let breakdown = self.synth.cost()?;
            chart::cost_chart(&breakdown)
        });
        let sparklines = panel("sparklines", || {
            let bundle = self.synth.resources()?;
            [Channel::Cpu, Channel::Memory, Channel::Gpu, Channel::Network]
                .into_iter()
                .map(|channel| {
                    let chart = chart::resource_sparkline(&bundle, channel, palette::CYAN)?;
                    Ok(SparklinePanel { channel, chart })
                })
                .collect::<Result<Vec<_>>>()
        });
        let topology = self.config.dashboard.show_topology.then(|| {
            panel("topology", || {
                let cloud = self.synth.topology()?;
                Ok(chart::topology_3d(&cloud))
            })
        });
        let lineage = self.config.dashboard.show_lineage.then(|| {
            panel("lineage", || {
                let (stages, branch) = generators::lineage_stages();
                chart::lineage_graph(&stages, &branch)
            })
        });
        let pipelines = panel("pipelines", || {
            self.synth.pipelines().map(|runs| runs.as_ref().clone())
        });

        let frame = DashboardFrame {
            generated_at: Utc::now(),
            performance,
            drift,
            cost,
            sparklines,
            topology,
            lineage,
            pipelines,
            health: generators::health_matrix(),
            kpis: generators::kpi_summary(),
            drift_scores: generators::drift_scores(),
            containers: generators::container_stats(),
        };

        tracing::debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            failed = frame.failed_panels(),
            "recomposed dashboard frame"
        );
        frame
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn synthesizer(&self) -> &MetricSynthesizer {
        &self.synth
    }
}

fn panel<T, F>(name: &'static str, compose: F) -> PanelState<T>
where
    F: FnOnce() -> Result<T>,
{
    match compose() {
        Ok(value) => PanelState::Ready(value),
        Err(e) => {
            tracing::error!(panel = name, error = %e, "panel composition failed");
            PanelState::Failed(e.to_string())
        },
    }
}
