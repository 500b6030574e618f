//! Parametric sequence generators for the synthesized metric domains.
//!
//! Every noisy generator takes the RNG by argument so call sites decide
//! between fresh entropy and a fixed seed. The topology cloud is the one
//! domain that always runs seeded: node positions must not jitter between
//! refreshes.

use crate::core::error::{OpsdeckError, Result};
use crate::core::types::{
    BranchPoint, Channel, ContainerStat, CostBreakdown, CostSlice, DriftDistribution, DriftScore,
    DriftVerdict, HealthEntry, KpiCard, LineageStage, PipelineRun, PipelineStatus, SampleFreq,
    SeriesBundle, TopologyCloud, TrendDirection, TriggerSource,
};
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Draws from N(mean, sigma) via the Box-Muller transform.
///
/// rand 0.8 ships uniform sampling only; the Normal distribution lives in
/// rand_distr, which this crate does not depend on.
fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    mean + sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Builds a timestamp axis of `n` samples ending exactly at `ending_at`,
/// oldest first.
fn timestamp_axis(n: usize, freq: SampleFreq, ending_at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let step = freq.step();
    (0..n)
        .map(|i| ending_at - step * ((n - 1 - i) as i32))
        .collect()
}

/// Model performance telemetry: accuracy rides a sine wave around 70%,
/// latency and throughput are flat lines plus noise.
pub fn performance_series<R: Rng + ?Sized>(
    n: usize,
    freq: SampleFreq,
    ending_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<SeriesBundle> {
    if n == 0 {
        return Err(OpsdeckError::invalid_parameter(
            "n",
            "performance series needs at least one sample",
        ));
    }

    let mut bundle = SeriesBundle::new(timestamp_axis(n, freq, ending_at))?;
    let accuracy = (0..n)
        .map(|i| 70.0 + 20.0 * (0.3 * i as f64).sin() + gauss(rng, 0.0, 3.0))
        .collect();
    let latency = (0..n).map(|_| 25.0 + gauss(rng, 0.0, 5.0)).collect();
    let throughput = (0..n).map(|_| 1000.0 + gauss(rng, 0.0, 100.0)).collect();

    bundle.insert_channel(Channel::Accuracy, accuracy)?;
    bundle.insert_channel(Channel::Latency, latency)?;
    bundle.insert_channel(Channel::Throughput, throughput)?;
    Ok(bundle)
}

/// Baseline vs current feature distribution over uniform bins.
///
/// The baseline is an exact scaled Gaussian density; only the current
/// distribution carries noise, so drift reads as a shifted, slightly
/// shorter and rougher copy of the baseline.
pub fn drift_distribution<R: Rng + ?Sized>(
    bins: usize,
    domain: (f64, f64),
    rng: &mut R,
) -> Result<DriftDistribution> {
    if bins < 2 {
        return Err(OpsdeckError::invalid_parameter(
            "bins",
            "drift distribution needs at least 2 bins",
        ));
    }
    let (lo, hi) = domain;
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(OpsdeckError::invalid_parameter(
            "domain",
            format!("expected finite [lo, hi] with lo < hi, got [{lo}, {hi}]"),
        ));
    }

    let step = (hi - lo) / (bins - 1) as f64;
    let x: Vec<f64> = (0..bins).map(|i| lo + step * i as f64).collect();
    let baseline: Vec<f64> = x.iter().map(|&v| 100.0 * (-0.5 * v * v).exp()).collect();
    let current: Vec<f64> = x
        .iter()
        .map(|&v| 90.0 * (-0.5 * (v - 0.5) * (v - 0.5)).exp() + gauss(rng, 0.0, 5.0))
        .collect();

    DriftDistribution::new(x, baseline, current)
}

/// Infrastructure utilization: cpu, memory, gpu and network channels on a
/// shared minutely axis.
pub fn resource_series<R: Rng + ?Sized>(
    n: usize,
    freq: SampleFreq,
    ending_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<SeriesBundle> {
    if n == 0 {
        return Err(OpsdeckError::invalid_parameter(
            "n",
            "resource series needs at least one sample",
        ));
    }

    let mut bundle = SeriesBundle::new(timestamp_axis(n, freq, ending_at))?;
    let cpu = (0..n).map(|_| rng.gen::<f64>() * 100.0).collect();
    let memory = (0..n).map(|_| 40.0 + rng.gen::<f64>() * 30.0).collect();
    let gpu = (0..n).map(|_| 60.0 + rng.gen::<f64>() * 40.0).collect();
    let network = (0..n).map(|_| rng.gen::<f64>() * 300.0).collect();

    bundle.insert_channel(Channel::Cpu, cpu)?;
    bundle.insert_channel(Channel::Memory, memory)?;
    bundle.insert_channel(Channel::Gpu, gpu)?;
    bundle.insert_channel(Channel::Network, network)?;
    Ok(bundle)
}

/// Fixed cost split across infrastructure categories.
pub fn cost_breakdown() -> CostBreakdown {
    let slice = |category: &str, percentage: f64, color: &str| CostSlice {
        category: category.to_string(),
        percentage,
        color: color.to_string(),
    };
    CostBreakdown {
        slices: vec![
            slice("Compute", 45.0, "#8B5CF6"),
            slice("Storage", 25.0, "#00F0FF"),
            slice("Network", 15.0, "#A855F7"),
            slice("Other", 15.0, "#6366F1"),
        ],
    }
}

/// Fixed illustrative pipeline execution history, newest first.
pub fn pipeline_history() -> Vec<PipelineRun> {
    let run = |id: &str,
               started_at: DateTime<Utc>,
               duration_secs: u64,
               status: PipelineStatus,
               triggered_by: TriggerSource| PipelineRun {
        id: id.to_string(),
        started_at,
        duration: Duration::from_secs(duration_secs),
        status,
        triggered_by,
    };

    vec![
        run(
            "pipe-7f8a9",
            Utc.with_ymd_and_hms(2024, 12, 29, 18, 45, 0).unwrap(),
            45 * 60 + 23,
            PipelineStatus::Running,
            TriggerSource::Schedule,
        ),
        run(
            "pipe-6e7b8",
            Utc.with_ymd_and_hms(2024, 12, 29, 14, 20, 0).unwrap(),
            72 * 60,
            PipelineStatus::Success,
            TriggerSource::Manual,
        ),
        run(
            "pipe-5d6c7",
            Utc.with_ymd_and_hms(2024, 12, 29, 10, 15, 0).unwrap(),
            58 * 60 + 47,
            PipelineStatus::Success,
            TriggerSource::CiCd,
        ),
        run(
            "pipe-4c5b6",
            Utc.with_ymd_and_hms(2024, 12, 29, 6, 30, 0).unwrap(),
            65 * 60,
            PipelineStatus::Success,
            TriggerSource::Schedule,
        ),
        run(
            "pipe-3b4a5",
            Utc.with_ymd_and_hms(2024, 12, 28, 22, 0, 0).unwrap(),
            52 * 60 + 19,
            PipelineStatus::Success,
            TriggerSource::Manual,
        ),
    ]
}

/// Seeded 3-D node positions in a 10x10x10 cube.
pub fn topology_points(seed: u64, node_count: usize) -> Result<TopologyCloud> {
    if node_count == 0 {
        return Err(OpsdeckError::invalid_parameter(
            "node_count",
            "topology needs at least one node",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    // Axis at a time, so adding nodes extends rather than reshuffles.
    let xs: Vec<f64> = (0..node_count).map(|_| rng.gen::<f64>() * 10.0).collect();
    let ys: Vec<f64> = (0..node_count).map(|_| rng.gen::<f64>() * 10.0).collect();
    let zs: Vec<f64> = (0..node_count).map(|_| rng.gen::<f64>() * 10.0).collect();

    Ok(TopologyCloud { seed, xs, ys, zs })
}

/// Component health scores for the overview table.
pub fn health_matrix() -> Vec<HealthEntry> {
    vec![
        HealthEntry::new("API Gateway", 98),
        HealthEntry::new("Model Registry", 95),
        HealthEntry::new("Data Pipeline", 89),
        HealthEntry::new("Training Cluster", 92),
        HealthEntry::new("Monitoring Stack", 100),
    ]
}

/// Headline KPI cards for the overview panel.
pub fn kpi_summary() -> Vec<KpiCard> {
    vec![
        KpiCard {
            label: "Model Accuracy".to_string(),
            value: 94.7,
            unit: "%".to_string(),
            trend: TrendDirection::Up,
            trend_note: "2.3% from last week".to_string(),
        },
        KpiCard {
            label: "Inference Speed".to_string(),
            value: 28.0,
            unit: "ms".to_string(),
            trend: TrendDirection::Down,
            trend_note: "15% faster".to_string(),
        },
        KpiCard {
            label: "Active Models".to_string(),
            value: 12.0,
            unit: String::new(),
            trend: TrendDirection::Flat,
            trend_note: "Stable deployment".to_string(),
        },
    ]
}

/// Drift indicator cards shown next to the distribution chart.
pub fn drift_scores() -> Vec<DriftScore> {
    vec![
        DriftScore {
            label: "Population Stability".to_string(),
            value: 0.089,
            verdict: DriftVerdict::Stable,
        },
        DriftScore {
            label: "Feature Drift Score".to_string(),
            value: 0.234,
            verdict: DriftVerdict::Monitor,
        },
        DriftScore {
            label: "Concept Drift".to_string(),
            value: 0.012,
            verdict: DriftVerdict::NoDrift,
        },
    ]
}

/// Illustrative container resource usage.
pub fn container_stats() -> Vec<ContainerStat> {
    let stat = |name: &str, cpu_percent: f64, memory_mb: u64| ContainerStat {
        name: name.to_string(),
        cpu_percent,
        memory_mb,
        active: true,
    };
    vec![
        stat("mlflow-server", 23.0, 2100),
        stat("prometheus", 12.0, 1800),
        stat("grafana", 8.0, 892),
    ]
}

/// Lineage stages and the version branch hanging off the training stage.
pub fn lineage_stages() -> (Vec<LineageStage>, BranchPoint) {
    let stage = |label: &str| LineageStage {
        label: label.to_string(),
    };
    let stages = vec![
        stage("Data Ingestion"),
        stage("Feature Engineering"),
        stage("Model Training"),
        stage("Validation"),
        stage("Deployment"),
    ];
    let branch = BranchPoint {
        stage_index: 2,
        label: "v2.0".to_string(),
        note: "June 2024".to_string(),
    };
    (stages, branch)
}
