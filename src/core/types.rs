use crate::core::error::{OpsdeckError, Result};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Named metric channel within a series bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Accuracy,
    Latency,
    Throughput,
    Cpu,
    Memory,
    Gpu,
    Network,
}

impl Channel {
    /// Returns the channel name as used in chart labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Accuracy => "accuracy",
            Channel::Latency => "latency",
            Channel::Throughput => "throughput",
            Channel::Cpu => "cpu",
            Channel::Memory => "memory",
            Channel::Gpu => "gpu",
            Channel::Network => "network",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spacing between consecutive samples on a timestamp axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFreq {
    Hourly,
    Minutely,
}

impl SampleFreq {
    /// Step between two adjacent samples.
    pub fn step(&self) -> ChronoDuration {
        match self {
            SampleFreq::Hourly => ChronoDuration::hours(1),
            SampleFreq::Minutely => ChronoDuration::minutes(1),
        }
    }
}

/// A single observation on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Ordered samples for exactly one named channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub channel: Channel,
    pub points: Vec<SamplePoint>,
}

impl MetricSeries {
    /// Creates a series after validating strict timestamp ordering.
    pub fn new(channel: Channel, points: Vec<SamplePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(OpsdeckError::invalid_parameter(
                    "points",
                    format!(
                        "timestamps must be strictly increasing for channel '{}'",
                        channel
                    ),
                ));
            }
        }
        Ok(MetricSeries { channel, points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Several channels measured over one shared timestamp axis.
///
/// The performance and resource domains both use this shape; they differ
/// only in which channels are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBundle {
    timestamps: Vec<DateTime<Utc>>,
    channels: BTreeMap<Channel, Vec<f64>>,
}

impl SeriesBundle {
    /// Creates a bundle from a strictly increasing timestamp axis.
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(OpsdeckError::invalid_parameter(
                    "timestamps",
                    "axis must be strictly increasing",
                ));
            }
        }
        Ok(SeriesBundle {
            timestamps,
            channels: BTreeMap::new(),
        })
    }

    /// Attaches channel values. Length must match the timestamp axis.
    pub fn insert_channel(&mut self, channel: Channel, values: Vec<f64>) -> Result<()> {
        if values.len() != self.timestamps.len() {
            return Err(OpsdeckError::invalid_parameter(
                "values",
                format!(
                    "channel '{}' has {} values but the axis has {} timestamps",
                    channel,
                    values.len(),
                    self.timestamps.len()
                ),
            ));
        }
        self.channels.insert(channel, values);
        Ok(())
    }

    /// Shared timestamp axis, oldest first.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Raw values for one channel, if present.
    pub fn channel(&self, channel: Channel) -> Option<&[f64]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    /// Channels present in this bundle, in stable order.
    pub fn channel_names(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.keys().copied()
    }

    /// Materializes one channel as a standalone series.
    pub fn series(&self, channel: Channel) -> Result<MetricSeries> {
        let values = self
            .channel(channel)
            .ok_or_else(|| OpsdeckError::ChannelNotFound(channel.to_string()))?;
        let points = self
            .timestamps
            .iter()
            .zip(values.iter())
            .map(|(&timestamp, &value)| SamplePoint { timestamp, value })
            .collect();
        MetricSeries::new(channel, points)
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Baseline vs current distribution over shared feature-value bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftDistribution {
    pub x: Vec<f64>,
    pub baseline: Vec<f64>,
    pub current: Vec<f64>,
}

impl DriftDistribution {
    /// Creates a distribution after checking the three vectors align.
    pub fn new(x: Vec<f64>, baseline: Vec<f64>, current: Vec<f64>) -> Result<Self> {
        if baseline.len() != x.len() || current.len() != x.len() {
            return Err(OpsdeckError::invalid_parameter(
                "distribution",
                format!(
                    "bin axis has {} entries, baseline {}, current {}",
                    x.len(),
                    baseline.len(),
                    current.len()
                ),
            ));
        }
        Ok(DriftDistribution {
            x,
            baseline,
            current,
        })
    }

    pub fn bins(&self) -> usize {
        self.x.len()
    }
}

/// Status of a pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStatus {
    Running,
    Success,
    Failed,
    Pending,
}

impl PipelineStatus {
    /// Badge color for UI display.
    pub fn color(&self) -> &'static str {
        match self {
            PipelineStatus::Running => "#00F0FF",
            PipelineStatus::Success => "#10B981",
            PipelineStatus::Failed => "#EF4444",
            PipelineStatus::Pending => "#A855F7",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStatus::Running => "Running",
            PipelineStatus::Success => "Success",
            PipelineStatus::Failed => "Failed",
            PipelineStatus::Pending => "Pending",
        };
        write!(f, "{}", label)
    }
}

/// What kicked off a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSource {
    Schedule,
    Manual,
    CiCd,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TriggerSource::Schedule => "Schedule",
            TriggerSource::Manual => "Manual",
            TriggerSource::CiCd => "CI/CD",
        };
        write!(f, "{}", label)
    }
}

/// One pipeline execution record. Immutable once synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub status: PipelineStatus,
    pub triggered_by: TriggerSource,
}

/// One slice of the cost donut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSlice {
    pub category: String,
    pub percentage: f64,
    pub color: String,
}

/// Cost split across infrastructure categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub slices: Vec<CostSlice>,
}

impl CostBreakdown {
    /// Percentages must sum to 100 within rounding tolerance.
    pub fn validate(&self) -> Result<()> {
        let total: f64 = self.slices.iter().map(|s| s.percentage).sum();
        if (total - 100.0).abs() > 0.5 {
            return Err(OpsdeckError::invalid_parameter(
                "percentages",
                format!("cost slices sum to {total}, expected 100"),
            ));
        }
        Ok(())
    }
}

/// Accent palette for the performance chart line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Violet,
    Cyan,
    Purple,
    Green,
}

impl ColorScheme {
    /// Parses a scheme name, falling back to violet for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "cyan" => ColorScheme::Cyan,
            "purple" => ColorScheme::Purple,
            "green" => ColorScheme::Green,
            _ => ColorScheme::Violet,
        }
    }

    /// Resolved hex color.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorScheme::Violet => "#8B5CF6",
            ColorScheme::Cyan => "#00F0FF",
            ColorScheme::Purple => "#A855F7",
            ColorScheme::Green => "#10B981",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Violet => "violet",
            ColorScheme::Cyan => "cyan",
            ColorScheme::Purple => "purple",
            ColorScheme::Green => "green",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seeded 3-D node positions for the cluster topology panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyCloud {
    pub seed: u64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl TopologyCloud {
    pub fn node_count(&self) -> usize {
        self.xs.len()
    }

    /// Display label for node `i`.
    pub fn label(&self, i: usize) -> String {
        format!("Node {}", i + 1)
    }
}

/// Health grade derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthGrade {
    Excellent,
    Good,
    Warning,
}

impl HealthGrade {
    /// Grades a component score: >=95 excellent, >=85 good, below warning.
    pub fn from_score(score: u8) -> Self {
        if score >= 95 {
            HealthGrade::Excellent
        } else if score >= 85 {
            HealthGrade::Good
        } else {
            HealthGrade::Warning
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HealthGrade::Excellent => "#10B981",
            HealthGrade::Good => "#8B5CF6",
            HealthGrade::Warning => "#F59E0B",
        }
    }
}

/// One row of the component health table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub component: String,
    pub score: u8,
    pub grade: HealthGrade,
}

impl HealthEntry {
    pub fn new<S: Into<String>>(component: S, score: u8) -> Self {
        HealthEntry {
            component: component.into(),
            score,
            grade: HealthGrade::from_score(score),
        }
    }
}

/// Week-over-week direction on a KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Headline KPI record for the overview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub trend: TrendDirection,
    pub trend_note: String,
}

/// Verdict attached to a drift indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftVerdict {
    Stable,
    Monitor,
    NoDrift,
}

/// One drift indicator card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftScore {
    pub label: String,
    pub value: f64,
    pub verdict: DriftVerdict,
}

/// Resource usage of one illustrative container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStat {
    pub name: String,
    pub cpu_percent: f64,
    pub memory_mb: u64,
    pub active: bool,
}

/// One stage of the model lineage DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageStage {
    pub label: String,
}

/// The version split hanging off the lineage chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPoint {
    /// Index of the stage the branch forks from.
    pub stage_index: usize,
    pub label: String,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn axis(n: usize) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 12, 29, 12, 0, 0).unwrap();
        (0..n)
            .map(|i| start + ChronoDuration::hours(i as i64))
            .collect()
    }

    #[test]
    fn test_bundle_rejects_unordered_axis() {
        let mut ts = axis(3);
        ts.swap(0, 2);
        assert!(SeriesBundle::new(ts).is_err());
    }

    #[test]
    fn test_bundle_rejects_duplicate_timestamps() {
        let mut ts = axis(3);
        ts[2] = ts[1];
        assert!(SeriesBundle::new(ts).is_err());
    }

    #[test]
    fn test_bundle_channel_length_check() {
        let mut bundle = SeriesBundle::new(axis(3)).unwrap();
        assert!(bundle.insert_channel(Channel::Cpu, vec![1.0, 2.0]).is_err());
        assert!(bundle
            .insert_channel(Channel::Cpu, vec![1.0, 2.0, 3.0])
            .is_ok());
        assert_eq!(bundle.channel(Channel::Cpu), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn test_series_extraction() {
        let mut bundle = SeriesBundle::new(axis(2)).unwrap();
        bundle
            .insert_channel(Channel::Accuracy, vec![94.0, 95.0])
            .unwrap();
        let series = bundle.series(Channel::Accuracy).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[1].value, 95.0);
        assert!(bundle.series(Channel::Gpu).is_err());
    }

    #[test]
    fn test_drift_alignment() {
        assert!(DriftDistribution::new(vec![0.0], vec![1.0], vec![1.0, 2.0]).is_err());
        let dist = DriftDistribution::new(vec![0.0, 1.0], vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(dist.bins(), 2);
    }

    #[test]
    fn test_color_scheme_fallback() {
        assert_eq!(ColorScheme::from_name("cyan"), ColorScheme::Cyan);
        assert_eq!(ColorScheme::from_name("GREEN"), ColorScheme::Green);
        assert_eq!(ColorScheme::from_name("magenta"), ColorScheme::Violet);
        assert_eq!(ColorScheme::from_name(""), ColorScheme::Violet);
    }

    #[test]
    fn test_health_grading() {
        assert_eq!(HealthGrade::from_score(100), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(95), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(89), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(84), HealthGrade::Warning);
    }

    #[test]
    fn test_cost_validation() {
        let good = CostBreakdown {
            slices: vec![
                CostSlice {
                    category: "Compute".to_string(),
                    percentage: 60.0,
                    color: "#8B5CF6".to_string(),
                },
                CostSlice {
                    category: "Other".to_string(),
                    percentage: 40.0,
                    color: "#6366F1".to_string(),
                },
            ],
        };
        assert!(good.validate().is_ok());

        let bad = CostBreakdown {
            slices: vec![CostSlice {
                category: "Compute".to_string(),
                percentage: 80.0,
                color: "#8B5CF6".to_string(),
            }],
        };
        assert!(bad.validate().is_err());
    }
}
