//! Metric synthesis: generators wrapped in process-lifetime memoization.
//!
//! `MetricSynthesizer` is the only producer of dashboard data. Each domain
//! accessor computes its value on first use and serves the stored value on
//! every later call, so a 30-second refresh shows stable history instead of
//! freshly drawn noise. Only clearing the cache (a simulated restart)
//! causes new draws; the topology domain is additionally seeded and so
//! survives even that.

pub mod cache;
pub mod generators;

pub use cache::SynthCache;

use crate::core::config::SynthConfig;
use crate::core::error::Result;
use crate::core::types::{
    CostBreakdown, DriftDistribution, PipelineRun, SampleFreq, SeriesBundle, TopologyCloud,
};
use chrono::Utc;
use rand::thread_rng;
use serde::Serialize;
use std::sync::Arc;

/// Heterogeneous cache payload, one variant per metric domain.
#[derive(Debug, Clone)]
enum SynthValue {
    Performance(Arc<SeriesBundle>),
    Drift(Arc<DriftDistribution>),
    Resources(Arc<SeriesBundle>),
    Cost(Arc<CostBreakdown>),
    Pipelines(Arc<Vec<PipelineRun>>),
    Topology(Arc<TopologyCloud>),
}

#[derive(Serialize)]
struct SeriesParams {
    n: usize,
    freq: SampleFreq,
}

#[derive(Serialize)]
struct DriftParams {
    bins: usize,
    domain: (f64, f64),
}

#[derive(Serialize)]
struct TopologyParams {
    seed: u64,
    node_count: usize,
}

/// Memoizing orchestrator over the metric generators.
#[derive(Debug)]
pub struct MetricSynthesizer {
    config: SynthConfig,
    cache: SynthCache<SynthValue>,
}

impl MetricSynthesizer {
    /// Creates a synthesizer with an empty cache.
    pub fn new(config: SynthConfig) -> Self {
        MetricSynthesizer {
            config,
            cache: SynthCache::new(),
        }
    }

    /// Model performance telemetry; hourly axis ending at first-call time.
    pub fn performance(&self) -> Result<Arc<SeriesBundle>> {
        let params = SeriesParams {
            n: self.config.performance_samples,
            freq: SampleFreq::Hourly,
        };
        let value = self.cache.get_or_insert_with("performance", &params, || {
            let bundle = generators::performance_series(
                params.n,
                params.freq,
                Utc::now(),
                &mut thread_rng(),
            )?;
            Ok(SynthValue::Performance(Arc::new(bundle)))
        })?;
        match &*value {
            SynthValue::Performance(bundle) => Ok(Arc::clone(bundle)),
            other => unreachable!("performance key cached foreign value {other:?}"),
        }
    }

    /// Baseline vs current feature distribution.
    pub fn drift(&self) -> Result<Arc<DriftDistribution>> {
        let params = DriftParams {
            bins: self.config.drift_bins,
            domain: self.config.drift_domain,
        };
        let value = self.cache.get_or_insert_with("drift", &params, || {
            let dist =
                generators::drift_distribution(params.bins, params.domain, &mut thread_rng())?;
            Ok(SynthValue::Drift(Arc::new(dist)))
        })?;
        match &*value {
            SynthValue::Drift(dist) => Ok(Arc::clone(dist)),
            other => unreachable!("drift key cached foreign value {other:?}"),
        }
    }

    /// Infrastructure utilization; minutely axis ending at first-call time.
    pub fn resources(&self) -> Result<Arc<SeriesBundle>> {
        let params = SeriesParams {
            n: self.config.resource_samples,
            freq: SampleFreq::Minutely,
        };
        let value = self.cache.get_or_insert_with("resources", &params, || {
            let bundle =
                generators::resource_series(params.n, params.freq, Utc::now(), &mut thread_rng())?;
            Ok(SynthValue::Resources(Arc::new(bundle)))
        })?;
        match &*value {
            SynthValue::Resources(bundle) => Ok(Arc::clone(bundle)),
            other => unreachable!("resources key cached foreign value {other:?}"),
        }
    }

    /// Fixed cost split.
    pub fn cost(&self) -> Result<Arc<CostBreakdown>> {
        let value = self.cache.get_or_insert_with("cost", &(), || {
            Ok(SynthValue::Cost(Arc::new(generators::cost_breakdown())))
        })?;
        match &*value {
            SynthValue::Cost(cost) => Ok(Arc::clone(cost)),
            other => unreachable!("cost key cached foreign value {other:?}"),
        }
    }

    /// Fixed pipeline execution history.
    pub fn pipelines(&self) -> Result<Arc<Vec<PipelineRun>>> {
        let value = self.cache.get_or_insert_with("pipelines", &(), || {
            Ok(SynthValue::Pipelines(Arc::new(
                generators::pipeline_history(),
            )))
        })?;
        match &*value {
            SynthValue::Pipelines(runs) => Ok(Arc::clone(runs)),
            other => unreachable!("pipelines key cached foreign value {other:?}"),
        }
    }

    /// Seeded topology node positions.
    pub fn topology(&self) -> Result<Arc<TopologyCloud>> {
        let params = TopologyParams {
            seed: self.config.topology_seed,
            node_count: self.config.topology_nodes,
        };
        let value = self.cache.get_or_insert_with("topology", &params, || {
            let cloud = generators::topology_points(params.seed, params.node_count)?;
            Ok(SynthValue::Topology(Arc::new(cloud)))
        })?;
        match &*value {
            SynthValue::Topology(cloud) => Ok(Arc::clone(cloud)),
            other => unreachable!("topology key cached foreign value {other:?}"),
        }
    }

    /// Drops all cached values, forcing fresh draws on the next access.
    /// Equivalent to a process restart; never called by the refresh loop.
    pub fn invalidate_all(&self) {
        tracing::info!("invalidating synthesized metric cache");
        self.cache.clear();
    }

    /// Distinct domains generated so far.
    pub fn cached_domains(&self) -> usize {
        self.cache.len()
    }

    /// Synthesis parameters in effect.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Channel;

    fn synthesizer() -> MetricSynthesizer {
        MetricSynthesizer::new(SynthConfig::default())
    }

    #[test]
    fn test_performance_is_memoized() {
        let synth = synthesizer();
        let first = synth.performance().unwrap();
        let second = synth.performance().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.channel(Channel::Accuracy),
            second.channel(Channel::Accuracy)
        );
        assert_eq!(synth.cached_domains(), 1);
    }

    #[test]
    fn test_each_domain_cached_once() {
        let synth = synthesizer();
        synth.performance().unwrap();
        synth.drift().unwrap();
        synth.resources().unwrap();
        synth.cost().unwrap();
        synth.pipelines().unwrap();
        synth.topology().unwrap();
        assert_eq!(synth.cached_domains(), 6);

        // A second pass adds no keys.
        synth.drift().unwrap();
        synth.topology().unwrap();
        assert_eq!(synth.cached_domains(), 6);
    }

    #[test]
    fn test_invalidate_keeps_deterministic_domains_stable() {
        let synth = synthesizer();
        let before = synth.topology().unwrap();
        let drift_before = synth.drift().unwrap();

        synth.invalidate_all();
        assert_eq!(synth.cached_domains(), 0);

        // Seeded topology regenerates identically; drift keeps its exact
        // baseline curve and bin count even though the noise re-draws.
        let after = synth.topology().unwrap();
        assert_eq!(*before, *after);

        let drift_after = synth.drift().unwrap();
        assert_eq!(drift_before.baseline, drift_after.baseline);
        assert_eq!(drift_before.bins(), drift_after.bins());
    }

    #[test]
    fn test_invalid_config_surfaces_per_domain() {
        let mut config = SynthConfig::default();
        config.drift_bins = 1;
        let synth = MetricSynthesizer::new(config);

        assert!(synth.drift().is_err());
        // Sibling domains are unaffected.
        assert!(synth.performance().is_ok());
        assert!(synth.cost().is_ok());
    }
}
