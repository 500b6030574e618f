//! Configuration system tests.

use opsdeck_lib::core::{Config, ConfigBuilder};
use opsdeck_lib::core::types::ColorScheme;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(30));
    assert_eq!(config.dashboard.color_scheme, ColorScheme::Violet);
    assert_eq!(config.synth.performance_samples, 30);
    assert_eq!(config.synth.resource_samples, 20);
    assert_eq!(config.synth.drift_bins, 50);
    assert_eq!(config.synth.drift_domain, (-5.0, 5.0));
    assert_eq!(config.synth.topology_seed, 42);
    assert_eq!(config.synth.topology_nodes, 20);
}

#[test]
fn test_builder_overrides() {
    let config = ConfigBuilder::new()
        .refresh_interval(Duration::from_secs(5))
        .color_scheme(ColorScheme::Cyan)
        .performance_samples(10)
        .drift_bins(25)
        .topology_seed(1)
        .build()
        .unwrap();

    assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(5));
    assert_eq!(config.dashboard.color_scheme, ColorScheme::Cyan);
    assert_eq!(config.synth.performance_samples, 10);
    assert_eq!(config.synth.drift_bins, 25);
    assert_eq!(config.synth.topology_seed, 1);
}

#[test]
fn test_builder_rejects_invalid() {
    assert!(ConfigBuilder::new().performance_samples(0).build().is_err());
    assert!(ConfigBuilder::new().drift_bins(1).build().is_err());
    assert!(ConfigBuilder::new()
        .refresh_interval(Duration::ZERO)
        .build()
        .is_err());
}

#[test]
fn test_yaml_file_round_trip() {
    let yaml = r#"
dashboard:
  refresh_interval: 45s
  color_scheme: purple
  show_topology: true
  show_lineage: false
synth:
  performance_samples: 24
  resource_samples: 15
  drift_bins: 40
  drift_domain: [-4.0, 4.0]
  topology_seed: 99
  topology_nodes: 16
logging:
  level: warn
"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let config = ConfigBuilder::new()
        .from_yaml(&content)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(45));
    assert_eq!(config.dashboard.color_scheme, ColorScheme::Purple);
    assert!(!config.dashboard.show_lineage);
    assert_eq!(config.synth.performance_samples, 24);
    assert_eq!(config.synth.drift_domain, (-4.0, 4.0));
    assert_eq!(config.logging.level.as_str(), "warn");
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let yaml = r#"
synth:
  performance_samples: 12
"#;
    let config = ConfigBuilder::new()
        .from_yaml(yaml)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.synth.performance_samples, 12);
    // Untouched sections keep defaults.
    assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(30));
}
