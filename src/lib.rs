//! Opsdeck - MLOps telemetry dashboard core.
//!
//! Opsdeck synthesizes time-series and categorical metrics describing an
//! ML operations environment and composes them into declarative chart
//! specifications for an external renderer. A refresh scheduler triggers
//! a full recomposition on a fixed interval; a process-lifetime cache
//! keeps the synthesized history visually stable across refreshes.
//!
//! # Architecture
//!
//! - `core`: domain models, configuration, errors
//! - `synth`: metric generators plus memoization
//! - `chart`: pure composition of chart specifications
//! - `dashboard`: frame assembly and the refresh loop
//! - `render`: the renderer boundary (trait + JSON reference impl)
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```no_run
//! use opsdeck_lib::core::Config;
//! use opsdeck_lib::dashboard::Dashboard;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Dashboard::new(Config::default());
//!     let frame = dashboard.recompute();
//!     println!("{}", serde_json::to_string(&frame)?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod chart;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod render;
pub mod synth;

// Re-export core types for convenience
pub use crate::core::{Config, Result};
