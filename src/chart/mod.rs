//! Chart composition layer: typed metric data in, declarative specs out.

pub mod compose;
pub mod spec;

pub use compose::{
    cost_chart, drift_chart, lineage_graph, palette, performance_chart, resource_sparkline,
    topology_3d, with_alpha,
};
pub use spec::{
    AxisConfig, AxisData, BarMode, ChartSpec, ColorStop, Layout, LineDash, LineShape, Margin,
    Trace, TraceKind, TraceStyle,
};
