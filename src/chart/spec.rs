//! Renderer-agnostic chart specification.
//!
//! A `ChartSpec` is a declarative description of traces plus layout hints.
//! It deliberately assumes nothing about the rendering technology: the
//! renderer receives data arrays and style parameters and owns the pixels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a single trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Bar,
    Pie,
    Scatter3d,
    /// Markers with centered text labels (lineage nodes).
    MarkerText,
}

/// Data bound to a trace's x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisData {
    Numbers(Vec<f64>),
    Timestamps(Vec<DateTime<Utc>>),
}

/// Line interpolation shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    #[default]
    Linear,
    Spline,
}

/// Line dash pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    #[default]
    Solid,
    Dash,
}

/// One stop of a marker colorscale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub at: f64,
    pub color: String,
}

/// Style parameters for one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStyle {
    pub color: String,
    pub width: f64,
    pub shape: LineShape,
    pub dash: LineDash,
    /// Fill down to the zero line with this color, if set.
    pub fill_color: Option<String>,
    pub opacity: Option<f64>,
    pub marker_size: Option<f64>,
    pub marker_color: Option<String>,
    /// Gradient mapping marker depth to color (3-D point clouds).
    pub colorscale: Option<Vec<ColorStop>>,
}

impl Default for TraceStyle {
    fn default() -> Self {
        TraceStyle {
            color: "#e0e0e0".to_string(),
            width: 2.0,
            shape: LineShape::Linear,
            dash: LineDash::Solid,
            fill_color: None,
            opacity: None,
            marker_size: None,
            marker_color: None,
            colorscale: None,
        }
    }
}

/// One renderable trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub kind: TraceKind,
    pub name: Option<String>,
    pub x: Option<AxisData>,
    pub y: Option<Vec<f64>>,
    pub z: Option<Vec<f64>>,
    /// Category labels (pie slices) or node text (marker-text).
    pub labels: Option<Vec<String>>,
    /// Slice values for pie traces.
    pub values: Option<Vec<f64>>,
    /// Per-slice colors for pie traces.
    pub slice_colors: Option<Vec<String>>,
    /// Inner hole fraction for pie traces; nonzero makes a donut.
    pub hole: Option<f64>,
    pub style: TraceStyle,
    pub show_legend: bool,
}

impl Trace {
    /// A line trace over the given axis.
    pub fn line(x: AxisData, y: Vec<f64>) -> Self {
        Trace {
            kind: TraceKind::Line,
            name: None,
            x: Some(x),
            y: Some(y),
            z: None,
            labels: None,
            values: None,
            slice_colors: None,
            hole: None,
            style: TraceStyle::default(),
            show_legend: false,
        }
    }

    /// A bar trace over a numeric axis.
    pub fn bar(x: Vec<f64>, y: Vec<f64>) -> Self {
        Trace {
            x: Some(AxisData::Numbers(x)),
            y: Some(y),
            ..Trace::empty(TraceKind::Bar)
        }
    }

    /// A pie trace from labels, values and per-slice colors.
    pub fn pie(labels: Vec<String>, values: Vec<f64>, slice_colors: Vec<String>) -> Self {
        Trace {
            labels: Some(labels),
            values: Some(values),
            slice_colors: Some(slice_colors),
            ..Trace::empty(TraceKind::Pie)
        }
    }

    /// A 3-D scatter trace.
    pub fn scatter3d(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Trace {
            x: Some(AxisData::Numbers(x)),
            y: Some(y),
            z: Some(z),
            ..Trace::empty(TraceKind::Scatter3d)
        }
    }

    /// A marker-with-text trace at explicit positions.
    pub fn marker_text(x: Vec<f64>, y: Vec<f64>, labels: Vec<String>) -> Self {
        Trace {
            x: Some(AxisData::Numbers(x)),
            y: Some(y),
            labels: Some(labels),
            ..Trace::empty(TraceKind::MarkerText)
        }
    }

    fn empty(kind: TraceKind) -> Self {
        Trace {
            kind,
            name: None,
            x: None,
            y: None,
            z: None,
            labels: None,
            values: None,
            slice_colors: None,
            hole: None,
            style: TraceStyle::default(),
            show_legend: false,
        }
    }

    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_style(mut self, style: TraceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }
}

/// Axis display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub visible: bool,
    pub title: Option<String>,
    pub grid: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            visible: true,
            title: None,
            grid: true,
        }
    }
}

impl AxisConfig {
    /// A fully hidden axis.
    pub fn hidden() -> Self {
        AxisConfig {
            visible: false,
            title: None,
            grid: false,
        }
    }

    pub fn titled<S: Into<String>>(title: S) -> Self {
        AxisConfig {
            visible: true,
            title: Some(title.into()),
            grid: true,
        }
    }
}

/// How multiple bar traces share an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Overlay,
    Stack,
}

/// Chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub fn uniform(px: u32) -> Self {
        Margin {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

/// Layout hints for a whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub height: u32,
    pub margin: Margin,
    pub show_legend: bool,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub bar_mode: Option<BarMode>,
    /// Hide the 3-D scene axes entirely.
    pub hide_scene_axes: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            height: 400,
            margin: Margin::uniform(20),
            show_legend: false,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            bar_mode: None,
            hide_scene_axes: false,
        }
    }
}

/// Declarative chart handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn new(traces: Vec<Trace>, layout: Layout) -> Self {
        ChartSpec { traces, layout }
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }
}
