//! Chart composition: pure mappings from typed metric data to [`ChartSpec`].
//!
//! Every function here is a pure function of its arguments. No clocks, no
//! RNG, no cache reads; feed the same data twice and the specs compare
//! equal. That keeps each panel independently testable and lets the
//! dashboard isolate a failing panel without touching its siblings.

use crate::chart::spec::{
    AxisConfig, AxisData, BarMode, ChartSpec, ColorStop, Layout, LineDash, LineShape, Margin,
    Trace, TraceStyle,
};
use crate::core::error::{OpsdeckError, Result};
use crate::core::types::{
    BranchPoint, Channel, ColorScheme, CostBreakdown, DriftDistribution, LineageStage,
    SeriesBundle, TopologyCloud,
};

/// Theme palette shared by all composed charts.
pub mod palette {
    pub const VIOLET: &str = "#8B5CF6";
    pub const CYAN: &str = "#00F0FF";
    pub const PURPLE: &str = "#A855F7";
    pub const GREEN: &str = "#10B981";
    pub const NIGHT: &str = "#1a1a2e";
    pub const TEXT: &str = "#e0e0e0";
}

/// Converts `#rrggbb` to an `rgba(r, g, b, a)` string.
///
/// Falls back to the input unchanged if it is not a 7-character hex color,
/// so a malformed palette entry degrades to an opaque color rather than an
/// error deep inside a composer.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    let digits = match hex.strip_prefix('#') {
        Some(d) if d.len() == 6 => d,
        _ => return hex.to_string(),
    };
    let parse = |s: &str| u8::from_str_radix(s, 16);
    match (
        parse(&digits[0..2]),
        parse(&digits[2..4]),
        parse(&digits[4..6]),
    ) {
        (Ok(r), Ok(g), Ok(b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => hex.to_string(),
    }
}

/// Filled spline line over the accuracy channel of a performance bundle.
pub fn performance_chart(bundle: &SeriesBundle, scheme: ColorScheme) -> Result<ChartSpec> {
    let accuracy = bundle
        .channel(Channel::Accuracy)
        .ok_or_else(|| OpsdeckError::ChannelNotFound(Channel::Accuracy.to_string()))?;
    let color = scheme.hex();

    let trace = Trace::line(
        AxisData::Timestamps(bundle.timestamps().to_vec()),
        accuracy.to_vec(),
    )
    .named("Model Accuracy")
    .with_style(TraceStyle {
        color: color.to_string(),
        width: 3.0,
        shape: LineShape::Spline,
        fill_color: Some(with_alpha(color, 0.2)),
        marker_size: Some(6.0),
        marker_color: Some(palette::CYAN.to_string()),
        ..TraceStyle::default()
    });

    Ok(ChartSpec::new(
        vec![trace],
        Layout {
            y_axis: AxisConfig::titled("Accuracy (%)"),
            ..Layout::default()
        },
    ))
}

/// Two overlaid bar traces comparing baseline and current distributions.
pub fn drift_chart(dist: &DriftDistribution) -> ChartSpec {
    let baseline = Trace::bar(dist.x.clone(), dist.baseline.clone())
        .named("Baseline")
        .with_style(TraceStyle {
            color: with_alpha(palette::VIOLET, 0.5),
            ..TraceStyle::default()
        })
        .legend(true);
    let current = Trace::bar(dist.x.clone(), dist.current.clone())
        .named("Current")
        .with_style(TraceStyle {
            color: with_alpha(palette::CYAN, 0.5),
            ..TraceStyle::default()
        })
        .legend(true);

    ChartSpec::new(
        vec![baseline, current],
        Layout {
            show_legend: true,
            bar_mode: Some(BarMode::Overlay),
            x_axis: AxisConfig {
                grid: false,
                ..AxisConfig::titled("Feature Value")
            },
            y_axis: AxisConfig::titled("Frequency"),
            ..Layout::default()
        },
    )
}

/// Donut chart over the cost categories.
pub fn cost_chart(breakdown: &CostBreakdown) -> Result<ChartSpec> {
    breakdown.validate()?;

    let labels = breakdown
        .slices
        .iter()
        .map(|s| s.category.clone())
        .collect();
    let values = breakdown.slices.iter().map(|s| s.percentage).collect();
    let colors = breakdown.slices.iter().map(|s| s.color.clone()).collect();

    let mut trace = Trace::pie(labels, values, colors).legend(true);
    trace.hole = Some(0.6);
    trace.style.color = palette::NIGHT.to_string();

    Ok(ChartSpec::new(
        vec![trace],
        Layout {
            show_legend: true,
            ..Layout::default()
        },
    ))
}

/// Minimal filled trend line: no axes, no legend, 80px tall.
pub fn resource_sparkline(
    bundle: &SeriesBundle,
    channel: Channel,
    color: &str,
) -> Result<ChartSpec> {
    let values = bundle
        .channel(channel)
        .ok_or_else(|| OpsdeckError::ChannelNotFound(channel.to_string()))?;

    let trace = Trace::line(
        AxisData::Timestamps(bundle.timestamps().to_vec()),
        values.to_vec(),
    )
    .with_style(TraceStyle {
        color: color.to_string(),
        width: 2.0,
        fill_color: Some(with_alpha(color, 0.2)),
        ..TraceStyle::default()
    });

    Ok(ChartSpec::new(
        vec![trace],
        Layout {
            height: 80,
            margin: Margin::uniform(0),
            x_axis: AxisConfig::hidden(),
            y_axis: AxisConfig::hidden(),
            ..Layout::default()
        },
    ))
}

/// 3-D point cloud with chain edges.
///
/// Edges connect node i to node i+1 only; this is a simplified chain
/// topology, not an adjacency graph.
pub fn topology_3d(cloud: &TopologyCloud) -> ChartSpec {
    let n = cloud.node_count();

    let mut nodes = Trace::scatter3d(cloud.xs.clone(), cloud.ys.clone(), cloud.zs.clone());
    nodes.labels = Some((0..n).map(|i| cloud.label(i)).collect());
    nodes.style = TraceStyle {
        color: palette::VIOLET.to_string(),
        marker_size: Some(10.0),
        marker_color: Some(palette::CYAN.to_string()),
        colorscale: Some(vec![
            ColorStop {
                at: 0.0,
                color: palette::VIOLET.to_string(),
            },
            ColorStop {
                at: 0.5,
                color: palette::CYAN.to_string(),
            },
            ColorStop {
                at: 1.0,
                color: palette::PURPLE.to_string(),
            },
        ]),
        ..TraceStyle::default()
    };

    let mut traces = Vec::with_capacity(n);
    traces.push(nodes);
    for i in 0..n.saturating_sub(1) {
        let mut edge = Trace::scatter3d(
            vec![cloud.xs[i], cloud.xs[i + 1]],
            vec![cloud.ys[i], cloud.ys[i + 1]],
            vec![cloud.zs[i], cloud.zs[i + 1]],
        );
        edge.kind = crate::chart::spec::TraceKind::Line;
        edge.style = TraceStyle {
            color: with_alpha(palette::CYAN, 0.2),
            width: 2.0,
            ..TraceStyle::default()
        };
        traces.push(edge);
    }

    ChartSpec::new(
        traces,
        Layout {
            height: 500,
            margin: Margin::uniform(0),
            hide_scene_axes: true,
            x_axis: AxisConfig::hidden(),
            y_axis: AxisConfig::hidden(),
            ..Layout::default()
        },
    )
}

const STAGE_Y: f64 = 2.2;
const BRANCH_Y: f64 = 1.3;

/// Horizontal lineage chain with one dashed version branch.
///
/// Output ordering is load-bearing for renderers that paint traces in
/// sequence: plain edges first, then the dashed branch edge, then the
/// stage nodes, then the branch node last, so nodes occlude edges.
pub fn lineage_graph(stages: &[LineageStage], branch: &BranchPoint) -> Result<ChartSpec> {
    if stages.is_empty() {
        return Err(OpsdeckError::invalid_parameter(
            "stages",
            "lineage graph needs at least one stage",
        ));
    }
    if branch.stage_index >= stages.len() {
        return Err(OpsdeckError::invalid_parameter(
            "branch",
            format!(
                "branch forks from stage {} but only {} stages exist",
                branch.stage_index,
                stages.len()
            ),
        ));
    }

    let x_of = |i: usize| (i + 1) as f64;
    let mut traces = Vec::new();

    // Edges between consecutive stages.
    for i in 0..stages.len() - 1 {
        traces.push(
            Trace::line(
                AxisData::Numbers(vec![x_of(i), x_of(i + 1)]),
                vec![STAGE_Y, STAGE_Y],
            )
            .with_style(TraceStyle {
                color: with_alpha(palette::VIOLET, 0.3),
                width: 3.0,
                ..TraceStyle::default()
            }),
        );
    }

    // Dashed perpendicular branch edge.
    let branch_x = x_of(branch.stage_index);
    traces.push(
        Trace::line(
            AxisData::Numbers(vec![branch_x, branch_x]),
            vec![STAGE_Y, BRANCH_Y],
        )
        .with_style(TraceStyle {
            color: with_alpha(palette::PURPLE, 0.4),
            width: 2.0,
            dash: LineDash::Dash,
            ..TraceStyle::default()
        }),
    );

    // Stage nodes, alternating accent colors.
    for (i, stage) in stages.iter().enumerate() {
        let color = if i % 2 == 0 {
            palette::VIOLET
        } else {
            palette::CYAN
        };
        traces.push(
            Trace::marker_text(vec![x_of(i)], vec![STAGE_Y], vec![stage.label.clone()])
                .with_style(TraceStyle {
                    color: color.to_string(),
                    marker_size: Some(60.0),
                    marker_color: Some(palette::TEXT.to_string()),
                    ..TraceStyle::default()
                }),
        );
    }

    // Branch node goes last so it sits on top of everything.
    traces.push(
        Trace::marker_text(vec![branch_x], vec![BRANCH_Y], vec![branch.label.clone()])
            .named(branch.note.clone())
            .with_style(TraceStyle {
                color: palette::NIGHT.to_string(),
                marker_size: Some(40.0),
                marker_color: Some(palette::PURPLE.to_string()),
                ..TraceStyle::default()
            }),
    );

    Ok(ChartSpec::new(
        traces,
        Layout {
            height: 450,
            margin: Margin {
                l: 30,
                r: 30,
                t: 40,
                b: 40,
            },
            x_axis: AxisConfig::hidden(),
            y_axis: AxisConfig::hidden(),
            ..Layout::default()
        },
    ))
}
