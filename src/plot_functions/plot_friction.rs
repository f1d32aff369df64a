// src/plot_functions/plot_friction.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::constants::{
    COLOR_BLACK, GHOST_ALPHA, RANGE_ARROW_X_S, RANGE_DEFINITION_XLIM_S, RANGE_LINE_WIDTH,
};
use crate::data_analysis::friction::FrictionBounds;
use crate::data_input::test_matrix::{RepeatSet, Subject};
use crate::plot_framework::{
    draw_figure, repeat_run_colors, ErrorBarSeries, FigureConfig, LegendPosition, LineStyle,
    PlotSeries, ReferenceLine, SeriesStyle,
};
use crate::plot_functions::{
    repeat_series, role_series, split_range_points, subject_lookup, ComparisonLayout, Role,
};
use crate::types::{RangePoint, RepeatRanges, SubjectRanges, SubjectTraces};

const RANGE_Y_LABEL: &str = "Dynamic friction force range (N)";
const PRESSURE_X_LABEL: &str = "Pressure (MPa)";
// Dotted error-bar lines are drawn thinner than the matching time traces.
const DOTTED_ERROR_BAR_WIDTH: u32 = 2;
const RUN_STROKE_WIDTH: u32 = 1;

/// Friction traces at 1 bar, in drawing order; the first is the highlighted one.
const RANGE_DEFINITION_SUBJECTS: [&str; 5] = ["O-ring", "NAPN", "NAP310", "PK", "KDN"];

fn trace_style(subject: &Subject) -> SeriesStyle {
    SeriesStyle {
        color: subject.style.color,
        line_style: LineStyle::Solid,
        stroke_width: 1,
    }
}

/// Generates `frictionforce_1bar` and `method_frictionforce_1bar_zoom`.
///
/// The zoomed figure highlights the first subject, fades the rest and marks its
/// `from`/`to` levels with dashed reference lines and a vertical range marker.
pub fn plot_range_definition(
    traces: &SubjectTraces,
    bounds: Option<FrictionBounds>,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>> {
    let mut overview = FigureConfig::new("Time (s)", "Force (N)");
    overview.legend_position = LegendPosition::LowerMiddle;
    let mut zoom = overview.clone();
    zoom.x_limits = Some(RANGE_DEFINITION_XLIM_S);

    for (i, name) in RANGE_DEFINITION_SUBJECTS.iter().enumerate() {
        let (Some(subject), Some(trace)) = (subject_lookup(name), traces.get(name)) else {
            continue;
        };
        let series = PlotSeries::styled(trace.points(), subject.label, trace_style(subject));
        overview.lines.push(series.clone());
        zoom.lines
            .push(if i == 0 { series } else { series.with_alpha(GHOST_ALPHA) });
    }

    if let Some(bounds) = bounds {
        let level_style = SeriesStyle {
            color: COLOR_BLACK,
            line_style: LineStyle::Dashed,
            stroke_width: RANGE_LINE_WIDTH,
        };
        zoom.reference_lines.push(ReferenceLine { y: bounds.from, style: level_style });
        zoom.reference_lines.push(ReferenceLine { y: bounds.to, style: level_style });
        zoom.lines.push(PlotSeries::styled(
            vec![(RANGE_ARROW_X_S, bounds.to), (RANGE_ARROW_X_S, bounds.from)],
            "",
            SeriesStyle {
                line_style: LineStyle::Solid,
                ..level_style
            },
        ));
    }

    draw_figure(&config.figure_path("frictionforce_1bar"), &overview)?;
    draw_figure(&config.figure_path("method_frictionforce_1bar_zoom"), &zoom)
}

/// Error-bar layout: like [`ComparisonLayout`], plus per-subject point limits.
struct RangeLayout {
    layout: ComparisonLayout,
    /// Subjects shown only up to the first `n` pressures.
    truncate: &'static [(&'static str, usize)],
}

const RANGE_LAYOUTS: [RangeLayout; 4] = [
    RangeLayout {
        layout: ComparisonLayout {
            figure: "result_frictionforcerange_25mm",
            entries: &[
                ("O-ring257", Role::Ghost),
                ("X-ring257", Role::Ghost),
                ("O-ring", Role::Main),
                ("NAPN", Role::Main),
                ("NAP310", Role::Main),
                ("PK", Role::Main),
                ("KDN", Role::Main),
            ],
            legend: LegendPosition::UpperRight,
        },
        truncate: &[],
    },
    RangeLayout {
        layout: ComparisonLayout {
            figure: "result_frictionforcerange_257mm",
            entries: &[
                ("O-ring", Role::Ghost),
                ("NAPN", Role::Ghost),
                ("NAP310", Role::Ghost),
                ("PK", Role::Ghost),
                ("KDN", Role::Ghost),
                ("O-ring257", Role::Main),
                ("X-ring257", Role::Main),
            ],
            legend: LegendPosition::UpperRight,
        },
        truncate: &[],
    },
    RangeLayout {
        layout: ComparisonLayout {
            figure: "result_frictionforcerange_shape",
            entries: &[
                ("Circle", Role::Main),
                ("Stadium", Role::Main),
                ("Kidney", Role::Main),
            ],
            legend: LegendPosition::LowerMiddle,
        },
        // Same pressure span as the kidney.
        truncate: &[("Circle", 4)],
    },
    RangeLayout {
        layout: ComparisonLayout {
            figure: "app_frictionforcerange_shapes_lc",
            entries: &[
                ("Stadium", Role::Clearance),
                ("Kidney", Role::Clearance),
                ("Circle", Role::Clearance),
                ("Stadium_lc", Role::Main),
                ("Kidney_lc", Role::Main),
            ],
            legend: LegendPosition::LowerMiddle,
        },
        truncate: &[],
    },
];

const REPEAT_LAYOUT: ComparisonLayout = ComparisonLayout {
    figure: "app_frictionforcerange",
    entries: &[
        ("O-ring257", Role::GreyGhost),
        ("X-ring257", Role::GreyGhost),
        ("O-ring", Role::GreyGhost),
        ("NAPN", Role::GreyGhost),
        ("NAP310", Role::GreyGhost),
        ("PK", Role::GreyGhost),
        ("KDN", Role::GreyGhost),
    ],
    legend: LegendPosition::UpperRight,
};

fn range_series(subject: &Subject, role: Role, points: &[RangePoint]) -> ErrorBarSeries {
    let (data, errors) = split_range_points(points);
    let mut line = role_series(subject, role, data);
    if line.line_style == LineStyle::Dotted {
        line = line.with_stroke_width(DOTTED_ERROR_BAR_WIDTH);
    }
    ErrorBarSeries { line, errors }
}

fn layout_error_bars(
    layout: &ComparisonLayout,
    truncate: &[(&str, usize)],
    ranges: &SubjectRanges,
) -> Vec<ErrorBarSeries> {
    layout
        .entries
        .iter()
        .filter_map(|&(name, role)| {
            let subject = subject_lookup(name)?;
            let points = ranges.get(name)?;
            let limit = truncate
                .iter()
                .find(|(n, _)| *n == name)
                .map_or(points.len(), |&(_, limit)| limit.min(points.len()));
            Some(range_series(subject, role, &points[..limit]))
        })
        .filter(|series| !series.line.data.is_empty())
        .collect()
}

/// Generates the friction-range error-bar figures for rings and shapes.
pub fn plot_friction_ranges(ranges: &SubjectRanges, config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    for range_layout in &RANGE_LAYOUTS {
        let layout = &range_layout.layout;
        let mut figure = FigureConfig::new(PRESSURE_X_LABEL, RANGE_Y_LABEL);
        figure.legend_position = layout.legend;
        figure.error_bars = layout_error_bars(layout, range_layout.truncate, ranges);
        draw_figure(&config.figure_path(layout.figure), &figure)?;
    }
    Ok(())
}

/// Generates `app_frictionforcerange_{rerun,reconnected}`.
pub fn plot_friction_repeatability(
    set: RepeatSet,
    runs: &RepeatRanges,
    ranges: &SubjectRanges,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>> {
    let mut figure = FigureConfig::new(PRESSURE_X_LABEL, RANGE_Y_LABEL);
    figure.legend_position = REPEAT_LAYOUT.legend;
    figure.error_bars = layout_error_bars(&REPEAT_LAYOUT, &[], ranges);

    let colors = repeat_run_colors(set.gradient());
    for (i, (points, color)) in runs.iter().zip(colors).enumerate() {
        if points.is_empty() {
            continue;
        }
        let (data, errors) = split_range_points(points);
        figure.error_bars.push(ErrorBarSeries {
            line: repeat_series(i, data, color, RUN_STROKE_WIDTH),
            errors,
        });
    }

    let name = format!("{}_{}", REPEAT_LAYOUT.figure, set.dir_name());
    draw_figure(&config.figure_path(&name), &figure)
}


// src/plot_functions/plot_friction.rs
