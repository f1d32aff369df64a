// src/plot_functions/plot_dynamic_leakage.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::constants::{DYNAMIC_ROLLING_WINDOW, DYNAMIC_STRIDE};
use crate::data_analysis::leakage::smooth_for_plot;
use crate::data_analysis::TimeSeries;
use crate::data_input::test_matrix::RepeatSet;
use crate::plot_framework::{draw_figure, repeat_run_colors, FigureConfig, LegendPosition};
use crate::plot_functions::{layout_series, repeat_run_series, subject_lookup, ComparisonLayout, Role};
use crate::types::{RepeatTraces, SubjectTraces};

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Pressure (MPa)";
const RUN_STROKE_WIDTH: u32 = 2;

/// Ring traces are dense enough to be thinned as well as smoothed.
fn smooth_rings(trace: &TimeSeries) -> TimeSeries {
    smooth_for_plot(trace, DYNAMIC_ROLLING_WINDOW, DYNAMIC_STRIDE)
}

fn smooth_shapes(trace: &TimeSeries) -> TimeSeries {
    smooth_for_plot(trace, DYNAMIC_ROLLING_WINDOW, 1)
}

pub const RING_LAYOUTS: [ComparisonLayout; 2] = [
    ComparisonLayout {
        figure: "result_dynamic_leakage_25mm",
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
    ComparisonLayout {
        figure: "result_dynamic_leakage_257mm",
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
];

pub const SHAPE_LAYOUTS: [ComparisonLayout; 2] = [
    ComparisonLayout {
        figure: "result_dynamic_leakage_shapes",
        entries: &[
            ("Circle", Role::Main),
            ("Stadium", Role::Main),
            ("Kidney", Role::Main),
        ],
        legend: LegendPosition::UpperRight,
    },
    ComparisonLayout {
        figure: "app_dynamic_leakage_shapes_lc",
        entries: &[
            ("Stadium", Role::Clearance),
            ("Kidney", Role::Clearance),
            ("Circle", Role::Clearance),
            ("Stadium_lc", Role::Main),
            ("Kidney_lc", Role::Main),
        ],
        legend: LegendPosition::LowerMiddle,
    },
];

const REPEAT_LAYOUT: ComparisonLayout = ComparisonLayout {
    figure: "app_dynamic_leakage",
    entries: &[
        ("O-ring", Role::GreyGhost),
        ("NAPN", Role::GreyGhost),
        ("NAP310", Role::GreyGhost),
        ("PK", Role::GreyGhost),
        ("KDN", Role::GreyGhost),
        ("O-ring257", Role::GreyGhost),
        ("X-ring257", Role::GreyGhost),
    ],
    legend: LegendPosition::UpperRight,
};

fn draw_layout<P>(
    layout: &ComparisonLayout,
    traces: &SubjectTraces,
    prepare: P,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>>
where
    P: Fn(&TimeSeries) -> TimeSeries,
{
    let mut figure = FigureConfig::new(X_LABEL, Y_LABEL);
    figure.legend_position = layout.legend;
    figure.lines = layout_series(layout, traces, subject_lookup, prepare);
    draw_figure(&config.figure_path(layout.figure), &figure)
}

/// Generates the dynamic-leakage comparison figures for rings and shapes.
pub fn plot_dynamic_leakage(traces: &SubjectTraces, config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    for layout in &RING_LAYOUTS {
        draw_layout(layout, traces, smooth_rings, config)?;
    }
    for layout in &SHAPE_LAYOUTS {
        draw_layout(layout, traces, smooth_shapes, config)?;
    }
    Ok(())
}

/// Generates `app_dynamic_leakage_{rerun,reconnected}`.
pub fn plot_dynamic_repeatability(
    set: RepeatSet,
    runs: &RepeatTraces,
    traces: &SubjectTraces,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>> {
    let mut figure = FigureConfig::new(X_LABEL, Y_LABEL);
    figure.legend_position = REPEAT_LAYOUT.legend;
    figure.lines = layout_series(&REPEAT_LAYOUT, traces, subject_lookup, smooth_rings);
    figure.lines.extend(repeat_run_series(
        runs,
        repeat_run_colors(set.gradient()),
        RUN_STROKE_WIDTH,
        smooth_rings,
    ));

    let name = format!("{}_{}", REPEAT_LAYOUT.figure, set.dir_name());
    draw_figure(&config.figure_path(&name), &figure)
}

// src/plot_functions/plot_dynamic_leakage.rs
