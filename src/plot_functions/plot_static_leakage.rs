// src/plot_functions/plot_static_leakage.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::data_input::test_matrix::RepeatSet;
use crate::plot_framework::{draw_figure, repeat_run_colors, FigureConfig, LegendPosition};
use crate::plot_functions::{layout_series, repeat_run_series, subject_lookup, ComparisonLayout, Role};
use crate::types::{RepeatTraces, SubjectTraces};

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Pressure drop (MPa)";
const RUN_STROKE_WIDTH: u32 = 2;

pub const STATIC_LAYOUTS: [ComparisonLayout; 5] = [
    ComparisonLayout {
        figure: "result_static_leakage_25mm",
        entries: &[
            ("O-ring", Role::Main),
            ("NAPN", Role::Main),
            ("NAP310", Role::Main),
            ("PK", Role::Main),
            ("KDN", Role::Main),
        ],
        legend: LegendPosition::UpperRight,
    },
    ComparisonLayout {
        figure: "result_static_leakage_25mm_part",
        entries: &[
            ("O-ring257", Role::Ghost),
            ("X-ring257", Role::Ghost),
            ("O-ring", Role::Main),
            ("NAPN", Role::Main),
            ("PK", Role::Main),
            ("KDN", Role::Main),
        ],
        legend: LegendPosition::LowerLeft,
    },
    ComparisonLayout {
        figure: "result_static_leakage_257mm",
        entries: &[
            ("O-ring", Role::Ghost),
            ("NAPN", Role::Ghost),
            ("PK", Role::Ghost),
            ("KDN", Role::Ghost),
            ("O-ring257", Role::Main),
            ("X-ring257", Role::Main),
        ],
        legend: LegendPosition::LowerLeft,
    },
    ComparisonLayout {
        figure: "result_static_leakage_shapes",
        entries: &[
            ("Circle", Role::Main),
            ("Stadium", Role::Main),
            ("Kidney", Role::Main),
        ],
        legend: LegendPosition::LowerLeft,
    },
    ComparisonLayout {
        figure: "app_static_leakage_shapes_lc",
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

// Grey context behind the repeated O-ring257 runs; `figure` gets the set name appended.
const REPEAT_LAYOUT: ComparisonLayout = ComparisonLayout {
    figure: "app_static_leakage",
    entries: &[
        ("O-ring", Role::GreyGhost),
        ("NAPN", Role::GreyGhost),
        ("PK", Role::GreyGhost),
        ("KDN", Role::GreyGhost),
        ("O-ring257", Role::GreyGhost),
        ("X-ring257", Role::GreyGhost),
    ],
    legend: LegendPosition::LowerLeft,
};

/// Generates the static-leakage comparison figures (rings per bore, shapes, low clearance).
pub fn plot_static_leakage(traces: &SubjectTraces, config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    for layout in &STATIC_LAYOUTS {
        let mut figure = FigureConfig::new(X_LABEL, Y_LABEL);
        figure.legend_position = layout.legend;
        figure.lines = layout_series(layout, traces, subject_lookup, |t| t.clone());
        draw_figure(&config.figure_path(layout.figure), &figure)?;
    }
    Ok(())
}

/// Generates `app_static_leakage_{rerun,reconnected}`: the three runs over grey context.
pub fn plot_static_repeatability(
    set: RepeatSet,
    runs: &RepeatTraces,
    traces: &SubjectTraces,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>> {
    let mut figure = FigureConfig::new(X_LABEL, Y_LABEL);
    figure.legend_position = REPEAT_LAYOUT.legend;
    figure.lines = layout_series(&REPEAT_LAYOUT, traces, subject_lookup, |t| t.clone());
    figure.lines.extend(repeat_run_series(
        runs,
        repeat_run_colors(set.gradient()),
        RUN_STROKE_WIDTH,
        |t| t.clone(),
    ));

    let name = format!("{}_{}", REPEAT_LAYOUT.figure, set.dir_name());
    draw_figure(&config.figure_path(&name), &figure)
}

// src/plot_functions/plot_static_leakage.rs
