// src/plot_functions/plot_air_chamber.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::constants::{AIR_CHAMBER_ROLLING_WINDOW, AIR_CHAMBER_STRIDE};
use crate::data_analysis::leakage::smooth_for_plot;
use crate::data_input::test_matrix::{RepeatSet, AIR_CHAMBERS};
use crate::plot_framework::{draw_figure, repeat_run_colors, FigureConfig, LegendPosition};
use crate::plot_functions::{repeat_run_series, role_series, Role};
use crate::types::{RepeatTraces, SubjectTraces};

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Pressure drop (MPa)";
const RUN_STROKE_WIDTH: u32 = 1;

/// Generates `result_airchamber` (all models, raw) and `result_airchamber_part`
/// (the part-figure models, smoothed and thinned).
pub fn plot_air_chambers(traces: &SubjectTraces, config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    let mut all = FigureConfig::new(X_LABEL, Y_LABEL);
    let mut part = FigureConfig::new(X_LABEL, Y_LABEL);

    for model in &AIR_CHAMBERS {
        let Some(trace) = traces.get(model.name) else {
            continue;
        };
        all.lines.push(role_series(model, Role::Main, trace.points()));
        if model.in_part_figure {
            let smoothed = smooth_for_plot(trace, AIR_CHAMBER_ROLLING_WINDOW, AIR_CHAMBER_STRIDE);
            part.lines.push(role_series(model, Role::Main, smoothed.points()));
        }
    }

    draw_figure(&config.figure_path("result_airchamber"), &all)?;
    draw_figure(&config.figure_path("result_airchamber_part"), &part)
}

/// Generates `app_airchamber_{rerun,reconnected}` from one repeatability table.
///
/// `columns` holds the smoothed table columns keyed by column name.
pub fn plot_air_chamber_repeatability(
    set: RepeatSet,
    runs: &RepeatTraces,
    columns: &SubjectTraces,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn Error>> {
    let mut figure = FigureConfig::new(X_LABEL, Y_LABEL);
    figure.legend_position = LegendPosition::LowerLeft;

    for model in &AIR_CHAMBERS {
        let Some(trace) = model.repeat_column.and_then(|column| columns.get(column)) else {
            continue;
        };
        figure
            .lines
            .push(role_series(model, Role::GreyGhost, trace.points()));
    }
    figure.lines.extend(repeat_run_series(
        runs,
        repeat_run_colors(set.gradient()),
        RUN_STROKE_WIDTH,
        |t| t.clone(),
    ));

    let name = format!("app_airchamber_{}", set.dir_name());
    draw_figure(&config.figure_path(&name), &figure)
}

// src/plot_functions/plot_air_chamber.rs
