// src/experiments/dynamic_leakage.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::data_analysis::leakage::dynamic_pressure;
use crate::data_input::test_matrix::{all_subjects, dynamic_log, RepeatSet};
use crate::error::AnalysisResult;
use crate::experiments::{load_bench_log, load_repeat_traces};
use crate::plot_functions::plot_dynamic_leakage::{plot_dynamic_leakage, plot_dynamic_repeatability};
use crate::types::SubjectTraces;

/// Chamber pressure of every subject at its comparison position.
pub fn load_dynamic_traces(config: &AnalysisConfig) -> AnalysisResult<SubjectTraces> {
    let mut traces = SubjectTraces::new();
    for subject in all_subjects() {
        let log = load_bench_log(config, &dynamic_log(subject.name))?;
        let trace = dynamic_pressure(&log, subject.comparison_position_mm, config.position_margin_mm);
        if trace.is_empty() {
            tracing::warn!(
                subject = subject.name,
                position_mm = subject.comparison_position_mm,
                "no samples at the comparison position"
            );
        }
        traces.insert(subject.name, trace);
    }
    Ok(traces)
}

pub fn run(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("Dynamic leakage");
    let traces = load_dynamic_traces(config)?;
    plot_dynamic_leakage(&traces, config)?;

    for set in RepeatSet::ALL {
        let positions = set.dynamic_positions_mm();
        let runs = load_repeat_traces(|run, index| {
            let log = load_bench_log(config, &set.dynamic_log(run))?;
            Ok(dynamic_pressure(&log, positions[index], config.position_margin_mm))
        })?;
        plot_dynamic_repeatability(set, &runs, &traces, config)?;
    }
    Ok(())
}

// src/experiments/dynamic_leakage.rs
