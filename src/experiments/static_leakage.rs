// src/experiments/static_leakage.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::data_analysis::leakage::static_pressure_drop;
use crate::data_input::test_matrix::{all_subjects, static_log, RepeatSet};
use crate::error::AnalysisResult;
use crate::experiments::{load_bench_log, load_repeat_traces};
use crate::plot_functions::plot_static_leakage::{plot_static_leakage, plot_static_repeatability};
use crate::types::SubjectTraces;

/// Pressure-drop traces of every ring and shape.
pub fn load_static_traces(config: &AnalysisConfig) -> AnalysisResult<SubjectTraces> {
    let mut traces = SubjectTraces::new();
    for subject in all_subjects() {
        let log = load_bench_log(config, &static_log(subject.name))?;
        traces.insert(subject.name, static_pressure_drop(&log)?);
    }
    Ok(traces)
}

pub fn run(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("Static leakage");
    let traces = load_static_traces(config)?;
    plot_static_leakage(&traces, config)?;

    for set in RepeatSet::ALL {
        let runs = load_repeat_traces(|run, _| {
            let log = load_bench_log(config, &set.static_log(run))?;
            static_pressure_drop(&log)
        })?;
        plot_static_repeatability(set, &runs, &traces, config)?;
    }
    Ok(())
}

// src/experiments/static_leakage.rs
