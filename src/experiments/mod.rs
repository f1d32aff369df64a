// src/experiments/mod.rs

//! One pipeline per bench test: load the logs, derive the series, draw the figures
//! and print the console summaries.

pub mod air_chamber;
pub mod dynamic_leakage;
pub mod friction;
pub mod geometry;
pub mod static_leakage;

use std::error::Error;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::data_analysis::TimeSeries;
use crate::data_input::bench_log::BenchLog;
use crate::data_input::log_parser::parse_bench_log;
use crate::data_input::test_matrix::REPEAT_RUNS;
use crate::error::AnalysisResult;
use crate::types::RepeatTraces;

/// Reads a bench log relative to the configured data directory.
pub(crate) fn load_bench_log(config: &AnalysisConfig, relative: &Path) -> AnalysisResult<BenchLog> {
    parse_bench_log(&config.data_path(relative), config.drop_amount)
}

/// Loads the three repeated runs in order; `load` receives the run number and its index.
pub(crate) fn load_repeat_traces<F>(mut load: F) -> AnalysisResult<RepeatTraces>
where
    F: FnMut(usize, usize) -> AnalysisResult<TimeSeries>,
{
    let [first, second, third] = REPEAT_RUNS;
    Ok([load(first, 0)?, load(second, 1)?, load(third, 2)?])
}

/// Runs every pipeline in turn.
pub fn run_all(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    geometry::run(&geometry::GeometryInput::default())?;
    static_leakage::run(config)?;
    dynamic_leakage::run(config)?;
    friction::run(config)?;
    air_chamber::run(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn repeat_traces_follow_run_order() {
        let runs = load_repeat_traces(|run, index| {
            Ok(TimeSeries::new(vec![index as f64], vec![run as f64]))
        })
        .unwrap();
        let loaded: Vec<(f64, f64)> = runs.iter().map(|t| (t.time_s[0], t.values[0])).collect();
        assert_eq!(loaded, vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
    }

    #[test]
    fn failing_run_stops_loading() {
        let mut attempted = Vec::new();
        let result = load_repeat_traces(|run, _| {
            attempted.push(run);
            if run == 2 {
                Err(AnalysisError::data_unavailable("2_O-ring257.csv", "missing"))
            } else {
                Ok(TimeSeries::default())
            }
        });
        assert!(matches!(result, Err(AnalysisError::DataUnavailable { .. })));
        assert_eq!(attempted, vec![1, 2]);
    }
}

// src/experiments/mod.rs
