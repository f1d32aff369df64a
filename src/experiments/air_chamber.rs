// src/experiments/air_chamber.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::data_analysis::leakage::{air_chamber_drop, repeatability_trace};
use crate::data_input::log_parser::{parse_air_chamber_log, parse_repeatability_table};
use crate::data_input::test_matrix::{RepeatSet, AIR_CHAMBERS};
use crate::error::AnalysisResult;
use crate::experiments::load_repeat_traces;
use crate::plot_functions::plot_air_chamber::{plot_air_chamber_repeatability, plot_air_chambers};
use crate::types::{RepeatTraces, SubjectTraces};

// Columns holding the three repeated runs, in run order.
const RUN_COLUMNS: [&str; 3] = ["Test1", "Test2", "Test3"];

pub fn load_air_chamber_traces(config: &AnalysisConfig) -> AnalysisResult<SubjectTraces> {
    let mut traces = SubjectTraces::new();
    for model in &AIR_CHAMBERS {
        let log = parse_air_chamber_log(&config.data_path(model.log()))?;
        traces.insert(model.name, air_chamber_drop(&log)?);
    }
    Ok(traces)
}

/// Smoothed columns of one repeatability table, split into runs and context models.
pub fn load_repeatability(
    config: &AnalysisConfig,
    set: RepeatSet,
) -> AnalysisResult<(RepeatTraces, SubjectTraces)> {
    let table = parse_repeatability_table(&config.data_path(set.air_chamber_table()))?;
    tracing::debug!(set = set.dir_name(), rows = table.row_count(), "read repeatability table");

    let runs = load_repeat_traces(|_, index| repeatability_trace(&table, RUN_COLUMNS[index]))?;

    let mut columns = SubjectTraces::new();
    for model in &AIR_CHAMBERS {
        if let Some(column) = model.repeat_column {
            columns.insert(column, repeatability_trace(&table, column)?);
        }
    }
    Ok((runs, columns))
}

pub fn run(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("Compressed-air chambers");
    let traces = load_air_chamber_traces(config)?;
    plot_air_chambers(&traces, config)?;

    for set in RepeatSet::ALL {
        let (runs, columns) = load_repeatability(config, set)?;
        plot_air_chamber_repeatability(set, &runs, &columns, config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AIR_CHAMBER_REPEAT_COLUMNS;

    #[test]
    fn run_and_model_columns_are_in_the_table_layout() {
        for column in RUN_COLUMNS {
            assert!(AIR_CHAMBER_REPEAT_COLUMNS.contains(&column));
        }
        for model in &AIR_CHAMBERS {
            if let Some(column) = model.repeat_column {
                assert!(AIR_CHAMBER_REPEAT_COLUMNS.contains(&column), "{column}");
            }
        }
    }
}

// src/experiments/air_chamber.rs
