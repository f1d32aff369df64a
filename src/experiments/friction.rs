// src/experiments/friction.rs

use std::error::Error;

use crate::config::AnalysisConfig;
use crate::constants::{BORE_257_MM, VELOCITY_MODEL, VELOCITY_PRESSURE_BAR};
use crate::data_analysis::friction::{friction_bounds, friction_force, segment_and_range, StrokeSegmentation};
use crate::data_analysis::velocity::{estimate_velocities, PistonVelocities};
use crate::data_input::test_matrix::{
    friction_log, subject, Availability, RepeatSet, Subject, RING_PRESSURES_BAR, RINGS,
    SHAPES, REPEAT_RUNS,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::experiments::load_bench_log;
use crate::plot_functions::plot_friction::{
    plot_friction_ranges, plot_friction_repeatability, plot_range_definition,
};
use crate::report::{print_piston_velocities, SingleStrokeTable};
use crate::types::{RangePoint, RepeatRanges, SubjectRanges, SubjectTraces};

// Pressure whose friction traces illustrate the range definition.
const RANGE_DEFINITION_BAR: u32 = 1;
// Model whose friction levels are marked in that figure.
const RANGE_DEFINITION_MODEL: &str = "O-ring";

fn pressure_mpa(bar: u32) -> f64 {
    bar as f64 / 10.0
}

fn range_point(bar: u32, segmentation: &StrokeSegmentation) -> RangePoint {
    (
        pressure_mpa(bar),
        segmentation.range_mean,
        segmentation.range_std_error,
    )
}

/// Everything derived from the single-model friction logs.
#[derive(Debug)]
pub struct FrictionResults {
    pub ranges: SubjectRanges,
    pub ring_strokes: SingleStrokeTable,
    pub shape_strokes: SingleStrokeTable,
    /// Friction traces at the range-definition pressure.
    pub definition_traces: SubjectTraces,
}

/// Pressures with a recorded friction log; the others are logged and skipped.
fn collected_pressures(subject: &Subject) -> Vec<u32> {
    subject
        .planned_pressures_bar()
        .iter()
        .zip(subject.friction_tests())
        .filter_map(|(&planned, test)| match test {
            Availability::Present(bar) => Some(bar),
            Availability::NotCollected { reason } => {
                tracing::info!("No data for {} - {} bar due to {}", subject.name, planned, reason);
                None
            }
        })
        .collect()
}

fn analyse_subject(
    config: &AnalysisConfig,
    subject: &'static Subject,
    table: &mut SingleStrokeTable,
    ranges: &mut SubjectRanges,
    definition_traces: &mut SubjectTraces,
) -> AnalysisResult<()> {
    let mut points = Vec::new();
    for bar in collected_pressures(subject) {
        let log = load_bench_log(config, &friction_log(subject.name, bar))?;
        let friction = friction_force(&log, subject.bore_diameter_mm());
        let segmentation = segment_and_range(&friction.values, config.min_run_len)?;

        if let Some(run) = segmentation.last_retracting() {
            table.record(bar, subject.name, run);
        }
        if let Some(run) = segmentation.last_extending() {
            table.record(bar, subject.name, run);
        }
        points.push(range_point(bar, &segmentation));
        if bar == RANGE_DEFINITION_BAR {
            definition_traces.insert(subject.name, friction);
        }
    }
    ranges.insert(subject.name, points);
    Ok(())
}

/// Friction range and single-stroke statistics for every ring and shape.
pub fn analyse_friction(config: &AnalysisConfig) -> AnalysisResult<FrictionResults> {
    let mut ranges = SubjectRanges::new();
    let mut definition_traces = SubjectTraces::new();

    let mut ring_strokes = SingleStrokeTable::new(RINGS.iter().map(|s| s.name).collect());
    for ring in &RINGS {
        analyse_subject(config, ring, &mut ring_strokes, &mut ranges, &mut definition_traces)?;
    }
    let mut shape_strokes = SingleStrokeTable::new(SHAPES.iter().map(|s| s.name).collect());
    for shape in &SHAPES {
        analyse_subject(config, shape, &mut shape_strokes, &mut ranges, &mut definition_traces)?;
    }

    Ok(FrictionResults {
        ranges,
        ring_strokes,
        shape_strokes,
        definition_traces,
    })
}

/// Range points of the repeated O-ring257 runs of one protocol.
pub fn analyse_repeatability(config: &AnalysisConfig, set: RepeatSet) -> AnalysisResult<RepeatRanges> {
    let mut runs = RepeatRanges::default();
    for (slot, run) in runs.iter_mut().zip(REPEAT_RUNS) {
        for bar in RING_PRESSURES_BAR {
            let log = load_bench_log(config, &set.friction_log(run, bar))?;
            let friction = friction_force(&log, BORE_257_MM);
            let segmentation = segment_and_range(&friction.values, config.min_run_len)?;
            slot.push(range_point(bar, &segmentation));
        }
    }
    Ok(runs)
}

/// Piston speeds from the laser trace of one friction log.
pub fn analyse_velocity(config: &AnalysisConfig, model: &str, bar: u32) -> AnalysisResult<PistonVelocities> {
    let subject = subject(model)
        .ok_or_else(|| AnalysisError::InsufficientData(format!("unknown model '{model}'")))?;
    let log = load_bench_log(config, &friction_log(subject.name, bar))?;
    estimate_velocities(&log.time_s, &log.laser_mm, config.peak_half_window)
}

pub fn run(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("Friction force");
    let results = analyse_friction(config)?;

    println!("\nSingle stroke friction force (N), rings:");
    results.ring_strokes.print();
    println!("\nSingle stroke friction force (N), shapes:");
    results.shape_strokes.print();

    let bounds = match results.definition_traces.get(RANGE_DEFINITION_MODEL) {
        Some(trace) => Some(friction_bounds(&trace.values)?),
        None => None,
    };
    plot_range_definition(&results.definition_traces, bounds, config)?;
    plot_friction_ranges(&results.ranges, config)?;

    for set in RepeatSet::ALL {
        let runs = analyse_repeatability(config, set)?;
        plot_friction_repeatability(set, &runs, &results.ranges, config)?;
    }

    println!();
    let velocities = analyse_velocity(config, VELOCITY_MODEL, VELOCITY_PRESSURE_BAR)?;
    print_piston_velocities(VELOCITY_MODEL, VELOCITY_PRESSURE_BAR, &velocities);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extruded_pressures_are_skipped() {
        let kidney = subject("Kidney").unwrap();
        assert_eq!(collected_pressures(kidney), vec![1, 2, 3, 4]);
        let pk = subject("PK").unwrap();
        assert_eq!(collected_pressures(pk), RING_PRESSURES_BAR.to_vec());
    }

    #[test]
    fn range_point_is_in_mpa() {
        let segmentation = segment_and_range(&[10.0, 10.0, -10.0, -10.0], 2).unwrap();
        assert_eq!(range_point(5, &segmentation), (0.5, 20.0, 0.0));
    }
}

// src/experiments/friction.rs
