// src/data_analysis/friction.rs

use ndarray::{Array1, ArrayView1};
use std::f64::consts::PI;

use crate::data_analysis::smoothing::bar_to_pa;
use crate::data_analysis::TimeSeries;
use crate::data_input::bench_log::BenchLog;
use crate::error::{AnalysisError, AnalysisResult};

/// Cross-section area (m^2) of a cylinder bore given in mm.
pub fn bore_area_m2(diameter_mm: f64) -> f64 {
    let radius_m = diameter_mm / 1000.0 / 2.0;
    PI * radius_m.powi(2)
}

/// Friction force (N): measured rod force minus the pressure force on the piston.
pub fn friction_force(log: &BenchLog, bore_diameter_mm: f64) -> TimeSeries {
    let area = bore_area_m2(bore_diameter_mm);
    let friction = log
        .force_n
        .iter()
        .zip(&log.pressure_bar)
        .map(|(&force, &bar)| force - bar_to_pa(bar) * area)
        .collect();
    TimeSeries::new(log.time_s.clone(), friction)
}

fn mean_of(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Levels used to illustrate the friction range of a single trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionBounds {
    /// Mean of the samples strictly above the trace mean.
    pub from: f64,
    /// Mean of the samples strictly below the trace mean.
    pub to: f64,
}

impl FrictionBounds {
    pub fn range(&self) -> f64 {
        self.from - self.to
    }
}

pub fn friction_bounds(friction: &[f64]) -> AnalysisResult<FrictionBounds> {
    let mean = mean_of(friction)
        .ok_or_else(|| AnalysisError::InsufficientData("empty friction trace".to_string()))?;
    let above: Vec<f64> = friction.iter().copied().filter(|&v| v > mean).collect();
    let below: Vec<f64> = friction.iter().copied().filter(|&v| v < mean).collect();
    match (mean_of(&above), mean_of(&below)) {
        (Some(from), Some(to)) => Ok(FrictionBounds { from, to }),
        _ => Err(AnalysisError::InsufficientData(
            "friction trace is constant".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeDirection {
    /// Rod force at or above the trace mean.
    Retracting,
    /// Rod force at or below the trace mean.
    Extending,
}

/// Contiguous samples of one stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRun {
    pub direction: StrokeDirection,
    /// Index of the first sample in the input series.
    pub start: usize,
    pub values: Vec<f64>,
}

impl StrokeRun {
    pub fn mean(&self) -> f64 {
        mean_of(&self.values).unwrap_or(f64::NAN)
    }

    /// Population standard deviation of the run.
    pub fn std(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        ArrayView1::from(&self.values[..]).std(0.0)
    }
}

/// Result of splitting a friction trace into alternating strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSegmentation {
    pub series_mean: f64,
    /// `mean(retracting) - mean(extending)` per complete cycle.
    pub cycle_ranges: Vec<f64>,
    pub range_mean: f64,
    /// Population standard deviation of `cycle_ranges`.
    pub range_std_error: f64,
    /// Every run in the order found; concatenated they reproduce the input.
    pub runs: Vec<StrokeRun>,
}

impl StrokeSegmentation {
    pub fn last_run(&self, direction: StrokeDirection) -> Option<&StrokeRun> {
        self.runs.iter().rev().find(|r| r.direction == direction)
    }

    pub fn last_retracting(&self) -> Option<&StrokeRun> {
        self.last_run(StrokeDirection::Retracting)
    }

    pub fn last_extending(&self) -> Option<&StrokeRun> {
        self.last_run(StrokeDirection::Extending)
    }
}

/// Splits a friction trace into retracting/extending strokes and estimates the
/// friction range with its standard error.
///
/// Each cycle first takes a retracting run, then an extending run. A run always takes
/// at least `min_run_len` samples and then continues while samples stay on its side of
/// the mean (inclusive). Only cycles where both runs are non-empty contribute a range.
pub fn segment_and_range(force: &[f64], min_run_len: usize) -> AnalysisResult<StrokeSegmentation> {
    let series_mean = mean_of(force)
        .ok_or_else(|| AnalysisError::InsufficientData("empty friction trace".to_string()))?;
    let min_run_len = min_run_len.max(1);
    let n = force.len();

    let mut runs = Vec::new();
    let mut cycle_ranges = Vec::new();
    let mut i = 0;
    while i < n {
        let retract_start = i;
        while i < n && (i - retract_start < min_run_len || force[i] >= series_mean) {
            i += 1;
        }
        let extend_start = i;
        while i < n && (i - extend_start < min_run_len || force[i] <= series_mean) {
            i += 1;
        }

        let retracting = StrokeRun {
            direction: StrokeDirection::Retracting,
            start: retract_start,
            values: force[retract_start..extend_start].to_vec(),
        };
        let extending = StrokeRun {
            direction: StrokeDirection::Extending,
            start: extend_start,
            values: force[extend_start..i].to_vec(),
        };

        if !extending.values.is_empty() {
            cycle_ranges.push(retracting.mean() - extending.mean());
            runs.push(retracting);
            runs.push(extending);
        } else {
            runs.push(retracting);
        }
    }

    if cycle_ranges.is_empty() {
        return Err(AnalysisError::InsufficientData(format!(
            "no complete stroke cycle in {n} samples (minimum run length {min_run_len})"
        )));
    }

    let ranges = Array1::from(cycle_ranges.clone());
    let range_mean = ranges.mean().unwrap_or(f64::NAN);
    let range_std_error = ranges.std(0.0);
    tracing::debug!(
        cycles = cycle_ranges.len(),
        range_mean,
        range_std_error,
        "segmented friction trace"
    );

    Ok(StrokeSegmentation {
        series_mean,
        cycle_ranges,
        range_mean,
        range_std_error,
        runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::bench_log::BenchSample;
    use approx::assert_abs_diff_eq;

    fn square_wave(half_period: usize, cycles: usize, high: f64, low: f64) -> Vec<f64> {
        (0..cycles)
            .flat_map(|_| {
                std::iter::repeat(high)
                    .take(half_period)
                    .chain(std::iter::repeat(low).take(half_period))
            })
            .collect()
    }

    #[test]
    fn square_wave_gives_exact_range() {
        let force = square_wave(300, 3, 10.0, -10.0);
        let result = segment_and_range(&force, 100).unwrap();
        assert_eq!(result.cycle_ranges, vec![20.0, 20.0, 20.0]);
        assert_abs_diff_eq!(result.range_mean, 20.0);
        assert_abs_diff_eq!(result.range_std_error, 0.0);
        assert_eq!(result.runs.len(), 6);
        assert_eq!(result.last_extending().unwrap().start, 1500);
        assert_eq!(result.last_retracting().unwrap().values.len(), 300);
    }

    #[test]
    fn trailing_retract_is_kept_without_a_cycle() {
        let mut force = square_wave(300, 2, 5.0, -5.0);
        force.extend(std::iter::repeat(5.0).take(150));
        let result = segment_and_range(&force, 100).unwrap();
        assert_eq!(result.cycle_ranges.len(), 2);
        assert_eq!(result.runs.len(), 5);
        let total: usize = result.runs.iter().map(|r| r.values.len()).sum();
        assert_eq!(total, force.len());
        assert_eq!(result.runs.last().unwrap().direction, StrokeDirection::Retracting);
    }

    #[test]
    fn minimum_run_length_absorbs_noise() {
        // A short dip inside the retracting stroke stays in the same run.
        let mut force = vec![10.0; 50];
        force.extend(vec![-10.0; 5]);
        force.extend(vec![10.0; 245]);
        force.extend(vec![-10.0; 300]);
        let result = segment_and_range(&force, 100).unwrap();
        assert_eq!(result.runs[0].values.len(), 300);
        assert_eq!(result.runs[1].values.len(), 300);
    }

    #[test]
    fn empty_and_single_stroke_are_insufficient() {
        assert!(matches!(
            segment_and_range(&[], 100),
            Err(AnalysisError::InsufficientData(_))
        ));
        assert!(matches!(
            segment_and_range(&[1.0; 80], 100),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn run_statistics_are_population() {
        let run = StrokeRun {
            direction: StrokeDirection::Extending,
            start: 0,
            values: vec![1.0, 3.0],
        };
        assert_abs_diff_eq!(run.mean(), 2.0);
        assert_abs_diff_eq!(run.std(), 1.0);
    }

    #[test]
    fn friction_removes_pressure_force() {
        let mut log = BenchLog::default();
        log.push(BenchSample {
            time_s: 0.0,
            laser_mm: 0.0,
            pressure_bar: 1.0,
            force_n: 60.0,
        });
        let friction = friction_force(&log, 25.0);
        // 1 bar on a 25 mm bore is 49.087 N
        assert_abs_diff_eq!(friction.values[0], 60.0 - 49.087_385, epsilon = 1e-5);
    }

    #[test]
    fn bounds_split_at_mean() {
        let bounds = friction_bounds(&[4.0, 6.0, -2.0, -4.0, 1.0]).unwrap();
        // mean 1.0; 1.0 itself is in neither side
        assert_abs_diff_eq!(bounds.from, 5.0);
        assert_abs_diff_eq!(bounds.to, -3.0);
        assert_abs_diff_eq!(bounds.range(), 8.0);
        assert!(friction_bounds(&[2.0, 2.0]).is_err());
    }
}

// src/data_analysis/friction.rs
