// src/data_analysis/leakage.rs

use crate::constants::{
    AIR_CHAMBER_HEAD_SAMPLES, AIR_CHAMBER_REPEAT_SAMPLE_PERIOD_S, AIR_CHAMBER_REPEAT_SCALE,
    AIR_CHAMBER_ROLLING_WINDOW, STATIC_HEAD_SAMPLES, STATIC_ROLLING_WINDOW, STATIC_STRIDE,
};
use crate::data_analysis::smoothing::{
    bar_to_mpa, decimate, divide, head, pressure_drop, rolling_mean,
};
use crate::data_analysis::TimeSeries;
use crate::data_input::bench_log::{AirChamberLog, BenchLog, RepeatabilityTable};
use crate::error::{AnalysisError, AnalysisResult};

/// Pressure drop (MPa) of a closed chamber held at constant piston position.
///
/// The drop is taken against the first retained sample, then both time and drop are
/// truncated to the first `STATIC_HEAD_SAMPLES`, smoothed with a trailing window of
/// `STATIC_ROLLING_WINDOW` and thinned to every `STATIC_STRIDE`-th value. The leading
/// drop is forced to zero; the leading time stays NaN and is skipped when plotting.
pub fn static_pressure_drop(log: &BenchLog) -> AnalysisResult<TimeSeries> {
    if log.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "static leakage log has no samples".to_string(),
        ));
    }
    let drop_bar = pressure_drop(&log.pressure_bar);

    let smooth = |values: &[f64]| {
        decimate(
            &rolling_mean(&head(values, STATIC_HEAD_SAMPLES), STATIC_ROLLING_WINDOW),
            STATIC_STRIDE,
        )
    };
    let time_s = smooth(&log.time_s);
    let mut drop_mpa = bar_to_mpa(&smooth(&drop_bar));
    if let Some(first) = drop_mpa.first_mut() {
        *first = 0.0;
    }
    Ok(TimeSeries::new(time_s, drop_mpa))
}

/// Chamber pressure (MPa) at the samples where the piston passes `position_mm`.
///
/// A sample is kept when its laser reading lies strictly inside `position_mm ± margin_mm`.
pub fn dynamic_pressure(log: &BenchLog, position_mm: f64, margin_mm: f64) -> TimeSeries {
    let at_position =
        log.filter(|s| s.laser_mm > position_mm - margin_mm && s.laser_mm < position_mm + margin_mm);
    TimeSeries::new(at_position.time_s, bar_to_mpa(&at_position.pressure_bar))
}

/// Smooths values with a trailing window and thins both axes by `stride`.
/// Time is thinned only, so each point sits at the end of its window.
pub fn smooth_for_plot(series: &TimeSeries, window: usize, stride: usize) -> TimeSeries {
    TimeSeries::new(
        decimate(&series.time_s, stride),
        decimate(&rolling_mean(&series.values, window), stride),
    )
}

/// Pressure drop (MPa) of a compressed-air chamber over its first `AIR_CHAMBER_HEAD_SAMPLES`.
pub fn air_chamber_drop(log: &AirChamberLog) -> AnalysisResult<TimeSeries> {
    if log.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "air-chamber log has no samples".to_string(),
        ));
    }
    let time_s = head(&log.time_s, AIR_CHAMBER_HEAD_SAMPLES);
    let pressure_mpa = bar_to_mpa(&head(&log.pressure_bar, AIR_CHAMBER_HEAD_SAMPLES));
    Ok(TimeSeries::new(time_s, pressure_drop(&pressure_mpa)))
}

/// One smoothed column of an air-chamber repeatability table on a fixed-rate time axis.
pub fn repeatability_trace(table: &RepeatabilityTable, column: &str) -> AnalysisResult<TimeSeries> {
    let values = table.column(column).ok_or_else(|| {
        AnalysisError::InsufficientData(format!("repeatability table has no '{column}' column"))
    })?;
    let time_s = (0..values.len())
        .map(|i| i as f64 * AIR_CHAMBER_REPEAT_SAMPLE_PERIOD_S)
        .collect();
    let smoothed = divide(
        &rolling_mean(values, AIR_CHAMBER_ROLLING_WINDOW),
        AIR_CHAMBER_REPEAT_SCALE,
    );
    Ok(TimeSeries::new(time_s, smoothed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::bench_log::BenchSample;
    use approx::assert_abs_diff_eq;

    fn linear_log(n: usize) -> BenchLog {
        let mut log = BenchLog::default();
        for i in 0..n {
            log.push(BenchSample {
                time_s: i as f64 / 1000.0,
                laser_mm: 37.7,
                pressure_bar: 5.0 - i as f64 * 1e-4,
                force_n: 0.0,
            });
        }
        log
    }

    #[test]
    fn static_drop_is_thinned_and_starts_at_zero() {
        let series = static_pressure_drop(&linear_log(3500)).unwrap();
        // indices 0, 1000, 2000, 3000
        assert_eq!(series.len(), 4);
        assert!(series.time_s[0].is_nan());
        assert_eq!(series.values[0], 0.0);
        // window 100 ending at 1000: mean index 950.5 -> time 0.9505 s
        assert_abs_diff_eq!(series.time_s[1], 0.9505, epsilon = 1e-9);
        assert_abs_diff_eq!(series.values[1], -950.5e-4 / 10.0, epsilon = 1e-9);
    }

    #[test]
    fn static_drop_rejects_empty_log() {
        assert!(matches!(
            static_pressure_drop(&BenchLog::default()),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn dynamic_filter_keeps_band_around_position() {
        let mut log = BenchLog::default();
        for (i, laser) in [37.67, 37.69, 37.7, 37.71, 37.73].iter().enumerate() {
            log.push(BenchSample {
                time_s: i as f64,
                laser_mm: *laser,
                pressure_bar: 3.0,
                force_n: 0.0,
            });
        }
        let series = dynamic_pressure(&log, 37.7, 0.02);
        assert_eq!(series.time_s, vec![1.0, 2.0, 3.0]);
        assert!(series.values.iter().all(|&p| (p - 0.3).abs() < 1e-12));
    }

    #[test]
    fn air_chamber_drop_is_truncated() {
        let log = AirChamberLog {
            time_s: (0..2000).map(|i| i as f64 * 0.01).collect(),
            pressure_bar: (0..2000).map(|i| 4.0 - i as f64 * 1e-3).collect(),
        };
        let series = air_chamber_drop(&log).unwrap();
        assert_eq!(series.len(), 1400);
        assert_eq!(series.values[0], 0.0);
        assert_abs_diff_eq!(series.values[1399], -0.1399, epsilon = 1e-9);
    }
}

// src/data_analysis/leakage.rs
