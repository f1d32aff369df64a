// src/data_analysis/smoothing.rs

use ndarray::ArrayView1;

use crate::constants::{BAR_PER_MPA, PA_PER_BAR};

/// Trailing moving average. The first `window - 1` outputs are NaN, as is any
/// window containing a NaN. Output length equals input length.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return values.to_vec();
    }
    let data = ArrayView1::from(values);
    let mut smoothed = vec![f64::NAN; values.len().min(window - 1)];
    if values.len() >= window {
        smoothed.extend(
            data.windows(window)
                .into_iter()
                .map(|w| w.mean().unwrap_or(f64::NAN)),
        );
    }
    smoothed
}

/// Every `stride`-th value, starting with the first.
pub fn decimate(values: &[f64], stride: usize) -> Vec<f64> {
    values.iter().step_by(stride.max(1)).copied().collect()
}

/// The first `n` values (all of them if fewer).
pub fn head(values: &[f64], n: usize) -> Vec<f64> {
    values[..n.min(values.len())].to_vec()
}

/// Each value minus the first one.
pub fn pressure_drop(values: &[f64]) -> Vec<f64> {
    match values.first() {
        Some(&first) => values.iter().map(|v| v - first).collect(),
        None => Vec::new(),
    }
}

pub fn divide(values: &[f64], divisor: f64) -> Vec<f64> {
    values.iter().map(|v| v / divisor).collect()
}

pub fn bar_to_mpa(values: &[f64]) -> Vec<f64> {
    divide(values, BAR_PER_MPA)
}

pub fn bar_to_pa(bar: f64) -> f64 {
    bar * PA_PER_BAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rolling_mean_pads_with_nan() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_eq!(&out[1..], &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn rolling_mean_shorter_than_window() {
        let out = rolling_mean(&[1.0, 2.0], 5);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_mean_propagates_nan() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(out[1].is_nan() && out[2].is_nan());
        assert_abs_diff_eq!(out[3], 3.5);
    }

    #[test]
    fn decimate_keeps_first_of_each_stride() {
        assert_eq!(decimate(&[0.0, 1.0, 2.0, 3.0, 4.0], 2), vec![0.0, 2.0, 4.0]);
        assert_eq!(decimate(&[0.0, 1.0], 0), vec![0.0, 1.0]);
    }

    #[test]
    fn drop_is_relative_to_first_sample() {
        assert_eq!(pressure_drop(&[5.0, 4.5, 4.0]), vec![0.0, -0.5, -1.0]);
        assert!(pressure_drop(&[]).is_empty());
        assert_eq!(head(&[1.0, 2.0, 3.0], 2), vec![1.0, 2.0]);
        assert_eq!(bar_to_mpa(&[7.0]), vec![0.7]);
    }
}

// src/data_analysis/smoothing.rs
