// src/config.rs

use std::path::{Path, PathBuf};

use crate::constants::{
    DROP_AMOUNT, DYNAMIC_POSITION_MARGIN_MM, MIN_STROKE_RUN_SAMPLES, PEAK_HALF_WINDOW_SAMPLES,
};

/// Runtime settings shared by every experiment pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Root of the bench-log tree (`static/`, `dynamic/`, `friction/`, ...).
    pub data_dir: PathBuf,
    /// Directory the SVG figures are written to. Created on demand.
    pub output_dir: PathBuf,
    /// Leading samples discarded from every bench log.
    pub drop_amount: usize,
    /// Minimum samples per stroke run in the friction segmenter.
    pub min_run_len: usize,
    /// Half-window (samples) of the piston peak detector.
    pub peak_half_window: usize,
    /// Laser tolerance (mm) around the dynamic-leakage comparison position.
    pub position_margin_mm: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("figures"),
            drop_amount: DROP_AMOUNT,
            min_run_len: MIN_STROKE_RUN_SAMPLES,
            peak_half_window: PEAK_HALF_WINDOW_SAMPLES,
            position_margin_mm: DYNAMIC_POSITION_MARGIN_MM,
        }
    }
}

impl AnalysisConfig {
    /// Full path of a figure; `name` is given without extension.
    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.svg"))
    }

    pub fn data_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.drop_amount, 15);
        assert_eq!(config.min_run_len, 100);
        assert_eq!(config.peak_half_window, 20);
        assert_eq!(config.figure_path("result_airchamber"), PathBuf::from("figures/result_airchamber.svg"));
    }
}

// src/config.rs
