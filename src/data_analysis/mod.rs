// src/data_analysis/mod.rs

pub mod friction;
pub mod geometry;
pub mod leakage;
pub mod smoothing;
pub mod velocity;

/// Paired time/value samples ready for plotting. Values may be NaN where a rolling
/// window is not yet full.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimeSeries {
    pub time_s: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(time_s: Vec<f64>, values: Vec<f64>) -> Self {
        Self { time_s, values }
    }

    pub fn len(&self) -> usize {
        self.time_s.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.time_s
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }
}

// src/data_analysis/mod.rs
