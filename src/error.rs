// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Result type for the analysis functions.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised while loading bench logs or running the analyses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// An input log is missing, unreadable or malformed.
    #[error("data unavailable at '{}': {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A dimension scan never reached the target area.
    #[error("no area crossing for {shape} within [{start}, {end}) mm (target {target_area:.3} mm^2)")]
    NoConvergence {
        shape: &'static str,
        start: f64,
        end: f64,
        target_area: f64,
    },

    /// Too few samples to derive the requested quantity.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Two series that must be sampled together differ in length.
    #[error("series length mismatch: {left} time samples vs {right} position samples")]
    LengthMismatch { left: usize, right: usize },
}

impl AnalysisError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AnalysisError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
