// src/data_analysis/velocity.rs

use ndarray::{s, ArrayView1};

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakKind {
    /// Piston fully retracted.
    High,
    /// Piston fully extended.
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub index: usize,
    pub kind: PeakKind,
    pub time_s: f64,
    pub position_mm: f64,
}

/// Stroke speeds (mm/s) between consecutive peaks of a position trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PistonVelocities {
    pub peaks: Vec<Peak>,
    /// High -> Low pairs.
    pub extending_mm_s: Vec<f64>,
    /// Low -> High pairs.
    pub retracting_mm_s: Vec<f64>,
}

impl PistonVelocities {
    pub fn mean_extending(&self) -> Option<f64> {
        ArrayView1::from(&self.extending_mm_s[..]).mean()
    }

    pub fn mean_retracting(&self) -> Option<f64> {
        ArrayView1::from(&self.retracting_mm_s[..]).mean()
    }
}

/// Finds alternating position extrema and the signed speed between each pair.
///
/// Sample `i` is a high peak when it is >= every sample of `[i - w, i)` and of
/// `[i, i + w)`, a low peak symmetrically. Samples without both full windows are
/// skipped. After a high only a low is accepted and vice versa; the first peak may
/// be of either kind. A sample yields at most one peak.
pub fn estimate_velocities(
    time_s: &[f64],
    position_mm: &[f64],
    half_window: usize,
) -> AnalysisResult<PistonVelocities> {
    if time_s.len() != position_mm.len() {
        return Err(AnalysisError::LengthMismatch {
            left: time_s.len(),
            right: position_mm.len(),
        });
    }
    let w = half_window.max(1);
    let n = position_mm.len();
    let position = ArrayView1::from(position_mm);

    let mut peaks = Vec::new();
    let mut accept_high = true;
    let mut accept_low = true;
    if n >= 2 * w {
        for i in w..=n - w {
            let current = position[i];
            let prev = position.slice(s![i - w..i]);
            let next = position.slice(s![i..i + w]);
            let is_high = prev.iter().chain(next.iter()).all(|&p| current >= p);
            let is_low = prev.iter().chain(next.iter()).all(|&p| current <= p);

            let kind = if accept_high && is_high {
                accept_high = false;
                accept_low = true;
                PeakKind::High
            } else if accept_low && is_low {
                accept_low = false;
                accept_high = true;
                PeakKind::Low
            } else {
                continue;
            };
            peaks.push(Peak {
                index: i,
                kind,
                time_s: time_s[i],
                position_mm: current,
            });
        }
    }

    let mut velocities = PistonVelocities::default();
    for pair in peaks.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let dt = to.time_s - from.time_s;
        if dt <= 0.0 {
            tracing::debug!(index = to.index, "skipping peak pair without time step");
            continue;
        }
        let speed = (to.position_mm - from.position_mm) / dt;
        match from.kind {
            PeakKind::High => velocities.extending_mm_s.push(speed),
            PeakKind::Low => velocities.retracting_mm_s.push(speed),
        }
    }
    tracing::debug!(
        peaks = peaks.len(),
        extending = velocities.extending_mm_s.len(),
        retracting = velocities.retracting_mm_s.len(),
        "estimated piston velocities"
    );
    velocities.peaks = peaks;
    Ok(velocities)
}


// src/data_analysis/velocity.rs
