// src/data_analysis/geometry.rs

use std::f64::consts::PI;

use crate::constants::{
    COARSE_SCAN_DECIMALS, COARSE_SCAN_END_MM, COARSE_SCAN_START_MM, COARSE_SCAN_STEP_MM,
    FINE_SCAN_DECIMALS, FINE_SCAN_HALF_SPAN_MM, FINE_SCAN_STEP_MM, GROOVE_WIDTH_MARGIN_MM,
    KIDNEY_ARC_ANGLE_DEG, REFERENCE_BORE_DIAMETER_MM,
};
use crate::error::{AnalysisError, AnalysisResult};

/// Piston groove and bore dimensions for a given O-ring (all mm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveDimensions {
    pub outer_diameter: f64,
    pub piston_diameter: f64,
    pub groove_diameter: f64,
    pub groove_width: f64,
}

/// Dimensions the piston groove for an O-ring of `inner_diameter` x `ring_thickness`.
///
/// The cylinder bore equals the O-ring outer diameter; the groove bottom is set so the
/// section is compressed by `squeeze_ratio`.
pub fn groove_dims(
    inner_diameter: f64,
    ring_thickness: f64,
    clearance: f64,
    squeeze_ratio: f64,
) -> GrooveDimensions {
    let outer_diameter = inner_diameter + 2.0 * ring_thickness;
    let squeezed_section = ring_thickness * (1.0 - squeeze_ratio);
    GrooveDimensions {
        outer_diameter,
        piston_diameter: outer_diameter - 2.0 * clearance,
        groove_diameter: outer_diameter - 2.0 * squeezed_section,
        groove_width: ring_thickness + GROOVE_WIDTH_MARGIN_MM,
    }
}

/// Non-circular piston cross-sections sized against a circular O-ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Rectangle of length `L` capped by two semicircles of diameter `D`.
    Stadium,
    /// Circular-arc band of width `a` around radius `r`, spanning `arc_angle` radians.
    Kidney { arc_angle: f64 },
}

impl ShapeKind {
    pub fn kidney_default() -> Self {
        ShapeKind::Kidney {
            arc_angle: KIDNEY_ARC_ANGLE_DEG.to_radians(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Stadium => "stadium",
            ShapeKind::Kidney { .. } => "kidney",
        }
    }

    /// Symbols of the (primary, secondary) parameters.
    pub fn parameter_names(&self) -> (&'static str, &'static str) {
        match self {
            ShapeKind::Stadium => ("D", "L"),
            ShapeKind::Kidney { .. } => ("a", "r"),
        }
    }

    /// Solves the perimeter equation, which is linear in the secondary parameter.
    pub fn secondary_for(&self, primary: f64, perimeter: f64) -> f64 {
        match *self {
            // pi*D + 2L = P
            ShapeKind::Stadium => (perimeter - PI * primary) / 2.0,
            // pi*a + gamma*(2r + a) = P
            ShapeKind::Kidney { arc_angle } => {
                (perimeter - PI * primary - arc_angle * primary) / (2.0 * arc_angle)
            }
        }
    }

    pub fn area(&self, primary: f64, secondary: f64) -> f64 {
        let end_caps = PI * (primary / 2.0).powi(2);
        match *self {
            ShapeKind::Stadium => end_caps + secondary * primary,
            ShapeKind::Kidney { arc_angle } => {
                end_caps + arc_angle * (secondary * primary + primary.powi(2) / 2.0)
            }
        }
    }

    pub fn sample(&self, primary: f64, perimeter: f64) -> ShapeSample {
        let secondary = self.secondary_for(primary, perimeter);
        ShapeSample {
            primary,
            secondary,
            area: self.area(primary, secondary),
        }
    }
}

/// One evaluated point of a dimension scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSample {
    pub primary: f64,
    pub secondary: f64,
    pub area: f64,
}

/// Half-open scan `[start, end)` with a fixed step; each value is rounded to `decimals`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub decimals: i32,
}

impl ScanRange {
    pub fn coarse() -> Self {
        ScanRange {
            start: COARSE_SCAN_START_MM,
            end: COARSE_SCAN_END_MM,
            step: COARSE_SCAN_STEP_MM,
            decimals: COARSE_SCAN_DECIMALS,
        }
    }

    /// Fine scan around a coarse estimate.
    pub fn fine_around(center: f64) -> Self {
        ScanRange {
            start: center - FINE_SCAN_HALF_SPAN_MM,
            end: center + FINE_SCAN_HALF_SPAN_MM,
            step: FINE_SCAN_STEP_MM,
            decimals: FINE_SCAN_DECIMALS,
        }
    }

    pub fn len(&self) -> usize {
        if self.step <= 0.0 || self.end <= self.start {
            return 0;
        }
        ((self.end - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let scale = 10f64.powi(self.decimals);
        (0..self.len()).map(move |k| ((self.start + k as f64 * self.step) * scale).round() / scale)
    }
}

/// Last sample below the target and the first sample at or above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub below: ShapeSample,
    pub above: ShapeSample,
}

/// Walks `range` and returns the first crossing of `target` by the sampled area.
///
/// Area must grow monotonically over the walked prefix. A target already met by the
/// first sample has no sub-target predecessor and counts as no crossing.
pub fn find_crossing<F>(
    range: &ScanRange,
    target: f64,
    shape: &'static str,
    mut sample: F,
) -> AnalysisResult<Bracket>
where
    F: FnMut(f64) -> ShapeSample,
{
    let mut previous: Option<ShapeSample> = None;
    for value in range.values() {
        let current = sample(value);
        if current.area >= target {
            return match previous {
                Some(below) => Ok(Bracket {
                    below,
                    above: current,
                }),
                None => break,
            };
        }
        if let Some(prev) = previous {
            debug_assert!(
                current.area >= prev.area,
                "area not monotonic at {}: {} < {}",
                value,
                current.area,
                prev.area
            );
        }
        previous = Some(current);
    }
    Err(AnalysisError::NoConvergence {
        shape,
        start: range.start,
        end: range.end,
        target_area: target,
    })
}

/// Result of the two-pass dimension scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSolution {
    pub kind: ShapeKind,
    pub target_area: f64,
    pub perimeter: f64,
    pub coarse: Bracket,
    pub fine: Bracket,
}

impl ShapeSolution {
    /// The reported (primary, secondary) pair: the closest point from below.
    pub fn params(&self) -> (f64, f64) {
        (self.fine.below.primary, self.fine.below.secondary)
    }

    pub fn area(&self) -> f64 {
        self.fine.below.area
    }
}

/// Area of the reference circular bore (mm^2).
pub fn reference_area() -> f64 {
    PI * (REFERENCE_BORE_DIAMETER_MM / 2.0).powi(2)
}

/// Sizes a non-circular cross-section whose perimeter matches the O-ring's outer
/// circumference and whose area is the largest scanned value below the reference bore.
pub fn solve_shape(
    inner_diameter: f64,
    ring_thickness: f64,
    kind: ShapeKind,
) -> AnalysisResult<ShapeSolution> {
    let outer_diameter = inner_diameter + 2.0 * ring_thickness;
    let perimeter = PI * outer_diameter;
    let target_area = reference_area();
    let evaluate = |primary: f64| kind.sample(primary, perimeter);

    let coarse = find_crossing(&ScanRange::coarse(), target_area, kind.name(), evaluate)?;
    tracing::debug!(
        shape = kind.name(),
        primary = coarse.below.primary,
        area = coarse.below.area,
        "coarse scan bracketed target"
    );

    let fine_range = ScanRange::fine_around(coarse.below.primary);
    let fine = find_crossing(&fine_range, target_area, kind.name(), evaluate)?;
    tracing::debug!(
        shape = kind.name(),
        primary = fine.below.primary,
        area = fine.below.area,
        "fine scan bracketed target"
    );

    Ok(ShapeSolution {
        kind,
        target_area,
        perimeter,
        coarse,
        fine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn groove_dims_for_lidl_ring() {
        let g = groove_dims(18.0, 3.5, 0.5, 0.1);
        assert_abs_diff_eq!(g.outer_diameter, 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.piston_diameter, 24.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.groove_width, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(g.groove_diameter, 18.7, epsilon = 1e-12);
    }

    #[test]
    fn coarse_scan_matches_arange_length() {
        let range = ScanRange::coarse();
        assert_eq!(range.len(), 150);
        let values: Vec<f64> = range.values().collect();
        assert_eq!(values[0], 5.0);
        assert_eq!(values[1], 5.1);
        assert_eq!(*values.last().unwrap(), 19.9);
    }

    #[test]
    fn stadium_for_22x3_5_ring() {
        let solution = solve_shape(22.0, 3.5, ShapeKind::Stadium).unwrap();
        let (d, l) = solution.params();
        // Closed form: D = OD - sqrt(OD^2 - 25^2) = 14.30306...
        assert_abs_diff_eq!(d, 14.303, epsilon = 1e-9);
        assert_abs_diff_eq!(l, (PI * 29.0 - PI * d) / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.coarse.below.primary, 14.3, epsilon = 1e-9);
        assert!(solution.area() < solution.target_area);
        assert!(solution.fine.above.area >= solution.target_area);
    }

    #[test]
    fn kidney_for_22x3_5_ring() {
        let kind = ShapeKind::kidney_default();
        let solution = solve_shape(22.0, 3.5, kind).unwrap();
        let (a, r) = solution.params();
        assert!(a > 14.0 && a < 15.0, "a = {a}");
        assert!(r > 0.0);
        // Perimeter constraint holds exactly for the reported pair.
        let gamma = KIDNEY_ARC_ANGLE_DEG.to_radians();
        assert_abs_diff_eq!(
            PI * a + gamma * (2.0 * r + a),
            solution.perimeter,
            epsilon = 1e-9
        );
    }

    #[test]
    fn small_ring_never_reaches_reference_area() {
        let err = solve_shape(10.0, 2.0, ShapeKind::Stadium).unwrap_err();
        assert!(matches!(err, AnalysisError::NoConvergence { shape: "stadium", .. }));
    }

    #[test]
    fn target_met_at_scan_start_is_no_convergence() {
        let range = ScanRange::coarse();
        let result = find_crossing(&range, 0.0, "stadium", |p| ShapeSample {
            primary: p,
            secondary: 0.0,
            area: p,
        });
        assert!(result.is_err());
    }

    #[test]
    fn equality_ends_scan_and_reports_predecessor() {
        let range = ScanRange {
            start: 0.0,
            end: 10.0,
            step: 1.0,
            decimals: 0,
        };
        let bracket = find_crossing(&range, 4.0, "test", |p| ShapeSample {
            primary: p,
            secondary: 0.0,
            area: p,
        })
        .unwrap();
        assert_eq!(bracket.below.primary, 3.0);
        assert_eq!(bracket.above.primary, 4.0);
    }

    #[test]
    fn solver_is_deterministic() {
        let first = solve_shape(22.0, 3.5, ShapeKind::Stadium).unwrap();
        let second = solve_shape(22.0, 3.5, ShapeKind::Stadium).unwrap();
        assert_eq!(first.params().0.to_bits(), second.params().0.to_bits());
        assert_eq!(first.params().1.to_bits(), second.params().1.to_bits());
    }
}
