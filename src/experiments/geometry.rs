// src/experiments/geometry.rs

use std::error::Error;

use crate::constants::{
    GROOVE_CLEARANCE_MM, GROOVE_RINGS, GROOVE_SQUEEZE_RATIO, KIDNEY_ARC_ANGLE_DEG,
    SHAPE_RING_INNER_DIAMETER_MM, SHAPE_RING_SECTION_MM,
};
use crate::data_analysis::geometry::{groove_dims, solve_shape, ShapeKind};
use crate::report::{print_groove_dimensions, print_shape_solution};

/// Ring used to size the non-circular pistons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInput {
    pub inner_diameter_mm: f64,
    pub ring_thickness_mm: f64,
    pub kidney_arc_angle_deg: f64,
}

impl Default for GeometryInput {
    fn default() -> Self {
        Self {
            inner_diameter_mm: SHAPE_RING_INNER_DIAMETER_MM,
            ring_thickness_mm: SHAPE_RING_SECTION_MM,
            kidney_arc_angle_deg: KIDNEY_ARC_ANGLE_DEG,
        }
    }
}

/// Prints the groove dimensions of the tested O-rings and sizes the stadium and
/// kidney cross-sections for `input`.
pub fn run(input: &GeometryInput) -> Result<(), Box<dyn Error>> {
    tracing::info!("Dimensioning grooves and piston cross-sections");
    for (label, inner_diameter, section) in GROOVE_RINGS {
        let dims = groove_dims(inner_diameter, section, GROOVE_CLEARANCE_MM, GROOVE_SQUEEZE_RATIO);
        print_groove_dimensions(label, &dims);
    }

    println!(
        "\nCross-sections for a {}x{} O-ring:",
        input.inner_diameter_mm, input.ring_thickness_mm
    );
    let kinds = [
        ShapeKind::Stadium,
        ShapeKind::Kidney {
            arc_angle: input.kidney_arc_angle_deg.to_radians(),
        },
    ];
    for kind in kinds {
        let solution = solve_shape(input.inner_diameter_mm, input.ring_thickness_mm, kind)?;
        print_shape_solution(&solution);
    }
    Ok(())
}

// src/experiments/geometry.rs
