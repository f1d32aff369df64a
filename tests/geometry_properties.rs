// tests/geometry_properties.rs

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use std::f64::consts::PI;

use seal_bench_render::constants::{FINE_SCAN_STEP_MM, GROOVE_CLEARANCE_MM, GROOVE_SQUEEZE_RATIO};
use seal_bench_render::data_analysis::geometry::{
    groove_dims, reference_area, solve_shape, ScanRange, ShapeKind, ShapeSolution,
};

const RING_SECTION_MM: f64 = 3.5;

fn solution_bits(solution: &ShapeSolution) -> [u64; 4] {
    let (primary, secondary) = solution.params();
    [
        primary.to_bits(),
        secondary.to_bits(),
        solution.area().to_bits(),
        solution.fine.above.area.to_bits(),
    ]
}

proptest! {
    #[test]
    fn stadium_solution_brackets_reference_area(inner_diameter in 19.0f64..51.0) {
        let solution = solve_shape(inner_diameter, RING_SECTION_MM, ShapeKind::Stadium).unwrap();
        let target = reference_area();

        prop_assert!(solution.fine.below.area < target);
        prop_assert!(solution.fine.above.area >= target);
        prop_assert!(solution.area() <= target);
        prop_assert!(
            (solution.fine.above.primary - solution.fine.below.primary - FINE_SCAN_STEP_MM).abs() < 1e-9
        );
    }

    #[test]
    fn kidney_solution_brackets_reference_area(inner_diameter in 19.0f64..51.0) {
        let solution = solve_shape(inner_diameter, RING_SECTION_MM, ShapeKind::kidney_default()).unwrap();
        let target = reference_area();

        prop_assert!(solution.fine.below.area < target);
        prop_assert!(solution.fine.above.area >= target);
        prop_assert!(solution.area() <= target);
        prop_assert!(
            (solution.fine.above.primary - solution.fine.below.primary - FINE_SCAN_STEP_MM).abs() < 1e-9
        );
    }

    #[test]
    fn coarse_area_grows_until_crossing(inner_diameter in 19.0f64..51.0) {
        let perimeter = PI * (inner_diameter + 2.0 * RING_SECTION_MM);
        let target = reference_area();
        for kind in [ShapeKind::Stadium, ShapeKind::kidney_default()] {
            let mut previous = f64::NEG_INFINITY;
            let mut crossed = false;
            for primary in ScanRange::coarse().values() {
                let area = kind.sample(primary, perimeter).area;
                prop_assert!(area >= previous, "{} area fell at {}", kind.name(), primary);
                previous = area;
                if area >= target {
                    crossed = true;
                    break;
                }
            }
            prop_assert!(crossed, "{} never reached the target", kind.name());
        }
    }

    #[test]
    fn repeated_solves_are_bit_identical(inner_diameter in 19.0f64..51.0) {
        for kind in [ShapeKind::Stadium, ShapeKind::kidney_default()] {
            let first = solve_shape(inner_diameter, RING_SECTION_MM, kind).unwrap();
            let second = solve_shape(inner_diameter, RING_SECTION_MM, kind).unwrap();
            prop_assert_eq!(solution_bits(&first), solution_bits(&second));
        }
    }

    #[test]
    fn repeated_groove_dims_are_identical(inner_diameter in 5.0f64..100.0, section in 1.0f64..8.0) {
        let first = groove_dims(inner_diameter, section, GROOVE_CLEARANCE_MM, GROOVE_SQUEEZE_RATIO);
        let second = groove_dims(inner_diameter, section, GROOVE_CLEARANCE_MM, GROOVE_SQUEEZE_RATIO);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn stadium_solution_keeps_ring_perimeter(inner_diameter in 19.0f64..51.0) {
        let solution = solve_shape(inner_diameter, RING_SECTION_MM, ShapeKind::Stadium).unwrap();
        let (d, l) = solution.params();
        let perimeter = PI * (inner_diameter + 2.0 * RING_SECTION_MM);
        prop_assert!((PI * d + 2.0 * l - perimeter).abs() < 1e-9);
    }

    #[test]
    fn groove_is_inside_bore(inner_diameter in 5.0f64..100.0, section in 1.0f64..8.0) {
        let g = groove_dims(inner_diameter, section, GROOVE_CLEARANCE_MM, GROOVE_SQUEEZE_RATIO);
        prop_assert!(g.groove_diameter < g.piston_diameter);
        prop_assert!(g.piston_diameter < g.outer_diameter);
        prop_assert!(g.groove_width > section);
    }
}

#[test]
fn reference_area_is_25mm_bore() {
    assert_abs_diff_eq!(reference_area(), 490.873_852_123_405, epsilon = 1e-9);
}

#[test]
fn kidney_solution_for_default_ring() {
    let solution = solve_shape(22.0, RING_SECTION_MM, ShapeKind::kidney_default()).unwrap();
    let (a, r) = solution.params();
    assert!(a > 0.0 && r > 0.0, "a = {a}, r = {r}");
    assert!(solution.area() < reference_area());
    assert!(solution.fine.above.area >= reference_area());
}
