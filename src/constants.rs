// src/constants.rs

use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1280;
pub const PLOT_HEIGHT: u32 = 800;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 15;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Stroke widths for lines
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const ERROR_BAR_CAP_PX: u32 = 4;
// Length of one dash-pattern unit per pixel of stroke width.
pub const DASH_UNIT_PX: f64 = 2.0;

// Opacity used for background ("ghost") series drawn for context.
pub const GHOST_ALPHA: f64 = 0.25;
pub const HALF_ALPHA: f64 = 0.5;

// --- Geometry ---
// Reference bore: every non-circular piston must enclose the area of this circle.
pub const REFERENCE_BORE_DIAMETER_MM: f64 = 25.0;
// Groove width = ring section + this margin.
pub const GROOVE_WIDTH_MARGIN_MM: f64 = 1.0;
pub const KIDNEY_ARC_ANGLE_DEG: f64 = 100.0;

pub const COARSE_SCAN_START_MM: f64 = 5.0;
pub const COARSE_SCAN_END_MM: f64 = 20.0;
pub const COARSE_SCAN_STEP_MM: f64 = 0.1;
pub const COARSE_SCAN_DECIMALS: i32 = 2;
pub const FINE_SCAN_HALF_SPAN_MM: f64 = 1.0;
pub const FINE_SCAN_STEP_MM: f64 = 0.001;
pub const FINE_SCAN_DECIMALS: i32 = 4;

// O-rings dimensioned in the groove report: (label, inner diameter, section).
pub const GROOVE_RINGS: [(&str, f64, f64); 2] = [
    ("O-ring Lidl, 18x3.5", 18.0, 3.5),
    ("O-ring and X-ring Eriks, 18.64x3.53", 18.64, 3.53),
];
pub const GROOVE_CLEARANCE_MM: f64 = 0.5;
pub const GROOVE_SQUEEZE_RATIO: f64 = 0.1;
pub const SHAPE_RING_INNER_DIAMETER_MM: f64 = 22.0;
pub const SHAPE_RING_SECTION_MM: f64 = 3.5;

// --- Bench logs ---
// Leading samples discarded from every bench log (start-up transients).
pub const DROP_AMOUNT: usize = 15;
pub const MS_PER_S: f64 = 1000.0;
pub const US_PER_S: f64 = 1_000_000.0;
pub const BAR_PER_MPA: f64 = 10.0;
pub const PA_PER_BAR: f64 = 1.0e5;

// Bore diameters of the two test cylinders.
pub const BORE_25_MM: f64 = 25.0;
pub const BORE_257_MM: f64 = 25.7;

// --- Static leakage ---
pub const STATIC_HEAD_SAMPLES: usize = 130_000;
pub const STATIC_ROLLING_WINDOW: usize = 100;
pub const STATIC_STRIDE: usize = 1000;

// --- Dynamic leakage ---
pub const DYNAMIC_POSITION_MARGIN_MM: f64 = 0.02;
pub const DYNAMIC_ROLLING_WINDOW: usize = 10;
pub const DYNAMIC_STRIDE: usize = 4;

// The repeated O-ring257 runs were logged with a different setup per run.
pub const DYNAMIC_RERUN_POSITION_MM: [f64; 3] = [38.5, 35.5, 35.5];
pub const DYNAMIC_RECONNECTED_POSITION_MM: [f64; 3] = [37.7, 35.5, 38.5];

// --- Friction ---
pub const MIN_STROKE_RUN_SAMPLES: usize = 100;
pub const PEAK_HALF_WINDOW_SAMPLES: usize = 20;
pub const RANGE_DEFINITION_XLIM_S: (f64, f64) = (5.0, 15.0);
// Time at which the range marker is drawn between the friction levels.
pub const RANGE_ARROW_X_S: f64 = 12.0;
pub const RANGE_LINE_WIDTH: u32 = 2;
pub const VELOCITY_MODEL: &str = "O-ring";
pub const VELOCITY_PRESSURE_BAR: u32 = 3;

// --- Air chamber ---
pub const AIR_CHAMBER_HEAD_SAMPLES: usize = 1400;
pub const AIR_CHAMBER_ROLLING_WINDOW: usize = 20;
pub const AIR_CHAMBER_STRIDE: usize = 4;
pub const AIR_CHAMBER_RERUN_FILE: &str = "Resultaten_opnieuwaanzetten.csv";
pub const AIR_CHAMBER_RECONNECTED_FILE: &str = "Resultaten_In_en_uit_elkaar_deel.csv";
pub const AIR_CHAMBER_REPEAT_COLUMNS: [&str; 9] = [
    "Time",
    "Test1",
    "Test2",
    "Test3",
    "Aluminium",
    "G",
    "SLA Prusa",
    "SLA Formlabs",
    "Ultimaker 0.10",
];
pub const AIR_CHAMBER_REPEAT_SAMPLE_PERIOD_S: f64 = 0.1;
// Repeatability tables are logged in mbar-scaled units.
pub const AIR_CHAMBER_REPEAT_SCALE: f64 = 1000.0;

// --- Plot Color Assignments ---
const fn category10(index: usize) -> RGBColor {
    let c = colorous::CATEGORY10[index];
    RGBColor(c.r, c.g, c.b)
}

pub const COLOR_TAB_BLUE: RGBColor = category10(0);
pub const COLOR_TAB_ORANGE: RGBColor = category10(1);
pub const COLOR_TAB_GREEN: RGBColor = category10(2);
pub const COLOR_TAB_RED: RGBColor = category10(3);
pub const COLOR_TAB_PURPLE: RGBColor = category10(4);
pub const COLOR_TAB_BROWN: RGBColor = category10(5);
pub const COLOR_TAB_GREY: RGBColor = category10(7);
pub const COLOR_TAB_OLIVE: RGBColor = category10(8);
pub const COLOR_TAB_CYAN: RGBColor = category10(9);
pub const COLOR_LIGHT_GREY: RGBColor = RGBColor(204, 204, 204);
pub const COLOR_BLACK: RGBColor = RGBColor(0, 0, 0);

// Positions on the sequential gradients used for the three repeated runs.
pub const REPEAT_RUN_GRADIENT_POSITIONS: [f64; 3] = [0.55, 0.75, 0.95];

// src/constants.rs
