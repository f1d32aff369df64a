// src/data_input/test_matrix.rs

use std::path::PathBuf;

use crate::constants::{
    BORE_257_MM, BORE_25_MM, COLOR_BLACK, COLOR_LIGHT_GREY, COLOR_TAB_BLUE, COLOR_TAB_BROWN,
    COLOR_TAB_CYAN, COLOR_TAB_GREEN, COLOR_TAB_OLIVE, COLOR_TAB_ORANGE, COLOR_TAB_PURPLE,
    COLOR_TAB_RED, DYNAMIC_RECONNECTED_POSITION_MM, DYNAMIC_RERUN_POSITION_MM,
    AIR_CHAMBER_RECONNECTED_FILE, AIR_CHAMBER_RERUN_FILE,
};
use crate::plot_framework::{LineStyle, RunGradient, SeriesStyle};

/// Whether a point of the test matrix was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability<T> {
    Present(T),
    NotCollected { reason: &'static str },
}

pub const EXTRUSION_REASON: &str = "extrusion of the O-ring";

/// Sealing-mechanism rings vs. piston cross-section shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Ring,
    Shape,
}

/// One tested piston/seal combination.
#[derive(Clone, Copy)]
pub struct Subject {
    /// File stem used in every log directory.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: SubjectKind,
    pub style: SeriesStyle,
    /// Highest friction-test pressure before the seal extruded.
    pub max_pressure_bar: u32,
    /// Laser position (mm) at which the dynamic-leakage pressure is compared.
    pub comparison_position_mm: f64,
}

const NAP_PATTERN: &[f64] = &[5.0, 2.0, 2.0];
const ALUMINIUM_PATTERN: &[f64] = &[1.0, 1.0, 1.0];
const LONG_DASH_PATTERN: &[f64] = &[10.0, 2.0, 2.0];

const fn style(color: plotters::style::RGBColor, line_style: LineStyle, stroke_width: u32) -> SeriesStyle {
    SeriesStyle {
        color,
        line_style,
        stroke_width,
    }
}

pub const RING_PRESSURES_BAR: [u32; 4] = [1, 3, 5, 7];
pub const SHAPE_PRESSURES_BAR: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];

pub static RINGS: [Subject; 7] = [
    Subject {
        name: "O-ring",
        label: "O-ring",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_BLUE, LineStyle::Dotted, 3),
        max_pressure_bar: 7,
        comparison_position_mm: 37.7,
    },
    Subject {
        name: "NAPN",
        label: "NAPN",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_ORANGE, LineStyle::DashDot, 1),
        max_pressure_bar: 7,
        comparison_position_mm: 38.0,
    },
    Subject {
        name: "NAP310",
        label: "NAP310",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_GREEN, LineStyle::Pattern(NAP_PATTERN), 1),
        max_pressure_bar: 7,
        comparison_position_mm: 37.7,
    },
    Subject {
        name: "PK",
        label: "PK",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_RED, LineStyle::Dashed, 1),
        max_pressure_bar: 7,
        comparison_position_mm: 37.8,
    },
    Subject {
        name: "KDN",
        label: "KDN",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_PURPLE, LineStyle::Solid, 1),
        max_pressure_bar: 7,
        comparison_position_mm: 37.7,
    },
    Subject {
        name: "O-ring257",
        label: "O-ring",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_BLUE, LineStyle::Dotted, 3),
        max_pressure_bar: 7,
        comparison_position_mm: 37.7,
    },
    Subject {
        name: "X-ring257",
        label: "X-ring",
        kind: SubjectKind::Ring,
        style: style(COLOR_TAB_BROWN, LineStyle::Pattern(NAP_PATTERN), 1),
        max_pressure_bar: 7,
        comparison_position_mm: 37.7,
    },
];

pub static SHAPES: [Subject; 5] = [
    Subject {
        name: "Circle",
        label: "Circle",
        kind: SubjectKind::Shape,
        style: style(COLOR_LIGHT_GREY, LineStyle::Dotted, 3),
        max_pressure_bar: 7,
        comparison_position_mm: 36.9,
    },
    Subject {
        name: "Stadium",
        label: "Stadium",
        kind: SubjectKind::Shape,
        style: style(COLOR_TAB_OLIVE, LineStyle::DashDot, 1),
        max_pressure_bar: 3,
        comparison_position_mm: 38.5,
    },
    Subject {
        name: "Kidney",
        label: "Kidney",
        kind: SubjectKind::Shape,
        style: style(COLOR_TAB_CYAN, LineStyle::Solid, 1),
        max_pressure_bar: 4,
        comparison_position_mm: 39.3,
    },
    Subject {
        name: "Stadium_lc",
        label: "Stadium 0.2 mm clearance",
        kind: SubjectKind::Shape,
        style: style(COLOR_TAB_OLIVE, LineStyle::DashDot, 2),
        max_pressure_bar: 5,
        comparison_position_mm: 38.5,
    },
    Subject {
        name: "Kidney_lc",
        label: "Kidney 0.2 mm clearance",
        kind: SubjectKind::Shape,
        style: style(COLOR_TAB_CYAN, LineStyle::Solid, 2),
        max_pressure_bar: 7,
        comparison_position_mm: 37.4,
    },
];

pub fn all_subjects() -> impl Iterator<Item = &'static Subject> {
    RINGS.iter().chain(SHAPES.iter())
}

pub fn subject(name: &str) -> Option<&'static Subject> {
    all_subjects().find(|s| s.name == name)
}

impl Subject {
    /// The 25.7 mm cylinder was used for the "257" rings; everything else ran in 25 mm.
    pub fn bore_diameter_mm(&self) -> f64 {
        if self.name.contains("257") {
            BORE_257_MM
        } else {
            BORE_25_MM
        }
    }

    pub fn planned_pressures_bar(&self) -> &'static [u32] {
        match self.kind {
            SubjectKind::Ring => &RING_PRESSURES_BAR,
            SubjectKind::Shape => &SHAPE_PRESSURES_BAR,
        }
    }

    /// Friction test at `bar`, or why it was never recorded.
    pub fn friction_test(&self, bar: u32) -> Availability<u32> {
        if bar > self.max_pressure_bar {
            Availability::NotCollected {
                reason: EXTRUSION_REASON,
            }
        } else {
            Availability::Present(bar)
        }
    }

    /// Every planned pressure with its availability, in increasing order.
    pub fn friction_tests(&self) -> Vec<Availability<u32>> {
        self.planned_pressures_bar()
            .iter()
            .map(|&bar| self.friction_test(bar))
            .collect()
    }
}

pub fn static_log(name: &str) -> PathBuf {
    PathBuf::from("static").join(format!("{name}.csv"))
}

pub fn dynamic_log(name: &str) -> PathBuf {
    PathBuf::from("dynamic").join(format!("{name}.csv"))
}

pub fn friction_log(name: &str, bar: u32) -> PathBuf {
    PathBuf::from("friction").join(format!("{name}_{bar}bar.csv"))
}

/// The only subject with repeated runs.
pub const REPEAT_SUBJECT: &str = "O-ring257";
pub const REPEAT_RUNS: [usize; 3] = [1, 2, 3];

/// The two repeatability protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatSet {
    /// Test restarted without touching the connections.
    Rerun,
    /// Model disconnected and reconnected between runs.
    Reconnected,
}

impl RepeatSet {
    pub const ALL: [RepeatSet; 2] = [RepeatSet::Rerun, RepeatSet::Reconnected];

    pub fn dir_name(self) -> &'static str {
        match self {
            RepeatSet::Rerun => "rerun",
            RepeatSet::Reconnected => "reconnected",
        }
    }

    pub fn gradient(self) -> RunGradient {
        match self {
            RepeatSet::Rerun => RunGradient::Reds,
            RepeatSet::Reconnected => RunGradient::Blues,
        }
    }

    pub fn dynamic_positions_mm(self) -> [f64; 3] {
        match self {
            RepeatSet::Rerun => DYNAMIC_RERUN_POSITION_MM,
            RepeatSet::Reconnected => DYNAMIC_RECONNECTED_POSITION_MM,
        }
    }

    pub fn air_chamber_table(self) -> PathBuf {
        let file = match self {
            RepeatSet::Rerun => AIR_CHAMBER_RERUN_FILE,
            RepeatSet::Reconnected => AIR_CHAMBER_RECONNECTED_FILE,
        };
        PathBuf::from("air_chamber").join(file)
    }

    fn base(self, test: &str) -> PathBuf {
        PathBuf::from("repeatability").join(self.dir_name()).join(test)
    }

    pub fn static_log(self, run: usize) -> PathBuf {
        self.base("static").join(format!("{run}_{REPEAT_SUBJECT}.csv"))
    }

    pub fn dynamic_log(self, run: usize) -> PathBuf {
        self.base("dynamic").join(format!("{run}_{REPEAT_SUBJECT}.csv"))
    }

    pub fn friction_log(self, run: usize, bar: u32) -> PathBuf {
        self.base("friction")
            .join(format!("{run}_{REPEAT_SUBJECT}_{bar}bar.csv"))
    }
}

/// A 3D-printed (or machined) compressed-air chamber.
#[derive(Clone, Copy)]
pub struct AirChamberModel {
    pub name: &'static str,
    pub label: &'static str,
    pub style: SeriesStyle,
    /// Shown in the smoothed "part" figure.
    pub in_part_figure: bool,
    /// Column of the repeatability tables holding this model, if any.
    pub repeat_column: Option<&'static str>,
}

impl AirChamberModel {
    pub fn log(&self) -> PathBuf {
        PathBuf::from("air_chamber").join(format!("{}.csv", self.name))
    }
}

pub static AIR_CHAMBERS: [AirChamberModel; 7] = [
    AirChamberModel {
        name: "Aluminium",
        label: "Aluminium",
        style: style(COLOR_BLACK, LineStyle::Pattern(ALUMINIUM_PATTERN), 2),
        in_part_figure: true,
        repeat_column: Some("Aluminium"),
    },
    AirChamberModel {
        name: "Prusa",
        label: "SLA Prusa",
        style: style(COLOR_TAB_ORANGE, LineStyle::DashDot, 1),
        in_part_figure: true,
        repeat_column: Some("SLA Prusa"),
    },
    AirChamberModel {
        name: "Formlabs",
        label: "SLA Formlabs",
        style: style(COLOR_TAB_GREEN, LineStyle::Dotted, 3),
        in_part_figure: true,
        repeat_column: Some("SLA Formlabs"),
    },
    AirChamberModel {
        name: "Ultimaker_006",
        label: "Ultimaker 0.06 mm",
        style: style(COLOR_TAB_RED, LineStyle::Solid, 1),
        in_part_figure: true,
        repeat_column: None,
    },
    AirChamberModel {
        name: "Ultimaker_010",
        label: "Ultimaker 0.10 mm",
        style: style(COLOR_TAB_PURPLE, LineStyle::Dashed, 1),
        in_part_figure: true,
        repeat_column: Some("Ultimaker 0.10"),
    },
    AirChamberModel {
        name: "Ultimaker_015",
        label: "Ultimaker 0.15 mm",
        style: style(COLOR_TAB_BLUE, LineStyle::Pattern(LONG_DASH_PATTERN), 1),
        in_part_figure: false,
        repeat_column: None,
    },
    AirChamberModel {
        name: "Ultimaker_020",
        label: "Ultimaker 0.20 mm",
        style: style(COLOR_TAB_BROWN, LineStyle::Pattern(NAP_PATTERN), 1),
        in_part_figure: false,
        repeat_column: None,
    },
];


// src/data_input/test_matrix.rs
