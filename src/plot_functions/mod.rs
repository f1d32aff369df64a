// src/plot_functions/mod.rs

pub mod plot_air_chamber;
pub mod plot_dynamic_leakage;
pub mod plot_friction;
pub mod plot_static_leakage;

use plotters::style::RGBColor;

use crate::constants::{COLOR_TAB_GREY, HALF_ALPHA};
use crate::data_analysis::TimeSeries;
use crate::data_input::test_matrix::{self, AirChamberModel, Subject};
use crate::plot_framework::{LegendPosition, PlotSeries, SeriesStyle};
use crate::types::{RangePoint, RepeatTraces, SubjectTraces};

/// Something drawn with its own legend label and line style.
pub trait Styled {
    fn label(&self) -> &str;
    fn style(&self) -> SeriesStyle;
}

impl Styled for Subject {
    fn label(&self) -> &str {
        self.label
    }

    fn style(&self) -> SeriesStyle {
        self.style
    }
}

impl Styled for AirChamberModel {
    fn label(&self) -> &str {
        self.label
    }

    fn style(&self) -> SeriesStyle {
        self.style
    }
}

/// How a trace appears in a comparison figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full colour with a legend entry.
    Main,
    /// Own colour at ghost opacity, no legend entry.
    Ghost,
    /// Grey at ghost opacity, keeping the line pattern.
    GreyGhost,
    /// Half opacity, labelled as the 0.5 mm clearance variant.
    Clearance,
}

pub fn role_series(item: &impl Styled, role: Role, data: Vec<(f64, f64)>) -> PlotSeries {
    match role {
        Role::Main => PlotSeries::styled(data, item.label(), item.style()),
        Role::Ghost => PlotSeries::ghost(data, item.style()),
        Role::GreyGhost => PlotSeries::ghost(data, item.style()).with_color(COLOR_TAB_GREY),
        Role::Clearance => PlotSeries::styled(
            data,
            format!("{} 0.5 mm clearance", item.label()),
            item.style(),
        )
        .with_alpha(HALF_ALPHA),
    }
}

/// Which traces a comparison figure shows, in drawing order.
pub struct ComparisonLayout {
    pub figure: &'static str,
    pub entries: &'static [(&'static str, Role)],
    pub legend: LegendPosition,
}

/// Line series for every layout entry whose trace was loaded.
///
/// `prepare` turns the stored trace into the plotted one (smoothing, thinning).
pub fn layout_series<S, L, P>(
    layout: &ComparisonLayout,
    traces: &SubjectTraces,
    lookup: L,
    prepare: P,
) -> Vec<PlotSeries>
where
    S: Styled + 'static,
    L: Fn(&str) -> Option<&'static S>,
    P: Fn(&TimeSeries) -> TimeSeries,
{
    layout
        .entries
        .iter()
        .filter_map(|&(name, role)| {
            let item = lookup(name)?;
            let trace = traces.get(name)?;
            Some(role_series(item, role, prepare(trace).points()))
        })
        .collect()
}

pub fn subject_lookup(name: &str) -> Option<&'static Subject> {
    test_matrix::subject(name)
}

/// Solid "Test n" series of the repeated runs in gradient colours.
pub fn repeat_run_series<P>(
    runs: &RepeatTraces,
    colors: [RGBColor; 3],
    stroke_width: u32,
    prepare: P,
) -> Vec<PlotSeries>
where
    P: Fn(&TimeSeries) -> TimeSeries,
{
    runs.iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (run, color))| repeat_series(i, prepare(run).points(), color, stroke_width))
        .collect()
}

pub fn repeat_series(
    run_index: usize,
    data: Vec<(f64, f64)>,
    color: RGBColor,
    stroke_width: u32,
) -> PlotSeries {
    let style = SeriesStyle {
        color,
        line_style: crate::plot_framework::LineStyle::Solid,
        stroke_width,
    };
    PlotSeries::styled(data, format!("Test {}", run_index + 1), style)
}

/// Splits range points into the `(x, mean)` line and the error magnitudes.
pub fn split_range_points(points: &[RangePoint]) -> (Vec<(f64, f64)>, Vec<f64>) {
    points
        .iter()
        .map(|&(pressure, mean, error)| ((pressure, mean), error))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GHOST_ALPHA;

    #[test]
    fn roles_set_label_and_opacity() {
        let stadium = subject_lookup("Stadium").unwrap();
        let data = vec![(0.0, 1.0)];

        let main = role_series(stadium, Role::Main, data.clone());
        assert_eq!(main.label, "Stadium");
        assert_eq!(main.alpha, 1.0);

        let ghost = role_series(stadium, Role::Ghost, data.clone());
        assert!(ghost.label.is_empty());
        assert_eq!(ghost.alpha, GHOST_ALPHA);

        let grey = role_series(stadium, Role::GreyGhost, data.clone());
        assert_eq!(grey.color, COLOR_TAB_GREY);
        assert_eq!(grey.line_style, stadium.style.line_style);

        let faded = role_series(stadium, Role::Clearance, data);
        assert_eq!(faded.label, "Stadium 0.5 mm clearance");
        assert_eq!(faded.alpha, HALF_ALPHA);
    }

    #[test]
    fn layout_skips_missing_traces() {
        const LAYOUT: ComparisonLayout = ComparisonLayout {
            figure: "test",
            entries: &[("O-ring", Role::Main), ("PK", Role::Ghost), ("Nope", Role::Main)],
            legend: LegendPosition::UpperRight,
        };
        let mut traces = SubjectTraces::new();
        traces.insert("O-ring", TimeSeries::new(vec![0.0, 1.0], vec![0.0, -0.1]));
        traces.insert("Nope", TimeSeries::new(vec![0.0], vec![0.0]));
        let series = layout_series(&LAYOUT, &traces, subject_lookup, |t| t.clone());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "O-ring");
    }

    #[test]
    fn every_repeat_run_gets_a_labelled_series() {
        let runs: RepeatTraces = [
            TimeSeries::new(vec![0.0], vec![1.0]),
            TimeSeries::default(),
            TimeSeries::new(vec![0.0, 1.0], vec![3.0, 2.0]),
        ];
        let colors = [COLOR_TAB_GREY; 3];
        let series = repeat_run_series(&runs, colors, 2, |t| t.clone());
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Test 1", "Test 2", "Test 3"]);
        assert_eq!(series[2].data, vec![(0.0, 3.0), (1.0, 2.0)]);
        assert!(series.iter().all(|s| s.stroke_width == 2));
    }

    #[test]
    fn range_points_split_into_line_and_errors() {
        let (line, errors) = split_range_points(&[(0.1, 20.0, 1.5), (0.3, 25.0, 2.0)]);
        assert_eq!(line, vec![(0.1, 20.0), (0.3, 25.0)]);
        assert_eq!(errors, vec![1.5, 2.0]);
    }
}

// src/plot_functions/mod.rs
