// src/plot_framework.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;
use plotters::backend::SVGBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{ErrorBar, PathElement, Text};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor, ShapeStyle};

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    DASH_UNIT_PX, ERROR_BAR_CAP_PX, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_LEGEND, FONT_SIZE_MESSAGE, GHOST_ALPHA, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH,
    REPEAT_RUN_GRADIENT_POSITIONS,
};

type FigureChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Draw a "Data Unavailable" message centred on a figure.
pub fn draw_unavailable_message(
    area: &DrawingArea<SVGBackend, Shift>,
    figure_name: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{figure_name} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

const DASHED_PATTERN: &[f64] = &[3.7, 1.6];
const DOTTED_PATTERN: &[f64] = &[1.0, 1.65];
const DASH_DOT_PATTERN: &[f64] = &[6.4, 1.6, 1.0, 1.6];

/// Stroke pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Alternating on/off lengths in stroke-width units. Odd-length patterns repeat
    /// with on and off swapped, so `[5, 2, 2]` reads dash 5, gap 2, dash 2, gap 5, ...
    Pattern(&'static [f64]),
}

impl LineStyle {
    /// On/off lengths in stroke-width units; `None` for a solid line.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(DASHED_PATTERN),
            LineStyle::Dotted => Some(DOTTED_PATTERN),
            LineStyle::DashDot => Some(DASH_DOT_PATTERN),
            LineStyle::Pattern(pattern) => Some(*pattern),
        }
    }
}

/// Colour, pattern and width of a plotted subject.
#[derive(Clone, Copy)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub line_style: LineStyle,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub line_style: LineStyle,
    pub alpha: f64,
}

impl PlotSeries {
    pub fn styled(data: Vec<(f64, f64)>, label: impl Into<String>, style: SeriesStyle) -> Self {
        Self {
            data,
            label: label.into(),
            color: style.color,
            stroke_width: style.stroke_width,
            line_style: style.line_style,
            alpha: 1.0,
        }
    }

    /// Faint context series without a legend entry.
    pub fn ghost(data: Vec<(f64, f64)>, style: SeriesStyle) -> Self {
        Self::styled(data, "", style).with_alpha(GHOST_ALPHA)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    fn shape_style(&self) -> ShapeStyle {
        self.color.mix(self.alpha).stroke_width(self.stroke_width)
    }
}

/// Line through `(x, mean)` points with a symmetric vertical bar of `errors[i]` at each.
#[derive(Clone)]
pub struct ErrorBarSeries {
    pub line: PlotSeries,
    pub errors: Vec<f64>,
}

/// Full-width horizontal line at `y`, never shown in the legend.
#[derive(Clone, Copy)]
pub struct ReferenceLine {
    pub y: f64,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperRight,
    LowerLeft,
    LowerMiddle,
}

impl LegendPosition {
    fn series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerMiddle => SeriesLabelPosition::LowerMiddle,
        }
    }
}

/// One figure: line series, error-bar series and reference lines on shared axes.
#[derive(Clone)]
pub struct FigureConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Fixed x-axis limits; data outside is not drawn and does not affect the y range.
    pub x_limits: Option<(f64, f64)>,
    pub lines: Vec<PlotSeries>,
    pub error_bars: Vec<ErrorBarSeries>,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend_position: LegendPosition,
}

impl FigureConfig {
    pub fn new(x_label: &str, y_label: &str) -> Self {
        Self {
            title: String::new(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_limits: None,
            lines: Vec::new(),
            error_bars: Vec::new(),
            reference_lines: Vec::new(),
            legend_position: LegendPosition::UpperRight,
        }
    }

    pub fn has_data(&self) -> bool {
        self.lines.iter().any(|s| s.data.iter().any(|&(x, y)| x.is_finite() && y.is_finite()))
            || self.error_bars.iter().any(|s| !s.line.data.is_empty())
    }
}

fn in_x_limits(x: f64, limits: Option<(f64, f64)>) -> bool {
    limits.map_or(true, |(lo, hi)| x >= lo && x <= hi)
}

fn finite_bounds(values: Vec<f64>) -> Option<(f64, f64)> {
    let finite: Array1<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let min = *finite.min().ok()?;
    let max = *finite.max().ok()?;
    Some((min, max))
}

/// Axis ranges covering every visible point of the figure.
pub fn figure_ranges(config: &FigureConfig) -> Option<(Range<f64>, Range<f64>)> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for series in &config.lines {
        for &(x, y) in series.data.iter().filter(|p| in_x_limits(p.0, config.x_limits)) {
            xs.push(x);
            ys.push(y);
        }
    }
    for series in &config.error_bars {
        for (&(x, mean), &err) in series.line.data.iter().zip(&series.errors) {
            xs.push(x);
            ys.push(mean - err);
            ys.push(mean + err);
        }
    }
    ys.extend(config.reference_lines.iter().map(|r| r.y));

    let (x_min, x_max) = match config.x_limits {
        Some(limits) => limits,
        None if !config.error_bars.is_empty() => {
            let (lo, hi) = finite_bounds(xs)?;
            calculate_range(lo, hi)
        }
        None => finite_bounds(xs)?,
    };
    let (y_min, y_max) = finite_bounds(ys).map(|(lo, hi)| calculate_range(lo, hi))?;
    if x_max <= x_min {
        let (lo, hi) = calculate_range(x_min, x_max);
        return Some((lo..hi, y_min..y_max));
    }
    Some((x_min..x_max, y_min..y_max))
}

/// Splits a series into runs of finite points; NaN gaps break the line.
pub fn finite_runs(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Cuts a polyline into the "on" pieces of a dash pattern measured in pixels.
///
/// `to_pixel` maps data to backend coordinates; cut points are interpolated in data
/// space, which is exact for linear axes. The pattern phase carries across vertices.
/// A pattern with any non-positive length draws the line solid.
pub fn dash_segments<F>(
    points: &[(f64, f64)],
    to_pixel: F,
    pattern: &[f64],
    unit_px: f64,
) -> Vec<Vec<(f64, f64)>>
where
    F: Fn((f64, f64)) -> (f64, f64),
{
    let mut segments = Vec::new();
    let drawable = !pattern.is_empty() && pattern.iter().all(|&len| len > 0.0);
    if points.len() < 2 || !drawable || unit_px <= 0.0 {
        if points.len() >= 2 {
            segments.push(points.to_vec());
        }
        return segments;
    }

    let mut index = 0;
    let mut on = true;
    let mut remaining = pattern[0] * unit_px;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (pa, pb) = (to_pixel(a), to_pixel(b));
        let length = ((pb.0 - pa.0).powi(2) + (pb.1 - pa.1).powi(2)).sqrt();
        let mut travelled = 0.0;
        while length - travelled > remaining {
            travelled += remaining;
            let t = travelled / length;
            let cut = (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1));
            if on {
                if current.last() != Some(&cut) {
                    current.push(cut);
                }
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            } else {
                current = vec![cut];
            }
            on = !on;
            index = (index + 1) % pattern.len();
            remaining = pattern[index] * unit_px;
        }
        remaining -= length - travelled;
        if on {
            current.push(b);
        }
    }
    if on && current.len() > 1 {
        segments.push(current);
    }
    segments
}

fn draw_line_series(
    chart: &mut FigureChart,
    series: &PlotSeries,
    x_limits: Option<(f64, f64)>,
) -> Result<bool, Box<dyn Error>> {
    let visible: Vec<(f64, f64)> = series
        .data
        .iter()
        .copied()
        .filter(|p| in_x_limits(p.0, x_limits))
        .collect();

    let mut pieces = Vec::new();
    for run in finite_runs(&visible) {
        match series.line_style.dash_pattern() {
            None => pieces.push(run),
            Some(pattern) => {
                let to_pixel = |p: (f64, f64)| {
                    let (px, py) = chart.backend_coord(&p);
                    (px as f64, py as f64)
                };
                pieces.extend(dash_segments(
                    &run,
                    to_pixel,
                    pattern,
                    DASH_UNIT_PX * series.stroke_width.max(1) as f64,
                ));
            }
        }
    }
    if pieces.is_empty() {
        return Ok(false);
    }

    let style = series.shape_style();
    let annotation = chart.draw_series(
        pieces
            .into_iter()
            .map(move |piece| PathElement::new(piece, style)),
    )?;

    if !series.label.is_empty() {
        let legend_style = series.color.mix(series.alpha).stroke_width(LINE_WIDTH_LEGEND);
        annotation
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_style));
        return Ok(true);
    }
    Ok(false)
}

fn draw_error_bars(chart: &mut FigureChart, series: &ErrorBarSeries) -> Result<(), Box<dyn Error>> {
    let style = series.line.shape_style();
    chart.draw_series(
        series
            .line
            .data
            .iter()
            .zip(&series.errors)
            .filter(|(p, e)| p.0.is_finite() && p.1.is_finite() && e.is_finite())
            .map(move |(&(x, mean), &err)| {
                ErrorBar::new_vertical(x, mean - err, mean, mean + err, style, ERROR_BAR_CAP_PX)
            }),
    )?;
    Ok(())
}

/// Renders `config` into an SVG file at `output_path`, creating parent directories.
pub fn draw_figure(output_path: &Path, config: &FigureConfig) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let figure_name = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let root_area = SVGBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let ranges = if config.has_data() {
        figure_ranges(config)
    } else {
        None
    };
    let Some((x_range, y_range)) = ranges else {
        draw_unavailable_message(&root_area, &figure_name, "No data points")?;
        root_area.present()?;
        println!(
            "  Skipping '{}' plot saving: no data available, only placeholder message shown.",
            output_path.display()
        );
        return Ok(());
    };

    let mut builder = ChartBuilder::on(&root_area);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if !config.title.is_empty() {
        builder.caption(&config.title, ("sans-serif", FONT_SIZE_CHART_TITLE));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_labels(12)
        .y_labels(10)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for reference in &config.reference_lines {
        let line = PlotSeries::styled(
            vec![(x_range.start, reference.y), (x_range.end, reference.y)],
            "",
            reference.style,
        );
        draw_line_series(&mut chart, &line, None)?;
    }

    let mut legend_series_count = 0;
    for series in &config.lines {
        if draw_line_series(&mut chart, series, config.x_limits)? {
            legend_series_count += 1;
        }
    }
    for series in &config.error_bars {
        draw_error_bars(&mut chart, series)?;
        if draw_line_series(&mut chart, &series.line, config.x_limits)? {
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(config.legend_position.series_label_position())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    root_area.present()?;
    println!("  Plot saved as '{}'.", output_path.display());
    Ok(())
}

/// Sequential palette for the three runs of a repeatability test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunGradient {
    Reds,
    Blues,
}

pub fn repeat_run_colors(gradient: RunGradient) -> [RGBColor; 3] {
    let palette = match gradient {
        RunGradient::Reds => colorous::REDS,
        RunGradient::Blues => colorous::BLUES,
    };
    REPEAT_RUN_GRADIENT_POSITIONS.map(|t| {
        let color = palette.eval_continuous(t);
        RGBColor(color.r, color.g, color.b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLOR_TAB_BLUE;

    fn identity(p: (f64, f64)) -> (f64, f64) {
        p
    }

    #[test]
    fn dash_segments_follow_pattern_across_vertices() {
        let points = [(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)];
        let segments = dash_segments(&points, identity, &[2.0, 1.0], 1.0);
        assert_eq!(segments[0], vec![(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(segments[1], vec![(3.0, 0.0), (5.0, 0.0)]);
        assert_eq!(segments[2], vec![(6.0, 0.0), (8.0, 0.0)]);
        assert_eq!(segments[3], vec![(9.0, 0.0), (10.0, 0.0)]);
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn odd_pattern_swaps_on_and_off() {
        let points = [(0.0, 0.0), (18.0, 0.0)];
        let segments = dash_segments(&points, identity, &[5.0, 2.0, 2.0], 1.0);
        // dash 5, gap 2, dash 2, gap 5, dash 2, gap 2
        assert_eq!(segments[0], vec![(0.0, 0.0), (5.0, 0.0)]);
        assert_eq!(segments[1], vec![(7.0, 0.0), (9.0, 0.0)]);
        assert_eq!(segments[2], vec![(14.0, 0.0), (16.0, 0.0)]);
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn zero_length_pattern_entry_draws_solid() {
        let points = [(0.0, 0.0), (10.0, 0.0)];
        let patterns: [&[f64]; 4] = [&[2.0, 0.0], &[0.0, 3.0], &[4.0, -1.0, 2.0], &[]];
        for pattern in patterns {
            let segments = dash_segments(&points, identity, pattern, 1.0);
            assert_eq!(segments, vec![points.to_vec()], "{pattern:?}");
        }
    }

    #[test]
    fn finite_runs_break_at_nan() {
        let runs = finite_runs(&[(f64::NAN, 0.0), (1.0, 1.0), (2.0, f64::NAN), (3.0, 3.0), (4.0, 4.0)]);
        assert_eq!(runs, vec![vec![(1.0, 1.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
    }

    #[test]
    fn x_limits_restrict_y_range() {
        let style = SeriesStyle {
            color: COLOR_TAB_BLUE,
            line_style: LineStyle::Solid,
            stroke_width: 1,
        };
        let mut config = FigureConfig::new("Time (s)", "Force (N)");
        config.x_limits = Some((5.0, 15.0));
        config.lines.push(PlotSeries::styled(
            vec![(0.0, 1000.0), (6.0, 1.0), (10.0, 3.0), (20.0, -1000.0)],
            "trace",
            style,
        ));
        let (x, y) = figure_ranges(&config).unwrap();
        assert_eq!(x, 5.0..15.0);
        assert!((y.start - 0.7).abs() < 1e-9 && (y.end - 3.3).abs() < 1e-9);
    }

    #[test]
    fn empty_figure_has_no_ranges() {
        let config = FigureConfig::new("x", "y");
        assert!(!config.has_data());
        assert!(figure_ranges(&config).is_none());
    }

    #[test]
    fn repeat_run_colors_darken() {
        let [light, _, dark] = repeat_run_colors(RunGradient::Reds);
        let luminance = |c: RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        assert!(luminance(light) > luminance(dark));
    }
}

// src/plot_framework.rs
