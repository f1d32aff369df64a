// src/report.rs

use std::collections::BTreeMap;

use crate::data_analysis::friction::{StrokeDirection, StrokeRun};
use crate::data_analysis::geometry::{GrooveDimensions, ShapeSolution};
use crate::data_analysis::velocity::PistonVelocities;

pub fn print_groove_dimensions(label: &str, dims: &GrooveDimensions) {
    println!("{label}");
    println!("  Cylinder bore (O-ring OD): {:.2} mm", dims.outer_diameter);
    println!("  Piston diameter:           {:.2} mm", dims.piston_diameter);
    println!("  Groove diameter:           {:.2} mm", dims.groove_diameter);
    println!("  Groove width:              {:.2} mm", dims.groove_width);
}

pub fn print_shape_solution(solution: &ShapeSolution) {
    let (primary_name, secondary_name) = solution.kind.parameter_names();
    let (primary, secondary) = solution.params();
    println!(
        "{} cross-section (perimeter {:.3} mm, target area {:.3} mm^2)",
        solution.kind.name(),
        solution.perimeter,
        solution.target_area
    );
    println!(
        "  Coarse: {primary_name} = {:.2} mm, {secondary_name} = {:.3} mm, area {:.3} mm^2",
        solution.coarse.below.primary, solution.coarse.below.secondary, solution.coarse.below.area
    );
    println!(
        "  Fine:   {primary_name} = {:.4} mm, {secondary_name} = {:.4} mm, area {:.3} mm^2",
        primary,
        secondary,
        solution.area()
    );
}

fn direction_name(direction: StrokeDirection) -> &'static str {
    match direction {
        StrokeDirection::Retracting => "retracting",
        StrokeDirection::Extending => "extending",
    }
}

fn direction_order(direction: StrokeDirection) -> u8 {
    match direction {
        StrokeDirection::Retracting => 0,
        StrokeDirection::Extending => 1,
    }
}

/// Mean and spread of the last stroke of each direction, per pressure and model.
#[derive(Debug, Clone, Default)]
pub struct SingleStrokeTable {
    models: Vec<&'static str>,
    cells: BTreeMap<(u32, u8), BTreeMap<&'static str, String>>,
}

impl SingleStrokeTable {
    pub fn new(models: Vec<&'static str>) -> Self {
        Self {
            models,
            cells: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, bar: u32, model: &'static str, run: &StrokeRun) {
        let cell = format!("{:.2} ± {:.2}", run.mean(), run.std());
        self.cells
            .entry((bar, direction_order(run.direction)))
            .or_default()
            .insert(model, cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, bar: u32, direction: StrokeDirection, model: &str) -> Option<&str> {
        self.cells
            .get(&(bar, direction_order(direction)))
            .and_then(|row| row.get(model))
            .map(String::as_str)
    }

    /// Rows as `{bar}_bar_{direction}` labels with one cell per model (`NaN` when absent).
    pub fn rows(&self) -> Vec<(String, Vec<String>)> {
        self.cells
            .iter()
            .map(|(&(bar, order), row)| {
                let direction = if order == 0 {
                    StrokeDirection::Retracting
                } else {
                    StrokeDirection::Extending
                };
                let label = format!("{bar}_bar_{}", direction_name(direction));
                let cells = self
                    .models
                    .iter()
                    .map(|model| row.get(model).cloned().unwrap_or_else(|| "NaN".to_string()))
                    .collect();
                (label, cells)
            })
            .collect()
    }

    pub fn print(&self) {
        let rows = self.rows();
        let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0).max(3);
        let widths: Vec<usize> = self
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                rows.iter()
                    .map(|(_, cells)| cells[i].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(model.chars().count())
            })
            .collect();

        let mut header = format!("{:<label_width$}", "Bar");
        for (model, width) in self.models.iter().zip(&widths) {
            header.push_str(&format!("  {model:>width$}"));
        }
        println!("{header}");
        for (label, cells) in rows {
            let mut line = format!("{label:<label_width$}");
            for (cell, width) in cells.iter().zip(&widths) {
                line.push_str(&format!("  {cell:>width$}"));
            }
            println!("{line}");
        }
    }
}

pub fn print_piston_velocities(model: &str, bar: u32, velocities: &PistonVelocities) {
    let mpa = bar as f64 / 10.0;
    match velocities.mean_extending() {
        Some(speed) => println!(
            "Mean extending speed of the {model} at a pressure of {mpa}MPa: {speed:.2} mm/s"
        ),
        None => println!("No extending stroke found for the {model} at a pressure of {mpa}MPa"),
    }
    match velocities.mean_retracting() {
        Some(speed) => println!(
            "Mean retracting speed of the {model} at a pressure of {mpa}MPa: {speed:.2} mm/s"
        ),
        None => println!("No retracting stroke found for the {model} at a pressure of {mpa}MPa"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(direction: StrokeDirection, values: Vec<f64>) -> StrokeRun {
        StrokeRun {
            direction,
            start: 0,
            values,
        }
    }

    #[test]
    fn table_orders_rows_by_pressure_then_direction() {
        let mut table = SingleStrokeTable::new(vec!["O-ring", "PK"]);
        table.record(3, "PK", &run(StrokeDirection::Extending, vec![-2.0, -4.0]));
        table.record(1, "O-ring", &run(StrokeDirection::Retracting, vec![10.0, 12.0]));
        table.record(1, "O-ring", &run(StrokeDirection::Extending, vec![-10.0]));

        let rows = table.rows();
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1_bar_retracting", "1_bar_extending", "3_bar_extending"]);
        assert_eq!(rows[0].1, vec!["11.00 ± 1.00".to_string(), "NaN".to_string()]);
        assert_eq!(
            table.cell(3, StrokeDirection::Extending, "PK"),
            Some("-3.00 ± 1.00")
        );
    }
}

// src/report.rs
