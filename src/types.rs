// src/types.rs
// Type aliases shared by the experiment pipelines and the plot functions.

use std::collections::BTreeMap;

use crate::data_analysis::TimeSeries;

/// Traces keyed by subject (or air-chamber model) name. Figures skip names
/// without an entry.
pub type SubjectTraces = BTreeMap<&'static str, TimeSeries>;

/// One trace per repeated run, in run order.
pub type RepeatTraces = [TimeSeries; 3];

/// Error-bar point: pressure (MPa), mean friction range (N), standard error (N).
pub type RangePoint = (f64, f64, f64);

/// Friction-range points per subject, in increasing pressure.
pub type SubjectRanges = BTreeMap<&'static str, Vec<RangePoint>>;

/// Friction-range points per repeated run.
pub type RepeatRanges = [Vec<RangePoint>; 3];
