// src/data_input/bench_log.rs

/// Columns of one bench-test log after the start-up rows are dropped.
///
/// The logger writes `Time(ms) A B C Laser(mm) Pressure(bar) Force(N)`; the three
/// auxiliary channels are not kept. Time is stored in seconds.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BenchLog {
    pub time_s: Vec<f64>,
    pub laser_mm: Vec<f64>,
    pub pressure_bar: Vec<f64>,
    pub force_n: Vec<f64>,
}

/// One row of a bench log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchSample {
    pub time_s: f64,
    pub laser_mm: f64,
    pub pressure_bar: f64,
    pub force_n: f64,
}

impl BenchLog {
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    pub fn push(&mut self, sample: BenchSample) {
        self.time_s.push(sample.time_s);
        self.laser_mm.push(sample.laser_mm);
        self.pressure_bar.push(sample.pressure_bar);
        self.force_n.push(sample.force_n);
    }

    pub fn samples(&self) -> impl Iterator<Item = BenchSample> + '_ {
        (0..self.len()).map(move |i| BenchSample {
            time_s: self.time_s[i],
            laser_mm: self.laser_mm[i],
            pressure_bar: self.pressure_bar[i],
            force_n: self.force_n[i],
        })
    }

    /// Keeps only the samples matching `keep`, preserving order.
    pub fn filter<F>(&self, mut keep: F) -> BenchLog
    where
        F: FnMut(&BenchSample) -> bool,
    {
        let mut filtered = BenchLog::default();
        for sample in self.samples().filter(|s| keep(s)) {
            filtered.push(sample);
        }
        filtered
    }
}

/// Compressed-air chamber log: `Time;A;Pressure`, time in seconds.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AirChamberLog {
    pub time_s: Vec<f64>,
    pub pressure_bar: Vec<f64>,
}

impl AirChamberLog {
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// Wide repeatability table from the air-chamber bench. Column 0 is the logger clock.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RepeatabilityTable {
    pub columns: Vec<(String, Vec<f64>)>,
}

impl RepeatabilityTable {
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, laser: f64) -> BenchSample {
        BenchSample {
            time_s: t,
            laser_mm: laser,
            pressure_bar: 3.0,
            force_n: 10.0,
        }
    }

    #[test]
    fn filter_preserves_order_and_columns() {
        let mut log = BenchLog::default();
        for (i, laser) in [37.0, 37.71, 37.69, 38.0, 37.7].iter().enumerate() {
            log.push(sample(i as f64, *laser));
        }
        let kept = log.filter(|s| (s.laser_mm - 37.7).abs() < 0.02);
        assert_eq!(kept.time_s, vec![1.0, 2.0, 4.0]);
        assert_eq!(kept.pressure_bar.len(), 3);
        assert_eq!(kept.force_n.len(), 3);
    }
}

// src/data_input/bench_log.rs
