// src/data_input/log_parser.rs

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::constants::{AIR_CHAMBER_REPEAT_COLUMNS, MS_PER_S, US_PER_S};
use crate::data_input::bench_log::{AirChamberLog, BenchLog, BenchSample, RepeatabilityTable};
use crate::error::{AnalysisError, AnalysisResult};

/// Columns written by the bench logger: `Time A B C Laser Pressure Force`.
const BENCH_LOG_COLUMNS: usize = 7;
const BENCH_TIME_COLUMN: usize = 0;
const BENCH_LASER_COLUMN: usize = 4;
const BENCH_PRESSURE_COLUMN: usize = 5;
const BENCH_FORCE_COLUMN: usize = 6;

/// Air-chamber logs: `Time;A;Pressure`.
const AIR_CHAMBER_COLUMNS: usize = 3;
const AIR_CHAMBER_TIME_COLUMN: usize = 0;
const AIR_CHAMBER_PRESSURE_COLUMN: usize = 2;

/// Lines before the data rows of a repeatability table: a title line and a header line.
const REPEATABILITY_PREAMBLE_LINES: usize = 2;

fn open(path: &Path) -> AnalysisResult<File> {
    File::open(path).map_err(|e| AnalysisError::data_unavailable(path, e))
}

fn parse_field(record: &StringRecord, column: usize, row: usize, origin: &Path) -> AnalysisResult<f64> {
    let raw = record.get(column).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| {
        AnalysisError::data_unavailable(
            origin,
            format!("row {}: column {} is not a number ('{}')", row + 1, column, raw),
        )
    })
}

/// Parses a whitespace-separated bench log, discarding the first `drop_amount` rows.
pub fn parse_bench_log(path: &Path, drop_amount: usize) -> AnalysisResult<BenchLog> {
    let file = open(path)?;
    let log = read_bench_log(file, path, drop_amount)?;
    tracing::debug!(path = %path.display(), samples = log.len(), "parsed bench log");
    Ok(log)
}

/// Reader-based variant of [`parse_bench_log`]; `origin` is only used in error messages.
pub fn read_bench_log<R: Read>(reader: R, origin: &Path, drop_amount: usize) -> AnalysisResult<BenchLog> {
    // First pass: collapse whitespace runs so the csv reader sees a single delimiter.
    let mut csv_lines: Vec<String> = Vec::new();
    for line_result in BufReader::new(reader).lines() {
        let line = line_result.map_err(|e| AnalysisError::data_unavailable(origin, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        csv_lines.push(fields.join(","));
    }
    let csv_content = csv_lines.join("\n");

    // Second pass: typed rows.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let mut log = BenchLog::default();
    for (row, record_result) in reader.records().enumerate() {
        if row < drop_amount {
            continue;
        }
        let record = record_result.map_err(|e| AnalysisError::data_unavailable(origin, e))?;
        if record.len() < BENCH_LOG_COLUMNS {
            return Err(AnalysisError::data_unavailable(
                origin,
                format!(
                    "row {}: expected {} columns, found {}",
                    row + 1,
                    BENCH_LOG_COLUMNS,
                    record.len()
                ),
            ));
        }
        log.push(BenchSample {
            time_s: parse_field(&record, BENCH_TIME_COLUMN, row, origin)? / MS_PER_S,
            laser_mm: parse_field(&record, BENCH_LASER_COLUMN, row, origin)?,
            pressure_bar: parse_field(&record, BENCH_PRESSURE_COLUMN, row, origin)?,
            force_n: parse_field(&record, BENCH_FORCE_COLUMN, row, origin)?,
        });
    }
    Ok(log)
}

/// Parses a `;`-separated compressed-air chamber log.
pub fn parse_air_chamber_log(path: &Path) -> AnalysisResult<AirChamberLog> {
    let file = open(path)?;
    let log = read_air_chamber_log(file, path)?;
    tracing::debug!(path = %path.display(), samples = log.len(), "parsed air-chamber log");
    Ok(log)
}

/// The time column is a microsecond count written with `.` as thousands separator.
pub fn read_air_chamber_log<R: Read>(reader: R, origin: &Path) -> AnalysisResult<AirChamberLog> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut log = AirChamberLog::default();
    for (row, record_result) in reader.records().enumerate() {
        let record = record_result.map_err(|e| AnalysisError::data_unavailable(origin, e))?;
        if record.len() < AIR_CHAMBER_COLUMNS {
            return Err(AnalysisError::data_unavailable(
                origin,
                format!(
                    "row {}: expected {} columns, found {}",
                    row + 1,
                    AIR_CHAMBER_COLUMNS,
                    record.len()
                ),
            ));
        }
        let raw_time = record.get(AIR_CHAMBER_TIME_COLUMN).unwrap_or("").replace('.', "");
        let time_us = raw_time.parse::<f64>().map_err(|_| {
            AnalysisError::data_unavailable(
                origin,
                format!("row {}: unreadable time stamp '{}'", row + 1, raw_time),
            )
        })?;
        log.time_s.push(time_us / US_PER_S);
        log.pressure_bar
            .push(parse_field(&record, AIR_CHAMBER_PRESSURE_COLUMN, row, origin)?);
    }
    Ok(log)
}

/// Parses one of the wide air-chamber repeatability tables.
pub fn parse_repeatability_table(path: &Path) -> AnalysisResult<RepeatabilityTable> {
    let file = open(path)?;
    let table = read_repeatability_table(file, path)?;
    tracing::debug!(path = %path.display(), rows = table.row_count(), "parsed repeatability table");
    Ok(table)
}

/// Columns are named by position; blank cells become NaN.
pub fn read_repeatability_table<R: Read>(reader: R, origin: &Path) -> AnalysisResult<RepeatabilityTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut columns: Vec<(String, Vec<f64>)> = AIR_CHAMBER_REPEAT_COLUMNS
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for (row, record_result) in reader.records().enumerate() {
        let record = record_result.map_err(|e| AnalysisError::data_unavailable(origin, e))?;
        if row < REPEATABILITY_PREAMBLE_LINES {
            continue;
        }
        for (column, (_, values)) in columns.iter_mut().enumerate() {
            let value = match record.get(column) {
                Some(raw) if !raw.is_empty() => parse_field(&record, column, row, origin)?,
                _ => f64::NAN,
            };
            values.push(value);
        }
    }

    Ok(RepeatabilityTable { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_log_drops_leading_rows_and_converts_time() {
        let text = "0 1 2 3 37.0 3.0 10.0\n\n1000   1 2 3\t37.5 3.1 11.0\n2000 1 2 3 38.0 3.2 12.0\n";
        let log = read_bench_log(text.as_bytes(), Path::new("mem"), 1).unwrap();
        assert_eq!(log.time_s, vec![1.0, 2.0]);
        assert_eq!(log.laser_mm, vec![37.5, 38.0]);
        assert_eq!(log.force_n, vec![11.0, 12.0]);
    }

    #[test]
    fn air_chamber_time_strips_thousands_separator() {
        let text = "1.500.000;x;3.5\n2.000.000;x;3.4\n";
        let log = read_air_chamber_log(text.as_bytes(), Path::new("mem")).unwrap();
        assert_eq!(log.time_s, vec![1.5, 2.0]);
        assert_eq!(log.pressure_bar, vec![3.5, 3.4]);
    }

    #[test]
    fn repeatability_table_skips_preamble() {
        let text = "title\nT;a;b;c;d;e;f;g;h\n0;1;2;3;4;5;6;7;8\n1;1;2;;4;5;6;7;8\n";
        let table = read_repeatability_table(text.as_bytes(), Path::new("mem")).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("Test1"), Some(&[1.0, 1.0][..]));
        assert!(table.column("Test3").unwrap()[1].is_nan());
    }
}

// src/data_input/log_parser.rs
