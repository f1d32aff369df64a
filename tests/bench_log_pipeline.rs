// tests/bench_log_pipeline.rs

use approx::assert_abs_diff_eq;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use seal_bench_render::config::AnalysisConfig;
use seal_bench_render::data_analysis::friction::{friction_force, segment_and_range};
use seal_bench_render::data_input::log_parser::parse_bench_log;
use seal_bench_render::data_input::test_matrix::friction_log;
use seal_bench_render::error::AnalysisError;
use seal_bench_render::experiments::friction::analyse_velocity;

const SAMPLES: usize = 1200;
const HALF_STROKE_SAMPLES: usize = 200;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("seal_bench_render_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Triangle stroke between 0 and 40 mm at 20 mm/s, rod force +-30 N, zero pressure.
/// Starts with `drop_amount` start-up rows that must be discarded.
fn synthetic_friction_log(drop_amount: usize) -> String {
    let mut text = String::new();
    for _ in 0..drop_amount {
        writeln!(text, "0 0 0 0 0.0 0.0 999.0").unwrap();
    }
    for k in 0..SAMPLES {
        let phase = k % (2 * HALF_STROKE_SAMPLES);
        let laser = if phase < HALF_STROKE_SAMPLES {
            40.0 - 0.2 * phase as f64
        } else {
            0.2 * (phase - HALF_STROKE_SAMPLES) as f64
        };
        let force = if phase < HALF_STROKE_SAMPLES { 30.0 } else { -30.0 };
        writeln!(text, "{}  1 2 3  {:.3}  0.0  {:.1}", k * 10, laser, force).unwrap();
    }
    text
}

fn config_with_log(name: &str, model: &str, bar: u32) -> AnalysisConfig {
    let data_dir = scratch_dir(name);
    let config = AnalysisConfig {
        data_dir: data_dir.clone(),
        output_dir: data_dir.join("figures"),
        ..AnalysisConfig::default()
    };
    let path = config.data_path(friction_log(model, bar));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, synthetic_friction_log(config.drop_amount)).unwrap();
    config
}

#[test]
fn friction_log_segments_into_full_cycles() {
    let config = config_with_log("segments", "O-ring", 3);
    let log = parse_bench_log(&config.data_path(friction_log("O-ring", 3)), config.drop_amount).unwrap();
    assert_eq!(log.len(), SAMPLES);
    assert_abs_diff_eq!(log.force_n[0], 30.0);
    assert_abs_diff_eq!(log.time_s[1], 0.01, epsilon = 1e-12);

    let friction = friction_force(&log, 25.0);
    let segmentation = segment_and_range(&friction.values, config.min_run_len).unwrap();
    assert_eq!(segmentation.cycle_ranges.len(), 3);
    assert_abs_diff_eq!(segmentation.range_mean, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segmentation.range_std_error, 0.0, epsilon = 1e-9);

    let _ = fs::remove_dir_all(&config.data_dir);
}

#[test]
fn piston_speed_from_laser_trace() {
    let config = config_with_log("velocity", "O-ring", 3);
    let velocities = analyse_velocity(&config, "O-ring", 3).unwrap();

    let indices: Vec<usize> = velocities.peaks.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![200, 400, 600, 800, 1000]);
    assert_eq!(velocities.extending_mm_s.len(), 2);
    assert_eq!(velocities.retracting_mm_s.len(), 2);
    assert_abs_diff_eq!(velocities.mean_extending().unwrap(), -20.0, epsilon = 1e-6);
    assert_abs_diff_eq!(velocities.mean_retracting().unwrap(), 20.0, epsilon = 1e-6);

    let _ = fs::remove_dir_all(&config.data_dir);
}

#[test]
fn missing_log_is_data_unavailable() {
    let config = AnalysisConfig {
        data_dir: scratch_dir("missing"),
        ..AnalysisConfig::default()
    };
    let err = analyse_velocity(&config, "NAPN", 7).unwrap_err();
    assert!(matches!(err, AnalysisError::DataUnavailable { .. }), "{err}");

    let _ = fs::remove_dir_all(&config.data_dir);
}

#[test]
fn unknown_model_is_rejected() {
    let config = AnalysisConfig::default();
    let err = analyse_velocity(&config, "Hexagon", 3).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData(_)), "{err}");
}
