// src/main.rs

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use seal_bench_render::config::AnalysisConfig;
use seal_bench_render::constants::{
    DROP_AMOUNT, DYNAMIC_POSITION_MARGIN_MM, KIDNEY_ARC_ANGLE_DEG, MIN_STROKE_RUN_SAMPLES,
    PEAK_HALF_WINDOW_SAMPLES, SHAPE_RING_INNER_DIAMETER_MM, SHAPE_RING_SECTION_MM,
};
use seal_bench_render::crate_version;
use seal_bench_render::experiments::{self, geometry::GeometryInput};

const DEFAULT_LOG_FILTER: &str = "seal_bench_render=info";

#[derive(Parser, Debug)]
#[command(
    name = "seal_bench_render",
    version = crate_version(),
    about = "Renders pneumatic actuator seal bench-test logs and sizes seal grooves",
    long_about = "Reads the leakage, friction and air-chamber logs of the seal bench and writes\n\
                  one SVG figure per comparison plus console summaries.\n\n\
                  Log verbosity follows RUST_LOG (default: seal_bench_render=info)."
)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Root directory of the bench logs
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the SVG figures are written to
    #[arg(long, global = true, default_value = "figures")]
    output_dir: PathBuf,

    /// Leading rows dropped from every bench log
    #[arg(long, global = true, default_value_t = DROP_AMOUNT)]
    drop_amount: usize,

    /// Minimum samples per stroke in the friction segmenter
    #[arg(long, global = true, default_value_t = MIN_STROKE_RUN_SAMPLES)]
    min_run_len: usize,

    /// Half-window (samples) of the piston peak detector
    #[arg(long, global = true, default_value_t = PEAK_HALF_WINDOW_SAMPLES)]
    peak_window: usize,

    /// Laser tolerance (mm) around the dynamic-leakage comparison position
    #[arg(long, global = true, default_value_t = DYNAMIC_POSITION_MARGIN_MM)]
    position_margin: f64,
}

impl From<&GlobalOptions> for AnalysisConfig {
    fn from(options: &GlobalOptions) -> Self {
        AnalysisConfig {
            data_dir: options.data_dir.clone(),
            output_dir: options.output_dir.clone(),
            drop_amount: options.drop_amount,
            min_run_len: options.min_run_len,
            peak_half_window: options.peak_window,
            position_margin_mm: options.position_margin,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Groove dimensions and stadium/kidney cross-sections
    Geometry {
        /// O-ring inner diameter (mm)
        #[arg(long, default_value_t = SHAPE_RING_INNER_DIAMETER_MM)]
        inner_diameter: f64,

        /// O-ring section thickness (mm)
        #[arg(long, default_value_t = SHAPE_RING_SECTION_MM)]
        thickness: f64,

        /// Kidney arc angle (degrees)
        #[arg(long, default_value_t = KIDNEY_ARC_ANGLE_DEG)]
        arc_angle_deg: f64,
    },
    /// Pressure drop of the closed chamber at rest
    StaticLeakage,
    /// Chamber pressure at the comparison position while stroking
    DynamicLeakage,
    /// Friction force range, single-stroke table and piston speed
    Friction,
    /// Pressure drop of the 3D-printed air chambers
    AirChamber,
    /// Every analysis in turn
    All,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = AnalysisConfig::from(&cli.options);
    tracing::debug!(?config, "resolved configuration");

    match &cli.command {
        Command::Geometry {
            inner_diameter,
            thickness,
            arc_angle_deg,
        } => experiments::geometry::run(&GeometryInput {
            inner_diameter_mm: *inner_diameter,
            ring_thickness_mm: *thickness,
            kidney_arc_angle_deg: *arc_angle_deg,
        }),
        Command::StaticLeakage => experiments::static_leakage::run(&config),
        Command::DynamicLeakage => experiments::dynamic_leakage::run(&config),
        Command::Friction => experiments::friction::run(&config),
        Command::AirChamber => experiments::air_chamber::run(&config),
        Command::All => experiments::run_all(&config),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(version = crate_version(), "seal_bench_render");

    if let Err(e) = run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

// src/main.rs
