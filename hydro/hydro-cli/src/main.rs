//! `buoy-stability`: hydrostatic stability analysis of a hull mesh.
//!
//! Loads a closed hull from `<input-dir>/<filename>`, tilts it through a
//! full turn and reports whether it rights itself, at which angles it
//! rests, and the per-angle results in `<output>/<stem>/results.csv`.
//!
//! ```text
//! buoy-stability -f spar.stl -m 42.5 -c 0 0 180 -r 15 -v y
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hydro_stability::{Axis, Body, StabilityConfig, StabilityFormula, analyze_hull};
use mesh_io::load_mesh;
use mesh_types::Point3;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Hydrostatic stability analysis for floating hulls
#[derive(Parser, Debug)]
#[command(name = "buoy-stability")]
#[command(about = "Hydrostatic stability analysis for floating hulls", long_about = None)]
#[command(version)]
struct Cli {
    /// Hull mesh file (.stl), relative to the input directory
    #[arg(short, long)]
    filename: PathBuf,

    /// Directory the hull file is read from
    #[arg(short, long, default_value = "input")]
    input_dir: PathBuf,

    /// Mass of the body in kilograms
    #[arg(short, long)]
    mass: f64,

    /// Center of gravity (x y z) in mm, relative to the hull's bottom center
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        required = true
    )]
    cg: Vec<f64>,

    /// Angular resolution of the sweep in degrees
    #[arg(short, long, default_value_t = 45.0)]
    resolution: f64,

    /// Buoyancy accuracy of the waterline in kilograms
    #[arg(short, long, default_value_t = 0.001)]
    accuracy: f64,

    /// Axis to tilt about: x or y
    #[arg(short = 'v', long, default_value = "x")]
    rotation: Axis,

    /// Lever arm reference: cg-relative or origin-relative
    #[arg(long, default_value = "cg-relative")]
    formula: StabilityFormula,

    /// Bisection steps allowed per angle
    #[arg(long, default_value_t = 64)]
    max_iterations: usize,

    /// Time budget per waterline search in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Solve angles one at a time instead of on all cores
    #[arg(long)]
    serial: bool,

    /// Directory results are written under
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> StabilityConfig {
        let config = StabilityConfig::default()
            .with_resolution(self.resolution)
            .with_tolerance(self.accuracy)
            .with_axis(self.rotation)
            .with_formula(self.formula)
            .with_max_iterations(self.max_iterations)
            .with_parallel(!self.serial);
        match self.deadline_ms {
            Some(ms) => config.with_deadline(Duration::from_millis(ms)),
            None => config,
        }
    }

    fn center_of_gravity(&self) -> Point3<f64> {
        match self.cg.as_slice() {
            &[x, y, z] => Point3::new(x, y, z),
            _ => Point3::origin(),
        }
    }

    fn hull_path(&self) -> PathBuf {
        self.input_dir.join(&self.filename)
    }
}

fn parse_level(name: &str) -> Level {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let path = cli.hull_path();
    let mesh = load_mesh(&path)
        .with_context(|| format!("failed to load hull from {}", path.display()))?;
    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Loaded hull"
    );

    let body = Body::new(mesh, cli.mass, cli.center_of_gravity());
    let report = analyze_hull(&body, &cli.config()).context("stability analysis failed")?;

    println!("{}", report::summary(&report));

    let csv_path = report::results_path(&cli.output, &cli.filename);
    report::export_csv(&report, &csv_path)?;
    info!(path = %csv_path.display(), rows = report.rows.len(), "Wrote results");

    Ok(())
}
