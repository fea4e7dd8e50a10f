//! Result files and console summary.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hydro_stability::{Flotation, StabilityReport};

/// Header row of `results.csv`.
pub const CSV_HEADER: &str = "Angle (degrees),CB X (mm),CB Y (mm),CB Z (mm),\
                              Water Line Height (mm),Righting Moment (N-m)";

/// Where results for a hull file go: `<output>/<file stem>/results.csv`.
#[must_use]
pub fn results_path(output_dir: &Path, mesh_file: &Path) -> PathBuf {
    let stem = mesh_file
        .file_stem()
        .map_or_else(|| "hull".into(), |s| s.to_string_lossy().into_owned());
    output_dir.join(stem).join("results.csv")
}

/// Write one CSV row per swept angle. A sinking body gets the header only.
pub fn write_csv<W: Write>(report: &StabilityReport, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for row in &report.rows {
        let cb = row.center_of_buoyancy;
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            row.angle_deg, cb.x, cb.y, cb.z, row.waterline_height, row.righting_moment
        )?;
    }
    writer.flush()
}

/// Write the CSV report to `path`, creating parent directories.
pub fn export_csv(report: &StabilityReport, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(report, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Human readable verdict for the console.
#[must_use]
pub fn summary(report: &StabilityReport) -> String {
    let mut out = match report.flotation {
        Flotation::Sinks { displacement_kg } => {
            format!("Buoy will sink! (hull displaces only {displacement_kg:.3} kg)\n")
        }
        Flotation::Floats => String::new(),
    };

    out.push_str(if report.is_stable {
        "Buoy is stable"
    } else {
        "Buoy is unstable"
    });
    if report.sinks() {
        return out;
    }

    match report.ride_angles.as_slice() {
        [] => out.push_str("\nNo ride angle found"),
        [angle] => out.push_str(&format!("\nRide angle: {angle:.2} degrees")),
        angles => {
            let list: Vec<String> = angles.iter().map(|a| format!("{a:.2}")).collect();
            out.push_str(&format!("\nRide angles: {} degrees", list.join(", ")));
        }
    }
    out
}
