//! Correction runner: ties together the raw spectra, the substrate
//! provider, and the correction engine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use opticorr_core::backside::correct_for_backside;
use opticorr_core::types::{CorrectedSpectra, CorrectionParams, RawSpectra};
use opticorr_materials::b270::b270;
use opticorr_materials::provider::SubstrateOptics;
use opticorr_materials::store::MaterialStore;
use opticorr_materials::table::DispersionTable;

use crate::config::JobConfig;

/// Results of a correction run, kept together for the writers.
pub struct CorrectionOutput {
    pub raw: RawSpectra,
    pub corrected: CorrectedSpectra,
}

/// Run a full correction job from a parsed configuration.
pub fn run_correction(job: &JobConfig) -> Result<CorrectionOutput> {
    let spectra_path = Path::new(&job.input.spectra);
    let content = std::fs::read_to_string(spectra_path)
        .with_context(|| format!("Failed to read raw spectra '{}'", spectra_path.display()))?;
    let raw = parse_raw_spectra(&content)
        .with_context(|| format!("Malformed raw spectra '{}'", spectra_path.display()))?;
    println!(
        "Raw spectra: {} samples, {:.1}-{:.1}",
        raw.len(),
        raw.wavelengths[0],
        raw.wavelengths[raw.len() - 1]
    );

    let substrate = resolve_substrate(
        &job.correction.substrate,
        job.materials.database.as_deref().map(Path::new),
    )?;
    let n_substrate = substrate
        .refractive_index(&raw.wavelengths)
        .with_context(|| {
            format!(
                "Substrate '{}' could not be interpolated onto the measurement grid",
                job.correction.substrate
            )
        })?;

    let params = CorrectionParams {
        ambient_index: job.correction.ambient_index,
        incidence_angle_deg: job.correction.incidence_angle_deg,
        substrate_thickness: job.correction.thickness,
    };

    let corrected = correct_for_backside(
        &raw.wavelengths,
        &raw.reflectance_forward,
        &raw.transmittance_forward,
        &raw.reflectance_reverse,
        &raw.transmittance_reverse,
        &n_substrate,
        &params,
    )
    .with_context(|| format!("Backside correction failed for '{}'", job.correction.substrate))?;

    Ok(CorrectionOutput { raw, corrected })
}

/// Resolve a substrate name to its dispersion table.
///
/// With a database directory configured, the name is looked up there; with
/// none, only the embedded B270 table is available.
fn resolve_substrate(name: &str, database: Option<&Path>) -> Result<DispersionTable> {
    match database {
        Some(dir) => MaterialStore::open(dir)
            .load(name)
            .with_context(|| format!("Substrate '{name}' in database '{}'", dir.display())),
        None if name.eq_ignore_ascii_case("B270") => Ok(b270()),
        None => anyhow::bail!(
            "Substrate '{name}' requires [materials].database; only the B270 table is built in"
        ),
    }
}

/// Parse a raw-spectra file: rows of `wavelength R_f T_f R_r T_r`,
/// whitespace or comma separated. Lines starting with `#` and blank lines
/// are skipped.
pub fn parse_raw_spectra(content: &str) -> Result<RawSpectra> {
    let mut raw = RawSpectra {
        wavelengths: Vec::new(),
        reflectance_forward: Vec::new(),
        transmittance_forward: Vec::new(),
        reflectance_reverse: Vec::new(),
        transmittance_reverse: Vec::new(),
    };

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() != 5 {
            anyhow::bail!(
                "Line {}: expected 5 columns (wavelength R_f T_f R_r T_r), found {}",
                idx + 1,
                fields.len()
            );
        }

        let mut values = [0.0_f64; 5];
        for (v, field) in values.iter_mut().zip(&fields) {
            *v = field
                .parse()
                .with_context(|| format!("Line {}: invalid number '{}'", idx + 1, field))?;
        }

        raw.wavelengths.push(values[0]);
        raw.reflectance_forward.push(values[1]);
        raw.transmittance_forward.push(values[2]);
        raw.reflectance_reverse.push(values[3]);
        raw.transmittance_reverse.push(values[4]);
    }

    if raw.is_empty() {
        anyhow::bail!("No data rows in raw spectra file");
    }
    Ok(raw)
}

/// One output row: wavelength, the four raw spectra, then the corrected
/// pair, comma separated, five decimal places.
fn format_row(output: &CorrectionOutput, i: usize) -> String {
    format!(
        "{:.5}, {:.5}, {:.5}, {:.5}, {:.5}, {:.5}, {:.5}",
        output.raw.wavelengths[i],
        output.raw.reflectance_forward[i],
        output.raw.transmittance_forward[i],
        output.raw.reflectance_reverse[i],
        output.raw.transmittance_reverse[i],
        output.corrected.reflectance[i],
        output.corrected.transmittance[i],
    )
}

/// Write corrected spectra as comma-delimited text, one row per sample, no
/// header row.
pub fn write_corrected(output: &CorrectionOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;
    for i in 0..output.raw.len() {
        writeln!(file, "{}", format_row(output, i))?;
    }

    println!("Corrected spectra written to: {}", path.display());
    Ok(())
}

/// Write corrected spectra to a JSON file.
pub fn write_corrected_json(output: &CorrectionOutput, path: &Path) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        raw: &'a RawSpectra,
        corrected: &'a CorrectedSpectra,
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&JsonOutput {
        raw: &output.raw,
        corrected: &output.corrected,
    })?;
    std::fs::write(path, json)?;

    println!("Corrected spectra (JSON) written to: {}", path.display());
    Ok(())
}

/// Output file path for a job, honouring a command-line override of the
/// output directory.
pub fn output_path(job: &JobConfig, override_dir: Option<&Path>) -> PathBuf {
    let dir = override_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&job.output.directory));
    dir.join(&job.output.file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_spectra_mixed_separators() {
        let content = "\
# wavelength R_f T_f R_r T_r
500.0, 0.1, 0.8, 0.05, 0.85
600.0\t0.11\t0.79\t0.06\t0.84

700.0 0.12 0.78 0.07 0.83
";
        let raw = parse_raw_spectra(content).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.wavelengths, vec![500.0, 600.0, 700.0]);
        assert_eq!(raw.transmittance_reverse, vec![0.85, 0.84, 0.83]);
    }

    #[test]
    fn test_parse_raw_spectra_wrong_width() {
        let err = parse_raw_spectra("500.0 0.1 0.8 0.05\n").unwrap_err();
        assert!(err.to_string().contains("5 columns"));
    }

    #[test]
    fn test_format_row_five_decimals_no_header() {
        let output = CorrectionOutput {
            raw: RawSpectra {
                wavelengths: vec![500.0],
                reflectance_forward: vec![0.1],
                transmittance_forward: vec![0.8],
                reflectance_reverse: vec![0.05],
                transmittance_reverse: vec![0.85],
            },
            corrected: CorrectedSpectra {
                reflectance: vec![0.127216],
                transmittance: vec![0.769561],
            },
        };
        assert_eq!(
            format_row(&output, 0),
            "500.00000, 0.10000, 0.80000, 0.05000, 0.85000, 0.12722, 0.76956"
        );
    }
}
