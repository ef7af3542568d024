//! TOML configuration deserialisation for correction jobs.

use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub correction: CorrectionConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub materials: MaterialsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Correction parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct CorrectionConfig {
    /// Substrate name resolved against the materials database (or the
    /// embedded B270 table when no database is configured).
    pub substrate: String,
    /// Substrate thickness, in the same length unit as the input
    /// wavelength column (typically nm).
    pub thickness: f64,
    /// Refractive index of the surrounding medium.
    #[serde(default = "default_ambient_index")]
    pub ambient_index: f64,
    /// Angle of incidence in degrees.
    #[serde(default)]
    pub incidence_angle_deg: f64,
}

fn default_ambient_index() -> f64 {
    1.0003
}

/// Input file locations.
#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// Raw spectra file: rows of `wavelength R_f T_f R_r T_r`
    /// (whitespace or comma separated; `#` lines are comments).
    pub spectra: String,
}

/// Materials database configuration.
#[derive(Debug, Deserialize, Default)]
pub struct MaterialsConfig {
    /// Directory of `<name>_nk.txt` dispersion tables. When absent, only
    /// the embedded B270 table resolves.
    #[serde(default)]
    pub database: Option<String>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Corrected-spectra file name (default: "RTA.txt").
    #[serde(default = "default_output_file")]
    pub file: String,
    /// Whether to also save the corrected spectra as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            file: default_output_file(),
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

fn default_output_file() -> String {
    "RTA.txt".into()
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
