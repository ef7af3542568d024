//! Core types shared across the opticorr workspace.
//!
//! All spectra are flat sequences of real power fractions in [0, 1],
//! index-aligned to a single wavelength grid. Nothing here owns mutable
//! state: containers are built once and read everywhere.

use serde::{Deserialize, Serialize};

/// The four raw spectra measured by the solver on the truncated sample.
///
/// Forward spectra come from illumination on the incidence side, reverse
/// spectra from illumination on the substrate side; together they
/// characterise the thin-sample asymmetry without a full backside model.
/// All four vectors are index-aligned to `wavelengths`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpectra {
    /// Wavelength grid, strictly increasing.
    pub wavelengths: Vec<f64>,
    /// R under forward illumination.
    pub reflectance_forward: Vec<f64>,
    /// T under forward illumination.
    pub transmittance_forward: Vec<f64>,
    /// R under reverse illumination.
    pub reflectance_reverse: Vec<f64>,
    /// T under reverse illumination.
    pub transmittance_reverse: Vec<f64>,
}

impl RawSpectra {
    /// Number of wavelength samples.
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

/// Corrected R/T spectra, index-aligned to the input wavelength grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectedSpectra {
    /// R including backside reflection and substrate absorption.
    pub reflectance: Vec<f64>,
    /// T including backside transmission and substrate absorption.
    pub transmittance: Vec<f64>,
}

/// Parameters of the backside correction.
///
/// `substrate_thickness` must be expressed in the same length unit as the
/// wavelength grid passed to the engine (e.g. both in nanometres). A unit
/// mismatch is undetectable from the values alone, so it is the caller's
/// responsibility, not a runtime check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionParams {
    /// Refractive index of the surrounding medium (air = 1.0003).
    pub ambient_index: f64,
    /// Angle of incidence in degrees. Enters the absorption exponent only;
    /// the backside Fresnel term always uses the normal-incidence form.
    pub incidence_angle_deg: f64,
    /// Substrate thickness, in the same unit as the wavelength grid.
    pub substrate_thickness: f64,
}

impl Default for CorrectionParams {
    fn default() -> Self {
        Self {
            ambient_index: 1.0003,
            incidence_angle_deg: 0.0,
            // 2 mm expressed in nm, for the common case of an nm grid.
            substrate_thickness: 2.0e6,
        }
    }
}
