//! Backside correction of thin-sample R/T spectra.
//!
//! A field solver models the substrate as semi-infinite, so its output
//! spectra miss the reflection at the substrate's second (back) interface
//! and the bulk absorption across the substrate thickness. Given the
//! forward and reverse spectra of the truncated sample, the backside
//! Fresnel reflectance, and a single-pass absorption exponent $\beta$,
//! the corrected spectra follow from summing the infinite geometric series
//! of internal round trips in closed form:
//!
//! $$
//! R = R_f + \frac{T_f\, T_r\, R_b\, e^{4\beta}}{1 - R_r\, R_b\, e^{4\beta}},
//! \qquad
//! T = \frac{T_f\, T_b\, e^{2\beta}}{1 - R_r\, R_b\, e^{4\beta}}
//! $$
//!
//! Each wavelength sample is independent, so the sweep is a data-parallel
//! map over the grid.

use num_complex::Complex64;
use rayon::prelude::*;
use thiserror::Error;

use crate::types::{CorrectedSpectra, CorrectionParams};

/// Denominator magnitude below which the multiple-reflection series is
/// treated as divergent rather than evaluated.
const DENOMINATOR_EPSILON: f64 = 1e-9;

/// Errors from the backside-correction engine.
///
/// Validation errors are raised before any numeric work; numerical faults
/// identify the wavelength sample that triggered them.
#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("Wavelength grid is empty")]
    EmptyGrid,

    #[error("{name} has {actual} samples but the wavelength grid has {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Multiple-reflection series diverges at sample {index} (λ = {wavelength}): \
         |1 - R_r R_b exp(4β)| = {denominator:.3e}"
    )]
    Unstable {
        index: usize,
        wavelength: f64,
        denominator: f64,
    },

    #[error("Non-finite corrected value at sample {index} (λ = {wavelength})")]
    NonFinite { index: usize, wavelength: f64 },
}

/// Fresnel power reflectance and transmittance of the substrate/ambient
/// back interface.
///
/// Uses the normal-incidence form on the real part of the substrate index,
/// regardless of the configured incidence angle — a deliberate
/// simplification of the reference design that is preserved here as
/// documented behaviour:
///
/// $$ R_b = \left| \frac{n_a - \mathrm{Re}(N)}{n_a + \mathrm{Re}(N)} \right|^2,
///    \qquad T_b = 1 - R_b $$
pub fn backside_interface(n_substrate: Complex64, ambient_index: f64) -> (f64, f64) {
    let n_sub = n_substrate.re;
    let ratio = ((ambient_index - n_sub) / (ambient_index + n_sub)).abs();
    let r_back = ratio * ratio;
    (r_back, 1.0 - r_back)
}

/// Single-pass absorption exponent $\beta$ for one wavelength sample.
///
/// The transverse wavevector component is conserved across the interface,
/// so the longitudinal component inside the substrate is
/// $N_{ss} = \sqrt{N^2 - (N \sin\theta)^2}$ (principal complex root).
/// Exactly on the imaginary axis the principal branch is ambiguous between
/// the decaying and the growing root; the sign flip below selects the
/// decaying one. Then
///
/// $$ \beta = \mathrm{Im}\!\left( \frac{2\pi\, d\, N_{ss}}{\lambda} \right) $$
///
/// With the $N = n - ik$ convention ($k \ge 0$), $\beta \le 0$ and the
/// factors $e^{2\beta}$, $e^{4\beta}$ attenuate.
///
/// # Arguments
/// * `wavelength` - Wavelength of this sample, same length unit as `thickness`.
/// * `n_substrate` - Complex substrate index $N = n - ik$ at this wavelength.
/// * `sin_theta` - Sine of the incidence angle in the ambient medium.
/// * `thickness` - Substrate thickness, same length unit as `wavelength`.
pub fn absorption_exponent(
    wavelength: f64,
    n_substrate: Complex64,
    sin_theta: f64,
    thickness: f64,
) -> f64 {
    let transverse = n_substrate * sin_theta;
    let sin2 = transverse * transverse;
    let mut n_ss = (n_substrate * n_substrate - sin2).sqrt();

    // Principal-branch ambiguity on the imaginary axis: take the decaying root.
    if n_ss.re == 0.0 {
        n_ss = -n_ss;
    }

    (n_ss * (2.0 * std::f64::consts::PI * thickness / wavelength)).im
}

/// Closed-form multiple-reflection summation for one wavelength sample.
///
/// Combines the truncated-sample spectra with the backside interface terms
/// and the absorption exponent. This is the bare formula: callers that
/// need divergence detection use [`correct_for_backside`], which checks the
/// denominator before evaluating.
pub fn combine_with_backside(
    r_forward: f64,
    t_forward: f64,
    r_reverse: f64,
    t_reverse: f64,
    r_back: f64,
    t_back: f64,
    beta: f64,
) -> (f64, f64) {
    let round_trip = (4.0 * beta).exp();
    let single_pass = (2.0 * beta).exp();
    let denominator = 1.0 - r_reverse * r_back * round_trip;

    let reflectance = r_forward + (t_forward * t_reverse * r_back * round_trip) / denominator;
    let transmittance = (t_forward * t_back * single_pass) / denominator;
    (reflectance, transmittance)
}

/// Correct forward R/T spectra for the substrate's back interface and bulk
/// absorption.
///
/// All six input slices must have identical length; validation happens
/// before any numeric work. The per-sample computation has no cross-sample
/// dependency and runs as a parallel map over the grid. Output element `i`
/// depends only on element `i` of every input.
///
/// `wavelengths` and `params.substrate_thickness` must share one length
/// unit (see [`CorrectionParams`]).
///
/// # Errors
/// * [`CorrectionError::EmptyGrid`] / [`CorrectionError::LengthMismatch`] —
///   invalid inputs, raised before computation.
/// * [`CorrectionError::Unstable`] — the series denominator
///   $1 - R_r R_b e^{4\beta}$ is within epsilon of zero at some sample.
/// * [`CorrectionError::NonFinite`] — a corrected value came out NaN or
///   infinite at some sample.
pub fn correct_for_backside(
    wavelengths: &[f64],
    reflectance_forward: &[f64],
    transmittance_forward: &[f64],
    reflectance_reverse: &[f64],
    transmittance_reverse: &[f64],
    n_substrate: &[Complex64],
    params: &CorrectionParams,
) -> Result<CorrectedSpectra, CorrectionError> {
    let expected = wavelengths.len();
    if expected == 0 {
        return Err(CorrectionError::EmptyGrid);
    }
    check_length("R_forward", expected, reflectance_forward.len())?;
    check_length("T_forward", expected, transmittance_forward.len())?;
    check_length("R_reverse", expected, reflectance_reverse.len())?;
    check_length("T_reverse", expected, transmittance_reverse.len())?;
    check_length("N_substrate", expected, n_substrate.len())?;

    log::debug!(
        "backside correction over {} samples (thickness = {}, angle = {} deg)",
        expected,
        params.substrate_thickness,
        params.incidence_angle_deg
    );

    let sin_theta = params.incidence_angle_deg.to_radians().sin();

    let samples: Result<Vec<(f64, f64)>, CorrectionError> = (0..expected)
        .into_par_iter()
        .map(|i| {
            correct_sample(
                i,
                wavelengths[i],
                reflectance_forward[i],
                transmittance_forward[i],
                reflectance_reverse[i],
                transmittance_reverse[i],
                n_substrate[i],
                sin_theta,
                params,
            )
        })
        .collect();
    let samples = samples?;

    Ok(CorrectedSpectra {
        reflectance: samples.iter().map(|&(r, _)| r).collect(),
        transmittance: samples.iter().map(|&(_, t)| t).collect(),
    })
}

fn check_length(
    name: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), CorrectionError> {
    if actual != expected {
        return Err(CorrectionError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn correct_sample(
    index: usize,
    wavelength: f64,
    r_forward: f64,
    t_forward: f64,
    r_reverse: f64,
    t_reverse: f64,
    n_substrate: Complex64,
    sin_theta: f64,
    params: &CorrectionParams,
) -> Result<(f64, f64), CorrectionError> {
    let (r_back, t_back) = backside_interface(n_substrate, params.ambient_index);
    let beta = absorption_exponent(
        wavelength,
        n_substrate,
        sin_theta,
        params.substrate_thickness,
    );

    let denominator = 1.0 - r_reverse * r_back * (4.0 * beta).exp();
    if denominator.abs() < DENOMINATOR_EPSILON {
        return Err(CorrectionError::Unstable {
            index,
            wavelength,
            denominator: denominator.abs(),
        });
    }

    let (reflectance, transmittance) = combine_with_backside(
        r_forward, t_forward, r_reverse, t_reverse, r_back, t_back, beta,
    );
    if !reflectance.is_finite() || !transmittance.is_finite() {
        return Err(CorrectionError::NonFinite { index, wavelength });
    }

    Ok((reflectance, transmittance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_backside_interface_lossless_glass() {
        let n = Complex64::new(1.5, 0.0);
        let (r_back, t_back) = backside_interface(n, 1.0003);

        let expected = ((1.5 - 1.0003) / (1.5 + 1.0003)) * ((1.5 - 1.0003) / (1.5 + 1.0003));
        assert_relative_eq!(r_back, expected, max_relative = 1e-12);
        assert_relative_eq!(r_back + t_back, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_backside_interface_ignores_extinction() {
        // The simplification uses Re(N) only, so k must not change R_b.
        let lossless = backside_interface(Complex64::new(2.0, 0.0), 1.0003);
        let lossy = backside_interface(Complex64::new(2.0, -0.5), 1.0003);
        assert_eq!(lossless.0, lossy.0);
    }

    #[test]
    fn test_absorption_exponent_real_index_is_zero() {
        let beta = absorption_exponent(550.0, Complex64::new(1.5, 0.0), 0.0, 1.0e6);
        assert_eq!(beta, 0.0);
    }

    #[test]
    fn test_absorption_exponent_attenuates_for_lossy_substrate() {
        // N = 1.5 - 0.01i at normal incidence: N_ss = N, so
        // beta = Im(2 pi d N / lambda) = -2 pi d k / lambda.
        let beta = absorption_exponent(550.0, Complex64::new(1.5, -0.01), 0.0, 1.0e6);
        let expected = -2.0 * std::f64::consts::PI * 1.0e6 * 0.01 / 550.0;
        assert_relative_eq!(beta, expected, max_relative = 1e-12);
        assert!(beta < 0.0);
    }

    #[test]
    fn test_oblique_incidence_scales_beta_by_cos_theta() {
        // sin2 = (N sin theta)^2 makes N_ss = N cos theta exactly, so the
        // oblique exponent is the normal-incidence one scaled by cos theta.
        let n = Complex64::new(1.5, -0.01);
        let sin_theta = 30.0_f64.to_radians().sin();
        let cos_theta = 30.0_f64.to_radians().cos();

        let normal = absorption_exponent(550.0, n, 0.0, 1.0e6);
        let oblique = absorption_exponent(550.0, n, sin_theta, 1.0e6);
        assert_relative_eq!(oblique, normal * cos_theta, max_relative = 1e-12);
    }

    #[test]
    fn test_branch_flip_selects_decaying_root() {
        // Purely imaginary N = -2i: N^2 = -4, and the principal sqrt lands
        // exactly on the imaginary axis (+2i, the growing root). The flip
        // must select -2i, giving a negative beta.
        let thickness = 1.0e6;
        let wavelength = 550.0;
        let beta = absorption_exponent(wavelength, Complex64::new(0.0, -2.0), 0.0, thickness);
        let expected = -2.0 * std::f64::consts::PI * thickness * 2.0 / wavelength;
        assert_relative_eq!(beta, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_absorbing_backside_passes_forward_reflectance_through() {
        // R_b = T_b = 0: no light returns from or crosses the back
        // interface, so R collapses to R_f and T to zero.
        let (r, t) = combine_with_backside(0.1, 0.8, 0.05, 0.85, 0.0, 0.0, -0.3);
        assert_eq!(r, 0.1);
        assert_eq!(t, 0.0);
    }
}
