//! Substrate optics provider trait.
//!
//! All dispersion-data sources implement [`SubstrateOptics`], which returns
//! the complex refractive index on a caller-supplied wavelength grid.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from substrate optics providers.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("No dispersion table for substrate '{0}'")]
    NotFound(String),

    #[error("Malformed dispersion table: {0}")]
    Format(String),

    #[error("Wavelength grid must be non-empty and strictly increasing")]
    InvalidGrid,

    #[error("Internal length mismatch: {context} produced {actual} values for {expected} wavelengths")]
    InvariantViolation {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read dispersion table: {0}")]
    Io(#[from] std::io::Error),
}

/// Provides the complex refractive index of a substrate material.
///
/// Implementations hold an immutable raw table; interpolation onto the
/// caller's grid derives a new array and never mutates the stored data, so
/// repeated calls with different grids are independent.
pub trait SubstrateOptics: Send + Sync {
    /// Human-readable substrate name.
    fn name(&self) -> &str;

    /// Wavelength range covered by the raw table, in the table's unit.
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex refractive index $N(\lambda) = n(\lambda) - i\,k(\lambda)$
    /// at each point of `wavelengths`.
    ///
    /// The output has exactly `wavelengths.len()` elements, in grid order.
    /// Points outside the table's range clamp to the edge values.
    ///
    /// # Errors
    /// [`MaterialError::InvalidGrid`] if `wavelengths` is empty or not
    /// strictly increasing.
    fn refractive_index(&self, wavelengths: &[f64]) -> Result<Vec<Complex64>, MaterialError>;
}
