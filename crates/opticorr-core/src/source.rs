//! Enumerated interface to the external field-solver session.
//!
//! The solver is a closed, out-of-process collaborator. Rather than
//! forwarding arbitrary named operations to its handle, this trait exposes
//! exactly the measurements the correction pipeline consumes: a monitor's
//! frequency grid and its transmitted-power spectrum. Anything else the
//! solver can do stays behind the session layer that owns the process.

use thiserror::Error;

use crate::spectral::freq_to_wavelength;
use crate::units::UnitScale;

/// Errors from a solver measurement source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No monitor named '{0}' in the current session")]
    MonitorNotFound(String),

    #[error("Solver backend error: {0}")]
    Backend(String),
}

/// Read access to the measurements of a completed solver run.
///
/// Implementations wrap a live solver session or replay recorded data;
/// the correction pipeline only ever sees this surface.
pub trait MonitorSource: Send + Sync {
    /// Frequency samples (Hz) of a frequency-domain power monitor.
    fn frequency_grid(&self, monitor_name: &str) -> Result<Vec<f64>, SourceError>;

    /// Transmitted power through a monitor, normalised to the source power
    /// and aligned to that monitor's frequency grid. Negative values
    /// indicate power flowing against the monitor's orientation.
    fn transmitted_power(&self, monitor_name: &str) -> Result<Vec<f64>, SourceError>;

    /// Wavelengths of a monitor's frequency samples, expressed in `units`.
    ///
    /// Samples keep the monitor's native frequency order.
    fn wavelength_grid(
        &self,
        monitor_name: &str,
        units: UnitScale,
    ) -> Result<Vec<f64>, SourceError> {
        let frequencies = self.frequency_grid(monitor_name)?;
        Ok(freq_to_wavelength(&frequencies)
            .into_iter()
            .map(|w| units.from_base(w))
            .collect())
    }
}
