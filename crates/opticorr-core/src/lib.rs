//! # opticorr Core
//!
//! Post-processing of reflection/transmission spectra from an external
//! electromagnetic field solver. The solver computes R and T on a thin,
//! idealized sample whose substrate is truncated; this crate corrects those
//! spectra for the real substrate's second (back) interface and bulk
//! absorption.
//!
//! ## Modules
//!
//! - [`types`] — Spectral data containers and correction parameters.
//! - [`backside`] — The backside-correction engine (Fresnel reflectance,
//!   absorption exponent, multiple-reflection summation).
//! - [`source`] — Enumerated interface to the external solver session.
//! - [`spectral`] — Frequency/wavelength conversion and grid helpers.
//! - [`units`] — Explicit unit scaling for geometric and spectral values.

pub mod backside;
pub mod source;
pub mod spectral;
pub mod types;
pub mod units;
