//! # opticorr Materials
//!
//! Substrate optical-constant providers for the opticorr workspace. A
//! provider turns a substrate identifier and a wavelength grid into the
//! complex refractive index $N(\lambda) = n(\lambda) - i\,k(\lambda)$ the
//! correction engine needs, by loading a tabulated $(\lambda, n, k)$
//! dispersion table and linearly interpolating it onto the requested grid.
//!
//! ## Modules
//!
//! - [`provider`] — The [`SubstrateOptics`](provider::SubstrateOptics)
//!   trait and error taxonomy.
//! - [`table`] — Parsed, immutable dispersion tables.
//! - [`store`] — Directory-backed table lookup by substrate name.
//! - [`interp`] — Clamped linear interpolation.
//! - [`b270`] — Embedded reference data for SCHOTT B270 crown glass.

pub mod b270;
pub mod interp;
pub mod provider;
pub mod store;
pub mod table;
