//! Embedded dispersion data for SCHOTT B270 crown glass.
//!
//! B270 is the workhorse soda-lime crown glass used as a coating substrate
//! (n ≈ 1.52 in the visible, nearly lossless between the UV edge and the
//! near-IR water bands). Shipping this one table embedded means the
//! correction pipeline works out of the box without a database directory.

use crate::table::DispersionTable;

/// SCHOTT B270 crown glass, 300–2500 nm.
///
/// Tabulated from the manufacturer transmittance curve; $k$ rises at the
/// UV absorption edge below ~350 nm and again towards the IR hydroxyl
/// bands.
pub fn b270() -> DispersionTable {
    // (lambda/nm, n, k)
    let data: &[(f64, f64, f64)] = &[
        (300.0, 1.5586, 4.2e-6),
        (320.0, 1.5516, 1.6e-6),
        (350.0, 1.5442, 5.1e-7),
        (380.0, 1.5389, 2.3e-7),
        (400.0, 1.5361, 1.5e-7),
        (450.0, 1.5308, 9.0e-8),
        (500.0, 1.5270, 7.2e-8),
        (550.0, 1.5241, 6.5e-8),
        (600.0, 1.5219, 6.1e-8),
        (650.0, 1.5201, 6.0e-8),
        (700.0, 1.5186, 6.2e-8),
        (800.0, 1.5163, 6.9e-8),
        (900.0, 1.5145, 8.0e-8),
        (1000.0, 1.5130, 9.6e-8),
        (1200.0, 1.5106, 1.5e-7),
        (1400.0, 1.5085, 3.1e-7),
        (1600.0, 1.5064, 6.4e-7),
        (1800.0, 1.5043, 1.2e-6),
        (2000.0, 1.5021, 2.4e-6),
        (2200.0, 1.4997, 5.3e-6),
        (2400.0, 1.4971, 1.1e-5),
        (2500.0, 1.4957, 1.6e-5),
    ];

    let wavelengths: Vec<f64> = data.iter().map(|&(lam, _, _)| lam).collect();
    let index_real: Vec<f64> = data.iter().map(|&(_, n, _)| n).collect();
    let extinction: Vec<f64> = data.iter().map(|&(_, _, k)| k).collect();

    DispersionTable::from_columns("B270", wavelengths, index_real, extinction)
        .expect("embedded B270 table is valid")
}
