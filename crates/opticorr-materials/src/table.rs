//! Parsed dispersion tables.
//!
//! A dispersion table file is whitespace/tab-delimited text: one header row
//! (skipped), then one `(wavelength, n, k)` triple per row. Some historical
//! tables were saved transposed (three long rows instead of three columns);
//! parsing rejects that orientation rather than guessing.

use num_complex::Complex64;

use crate::interp::interp;
use crate::provider::{MaterialError, SubstrateOptics};

/// An immutable tabulated $(\lambda, n, k)$ dispersion dataset.
///
/// The raw table is read once and never mutated; interpolation onto a
/// measurement grid derives a fresh array per call.
#[derive(Debug, Clone)]
pub struct DispersionTable {
    name: String,
    wavelengths: Vec<f64>,
    index_real: Vec<f64>,
    extinction: Vec<f64>,
}

impl DispersionTable {
    /// Build a table from pre-separated columns.
    ///
    /// # Errors
    /// [`MaterialError::Format`] if the columns are empty, have unequal
    /// lengths, or the wavelengths are not strictly increasing.
    pub fn from_columns(
        name: impl Into<String>,
        wavelengths: Vec<f64>,
        index_real: Vec<f64>,
        extinction: Vec<f64>,
    ) -> Result<Self, MaterialError> {
        if wavelengths.is_empty() {
            return Err(MaterialError::Format("table has no samples".into()));
        }
        if wavelengths.len() != index_real.len() || wavelengths.len() != extinction.len() {
            return Err(MaterialError::Format(format!(
                "column lengths differ: {} wavelengths, {} n values, {} k values",
                wavelengths.len(),
                index_real.len(),
                extinction.len()
            )));
        }
        for i in 1..wavelengths.len() {
            if wavelengths[i] <= wavelengths[i - 1] {
                return Err(MaterialError::Format(format!(
                    "wavelengths must be strictly increasing (sample {} is {} after {})",
                    i,
                    wavelengths[i],
                    wavelengths[i - 1]
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            wavelengths,
            index_real,
            extinction,
        })
    }

    /// Parse a dispersion table from file content.
    ///
    /// The first line is a header and is always skipped; blank lines are
    /// ignored. Every data row must hold exactly three numeric fields.
    ///
    /// # Errors
    /// [`MaterialError::Format`] on a ragged, transposed, non-numeric, or
    /// too-short table, or on non-monotonic wavelengths.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, MaterialError> {
        let mut lines = content.lines();
        if lines.next().is_none() {
            return Err(MaterialError::Format(
                "empty file; expected a header row followed by (wavelength, n, k) rows".into(),
            ));
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut width: Option<usize> = None;
        for (offset, raw_line) in lines.enumerate() {
            let line_number = offset + 2;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Result<Vec<f64>, MaterialError> = line
                .split_whitespace()
                .map(|field| {
                    field.parse::<f64>().map_err(|_| {
                        MaterialError::Format(format!(
                            "line {line_number}: non-numeric field '{field}'"
                        ))
                    })
                })
                .collect();
            let fields = fields?;

            match width {
                None => width = Some(fields.len()),
                Some(w) if w != fields.len() => {
                    return Err(MaterialError::Format(format!(
                        "line {line_number}: expected {w} columns, found {}",
                        fields.len()
                    )))
                }
                Some(_) => {}
            }
            rows.push(fields);
        }

        if rows.is_empty() {
            return Err(MaterialError::Format("table has no data rows".into()));
        }

        let width = rows[0].len();
        if width != 3 {
            if rows.len() <= 3 && width > 3 {
                return Err(MaterialError::Format(format!(
                    "table appears to be stored transposed ({} rows x {width} columns); \
                     expected one (wavelength, n, k) triple per row",
                    rows.len()
                )));
            }
            return Err(MaterialError::Format(format!(
                "expected 3 columns (wavelength, n, k), found {width}"
            )));
        }
        if rows.len() < 3 {
            return Err(MaterialError::Format(format!(
                "only {} data rows; at least 3 are required to distinguish the table \
                 orientation",
                rows.len()
            )));
        }

        let wavelengths = rows.iter().map(|r| r[0]).collect();
        let index_real = rows.iter().map(|r| r[1]).collect();
        let extinction = rows.iter().map(|r| r[2]).collect();
        Self::from_columns(name, wavelengths, index_real, extinction)
    }

    /// Number of raw samples in the table.
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

impl SubstrateOptics for DispersionTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        // Constructors guarantee at least one sample.
        (self.wavelengths[0], self.wavelengths[self.wavelengths.len() - 1])
    }

    fn refractive_index(&self, wavelengths: &[f64]) -> Result<Vec<Complex64>, MaterialError> {
        if wavelengths.is_empty() {
            return Err(MaterialError::InvalidGrid);
        }
        for i in 1..wavelengths.len() {
            if wavelengths[i] <= wavelengths[i - 1] {
                return Err(MaterialError::InvalidGrid);
            }
        }

        let n = interp(wavelengths, &self.wavelengths, &self.index_real);
        let k = interp(wavelengths, &self.wavelengths, &self.extinction);
        if n.len() != wavelengths.len() || k.len() != wavelengths.len() {
            return Err(MaterialError::InvariantViolation {
                context: "interpolation",
                expected: wavelengths.len(),
                actual: n.len().min(k.len()),
            });
        }

        Ok(n
            .into_iter()
            .zip(k)
            .map(|(n_i, k_i)| Complex64::new(n_i, -k_i))
            .collect())
    }
}
