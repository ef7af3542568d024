//! Directory-backed dispersion table store.
//!
//! Tables live as text files named `<substrate>_nk.txt` under a database
//! directory; the substrate name is the lookup key.

use std::path::{Path, PathBuf};

use num_complex::Complex64;

use crate::provider::{MaterialError, SubstrateOptics};
use crate::table::DispersionTable;

const DISPERSION_SUFFIX: &str = "_nk";
const EXTENSION: &str = "txt";

/// Lookup of dispersion tables by substrate name.
#[derive(Debug, Clone)]
pub struct MaterialStore {
    root: PathBuf,
}

impl MaterialStore {
    /// Open a store rooted at a database directory.
    ///
    /// The directory is not touched until a table is requested.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The database directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a substrate name resolves to.
    pub fn table_path(&self, substrate: &str) -> PathBuf {
        self.root
            .join(format!("{substrate}{DISPERSION_SUFFIX}.{EXTENSION}"))
    }

    /// Load and parse the dispersion table for `substrate`.
    ///
    /// # Errors
    /// [`MaterialError::NotFound`] if no table file exists for the name;
    /// [`MaterialError::Format`] if the file content is malformed.
    pub fn load(&self, substrate: &str) -> Result<DispersionTable, MaterialError> {
        let path = self.table_path(substrate);
        if !path.exists() {
            return Err(MaterialError::NotFound(substrate.to_string()));
        }
        log::debug!("loading dispersion table {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        DispersionTable::parse(substrate, &content)
    }

    /// Load `substrate` and interpolate its index onto `wavelengths`.
    pub fn refractive_index(
        &self,
        substrate: &str,
        wavelengths: &[f64],
    ) -> Result<Vec<Complex64>, MaterialError> {
        self.load(substrate)?.refractive_index(wavelengths)
    }

    /// Substrate names with a table file in the database directory, sorted.
    pub fn available(&self) -> Result<Vec<String>, MaterialError> {
        let suffix = format!("{DISPERSION_SUFFIX}.{EXTENSION}");
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|s| s.strip_suffix(&suffix))
                .filter(|s| !s.is_empty())
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
