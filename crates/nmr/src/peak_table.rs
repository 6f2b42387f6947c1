// Standard Library Imports
use std::{fs, path::Path};

// Local Crate Imports
use crate::{NmrError, NmrPeak, PeakPicker, Result};

// Public API ==========================================================================================================

/// Reads peaks that were already picked elsewhere, stored as a JSON array of `{"ppm", "amplitude"}` objects
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct PeakTable;

impl PeakTable {
    pub fn parse(json: &str) -> Result<Vec<NmrPeak>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PeakPicker for PeakTable {
    fn pick_peaks(&self, spectrum: &Path) -> Result<Vec<NmrPeak>> {
        let json = fs::read_to_string(spectrum).map_err(|source| NmrError::Io {
            path: spectrum.to_owned(),
            source,
        })?;
        Self::parse(&json)
    }
}

// Module Tests ========================================================================================================
