//! Aligns picked ¹H NMR peaks to the chloroform reference, then pulls out the aldehyde and imine signals

mod errors;
mod peak_table;
mod settings;
mod spectrum;

// Standard Library Imports
use std::path::Path;

// External Crate Imports
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

// Local Crate Imports
pub use errors::{NmrError, Result};
pub use peak_table::PeakTable;
pub use spectrum::reference_offset;

// Public API ==========================================================================================================

#[derive(Copy, Clone, PartialEq, Debug, Constructor, Serialize, Deserialize)]
pub struct NmrPeak {
    pub ppm: f64,
    pub amplitude: f64,
}

/// Chemical shifts between `min` and `max`, excluding both ends
#[derive(Copy, Clone, PartialEq, Debug, Constructor, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PpmRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NmrSettings {
    /// Where the residual solvent peak turns up before any correction
    pub reference_ppm: f64,
    pub reference_tolerance: f64,
    /// Where the residual solvent peak should be once corrected
    pub target_ppm: f64,
    pub solvent_peaks: Vec<f64>,
    pub solvent_tolerance: f64,
    pub aldehyde_range: PpmRange,
    pub imine_range: PpmRange,
}

/// The aldehyde and imine peaks of one reaction, after reference correction
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct NmrSpectrum {
    pub aldehyde_peaks: Vec<NmrPeak>,
    pub imine_peaks: Vec<NmrPeak>,
}

/// Turns a recorded spectrum into a list of peaks
pub trait PeakPicker {
    fn pick_peaks(&self, spectrum: &Path) -> Result<Vec<NmrPeak>>;
}
