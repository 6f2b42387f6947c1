//! Sifts imine cage ions out of centroided mass spectra, then decides which cage topologies those ions support

mod candidates;
mod errors;
mod mass_spectrum_peak;
mod matcher;
mod peak_list;
mod settings;
pub mod topology;

// External Crate Imports
use cagechem::{Adduct, ChemicalFormula, Cage};
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

// Local Crate Imports
pub use candidates::{CHARGES, STOICHIOMETRIES, enumerate_candidates, is_compatible};
pub use errors::{Result, SifterError};
pub use topology::{assign_topologies, is_assignable};

// Public API ==========================================================================================================

/// Every aldehyde building block is ditopic, and every amine building block is tritopic
pub const DI_FUNCTIONAL_GROUPS: u32 = 2;
pub const TRI_FUNCTIONAL_GROUPS: u32 = 3;

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Constructor, Serialize, Deserialize)]
pub struct ObservedPeak {
    pub mz: f64,
    pub height: f64,
}

/// Observed peaks above the noise floor, kept sorted by m/z
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PeakList(Vec<ObservedPeak>);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[display("{tri_count}+{di_count}")]
pub struct Stoichiometry {
    pub tri_count: u32,
    pub di_count: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, Constructor)]
#[display("[{stoichiometry}] {adduct} {charge}+")]
pub struct CandidateAssembly {
    pub adduct: Adduct,
    pub charge: u32,
    pub stoichiometry: Stoichiometry,
}

/// A cage ion found in a spectrum; `separation_mz` is only missing for low-confidence matches
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MassSpectrumPeak {
    pub di_count: u32,
    pub tri_count: u32,
    pub adduct: String,
    pub charge: u32,
    pub calculated_mz: f64,
    pub spectrum_mz: f64,
    pub separation_mz: Option<f64>,
    pub intensity: f64,
}

/// A 1-based index into the peaks found for a single reaction
pub type PeakId = usize;

#[derive(Clone, Eq, PartialEq, Hash, Debug, Constructor, Serialize, Deserialize)]
pub struct TopologyAssignment {
    pub peak_id: PeakId,
    pub topology: String,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MatchSettings {
    pub calculated_peak_tolerance: f64,
    pub separation_peak_tolerance: f64,
    pub max_ppm_error: f64,
    pub max_separation: f64,
    pub min_peak_height: f64,
    pub max_between_peak_height: f64,
    pub require_separation_peak: bool,
}

/// Matches every candidate assembly of one pair of building blocks against observed spectra
#[derive(Clone, Debug)]
pub struct CageMatcher<'a> {
    cages: Vec<(Stoichiometry, Cage<'a, ChemicalFormula<'a>>)>,
    adducts: Vec<(Adduct, ChemicalFormula<'a>)>,
    proton_mass: f64,
    settings: MatchSettings,
}
