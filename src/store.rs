// External Crate Imports
use ahash::HashMap;
use nmr::NmrSpectrum;
use sifter::{MassSpectrumPeak, TopologyAssignment};
use turbidity::{DissolutionState, TurbidityRecord};

// Local Crate Imports
use crate::{CageyError, Precursors, ReactionKey, Result};

// Public API ==========================================================================================================

/// Where reaction inputs are read from, and where the results of processing them end up
pub trait ReactionStore {
    fn precursors(&self, key: &ReactionKey) -> Result<Precursors>;
    fn turbidity_record(&self, key: &ReactionKey) -> Result<TurbidityRecord>;

    /// Receives the peaks found across every spectrum of a reaction at once, numbered by their position in `peaks`
    fn write_mass_spectrum_peaks(&mut self, key: &ReactionKey, peaks: &[MassSpectrumPeak]) -> Result<()>;
    fn write_topology_assignments(&mut self, key: &ReactionKey, assignments: &[TopologyAssignment]) -> Result<()>;
    fn write_dissolution_state(&mut self, key: &ReactionKey, state: DissolutionState) -> Result<()>;
    fn write_nmr_spectrum(&mut self, key: &ReactionKey, spectrum: &NmrSpectrum) -> Result<()>;
}

/// A [`ReactionStore`] that keeps everything in memory
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MemoryStore {
    precursors: HashMap<ReactionKey, Precursors>,
    turbidity: HashMap<ReactionKey, TurbidityRecord>,
    mass_spectrum_peaks: HashMap<ReactionKey, Vec<MassSpectrumPeak>>,
    topology_assignments: HashMap<ReactionKey, Vec<TopologyAssignment>>,
    dissolution_states: HashMap<ReactionKey, DissolutionState>,
    nmr_spectra: HashMap<ReactionKey, NmrSpectrum>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_precursors(&mut self, key: ReactionKey, precursors: Precursors) {
        self.precursors.insert(key, precursors);
    }

    pub fn insert_turbidity_record(&mut self, key: ReactionKey, record: TurbidityRecord) {
        self.turbidity.insert(key, record);
    }

    #[must_use]
    pub fn mass_spectrum_peaks(&self, key: &ReactionKey) -> Option<&[MassSpectrumPeak]> {
        self.mass_spectrum_peaks.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn topology_assignments(&self, key: &ReactionKey) -> Option<&[TopologyAssignment]> {
        self.topology_assignments.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn dissolution_state(&self, key: &ReactionKey) -> Option<DissolutionState> {
        self.dissolution_states.get(key).copied()
    }

    #[must_use]
    pub fn nmr_spectrum(&self, key: &ReactionKey) -> Option<&NmrSpectrum> {
        self.nmr_spectra.get(key)
    }
}

impl ReactionStore for MemoryStore {
    fn precursors(&self, key: &ReactionKey) -> Result<Precursors> {
        self.precursors
            .get(key)
            .cloned()
            .ok_or_else(|| CageyError::MissingPrecursors { key: key.to_string() })
    }

    fn turbidity_record(&self, key: &ReactionKey) -> Result<TurbidityRecord> {
        self.turbidity
            .get(key)
            .cloned()
            .ok_or_else(|| CageyError::MissingTurbidity { key: key.to_string() })
    }

    // NOTE: Rewriting a reaction's results replaces them, so re-running a batch never duplicates anything
    fn write_mass_spectrum_peaks(&mut self, key: &ReactionKey, peaks: &[MassSpectrumPeak]) -> Result<()> {
        self.mass_spectrum_peaks.insert(key.clone(), peaks.to_vec());
        Ok(())
    }

    fn write_topology_assignments(&mut self, key: &ReactionKey, assignments: &[TopologyAssignment]) -> Result<()> {
        self.topology_assignments.insert(key.clone(), assignments.to_vec());
        Ok(())
    }

    fn write_dissolution_state(&mut self, key: &ReactionKey, state: DissolutionState) -> Result<()> {
        self.dissolution_states.insert(key.clone(), state);
        Ok(())
    }

    fn write_nmr_spectrum(&mut self, key: &ReactionKey, spectrum: &NmrSpectrum) -> Result<()> {
        self.nmr_spectra.insert(key.clone(), spectrum.clone());
        Ok(())
    }
}

// Module Tests ========================================================================================================
