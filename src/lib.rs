//! Screens imine cage reactions: matches cage ions in mass spectra, classifies dissolution from turbidity runs, and
//! extracts the aldehyde and imine signals from ¹H NMR spectra

pub mod config;
mod errors;
mod pipeline;
mod precursors;
mod reaction;
mod resolver;
mod store;

// Standard Library Imports
use std::{path::PathBuf, sync::Arc, sync::atomic::AtomicBool};

// External Crate Imports
use cagechem::AtomicDatabase;
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

// Local Crate Imports
pub use config::Settings;
pub use errors::{CageyError, Result};
pub use precursors::PrecursorFile;
pub use resolver::{FormulaResolver, FormulaTable};
pub use store::{MemoryStore, ReactionStore};

// Public API ==========================================================================================================

/// Identifies a single reaction, written `experiment_plate_formulation` (like `AB-02-005_01_12`)
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[display("{experiment}_{plate:02}_{formulation_number:02}")]
pub struct ReactionKey {
    pub experiment: String,
    pub plate: u32,
    pub formulation_number: u32,
}

/// The structures of the two building blocks mixed in a reaction
#[derive(Clone, Eq, PartialEq, Hash, Debug, Constructor, Serialize, Deserialize)]
pub struct Precursors {
    pub di: String,
    pub tri: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Constructor)]
pub struct MassSpecJob {
    pub key: ReactionKey,
    pub peak_list: PathBuf,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Constructor)]
pub struct NmrJob {
    pub key: ReactionKey,
    pub spectrum: PathBuf,
}

/// Everything found across one reaction's mass spectra
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct MassSpecResult {
    pub peaks: Vec<sifter::MassSpectrumPeak>,
    pub topologies: Vec<sifter::TopologyAssignment>,
}

/// An input that couldn't be processed, and why
#[derive(Debug)]
pub struct Failure {
    pub input: String,
    pub error: CageyError,
}

#[derive(Debug)]
pub struct BatchReport<T> {
    pub successes: Vec<(ReactionKey, T)>,
    pub failures: Vec<Failure>,
}

/// Runs each analysis over many reactions at once, writing the results back in one batch
#[derive(Debug)]
pub struct Pipeline {
    db: AtomicDatabase,
    settings: Settings,
    cancelled: Arc<AtomicBool>,
}
