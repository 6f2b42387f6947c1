use std::{io, path::PathBuf};

use cagechem::CageChemError;
use miette::Diagnostic;
use nmr::NmrError;
use sifter::SifterError;
use thiserror::Error;
use turbidity::TurbidityError;

pub type Result<T, E = CageyError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum CageyError {
    #[diagnostic(help("reactions are named like `AB-02-005_01_12`: an experiment, then plate and formulation numbers"))]
    #[error("couldn't identify a reaction from {name:?}")]
    ReactionKey { name: String },

    #[diagnostic(help("add the structure, along with its chemical formula, to the precursor file"))]
    #[error("no chemical formula is known for the structure {structure:?}")]
    UnknownStructure { structure: String },

    #[error("no precursors were recorded for the reaction {key}")]
    MissingPrecursors { key: String },

    #[error("no turbidity data was recorded for the reaction {key}")]
    MissingTurbidity { key: String },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[diagnostic(help("check the file is valid JSON, with kebab-case keys"))]
    #[error("failed to parse {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[diagnostic(help("fix the failed spectra and re-run every spectrum of the reaction together"))]
    #[error("{failed} of the mass spectra recorded for {key} couldn't be processed, so none of its results were saved")]
    IncompleteReaction { key: String, failed: usize },

    #[error("processing was cancelled before this input was started")]
    Cancelled,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Chemistry(#[from] Box<CageChemError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MassSpec(#[from] SifterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Turbidity(#[from] TurbidityError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Nmr(#[from] NmrError),

    #[error("failed to start the worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
