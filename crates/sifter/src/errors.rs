use std::{io, path::PathBuf};

use cagechem::CageChemError;
use miette::Diagnostic;
use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T, E = SifterError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum SifterError {
    #[error("failed to open the peak list at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[diagnostic(help("peak lists need a header row with (at least) `mz` and `height` columns"))]
    #[error("failed to read the peak list")]
    Table(#[from] PolarsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Chemistry(#[from] Box<CageChemError>),
}
