use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = NmrError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum NmrError {
    #[diagnostic(help("the spectrum is skipped, since its shifts can't be corrected without a reference"))]
    #[error("no peak was found within {tolerance} ppm of the {expected} ppm reference")]
    MissingReferencePeak { expected: f64, tolerance: f64 },

    #[error("failed to open the peak table at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[diagnostic(help(r#"peak tables are JSON arrays of objects like `{{"ppm": 9.98, "amplitude": 1.2e6}}`"#))]
    #[error("failed to read the peak table")]
    Json(#[from] serde_json::Error),
}
