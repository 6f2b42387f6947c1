//! Tolerances and thresholds for every analysis, loaded from a JSON file
//!
//! Any section (or key) left out of the file takes its default value, so an empty object is a valid configuration:
//!
//! ```json
//! {
//!   "mass-spec": { "max-ppm-error": 5.0, "require-separation-peak": false },
//!   "turbidity": { "dissolved-margin": 1.0 },
//!   "nmr": { "solvent-peaks": [7.26] }
//! }
//! ```

// Standard Library Imports
use std::{fs, path::Path};

// External Crate Imports
use nmr::NmrSettings;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sifter::MatchSettings;
use turbidity::ClassifierSettings;

// Local Crate Imports
use crate::{CageyError, Result};

// Public API ==========================================================================================================

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub mass_spec: MatchSettings,
    pub turbidity: ClassifierSettings,
    pub nmr: NmrSettings,
}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path)
    }
}

// Private Helper Methods ==============================================================================================

pub(crate) fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| CageyError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CageyError::Json {
        path: path.to_owned(),
        source,
    })
}

// Module Tests ========================================================================================================
