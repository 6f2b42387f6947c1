// Standard Library Imports
use std::{path::Path, str::FromStr};

// Local Crate Imports
use crate::{CageyError, ReactionKey, Result};

// Public API ==========================================================================================================

impl ReactionKey {
    pub fn new(experiment: impl Into<String>, plate: u32, formulation_number: u32) -> Self {
        Self {
            experiment: experiment.into(),
            plate,
            formulation_number,
        }
    }

    /// Reads the key from a file name, ignoring its extension: `data/AB-02-005_01_12.csv` is the reaction
    /// `AB-02-005_01_12`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| CageyError::ReactionKey {
            name: path.display().to_string(),
        })?;
        stem.parse()
    }

    /// Reads the key from the name of the directory holding `path`, for instruments that write a fixed file name
    /// into a directory per reaction
    pub fn from_parent_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parent = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str())
            .ok_or_else(|| CageyError::ReactionKey {
                name: path.display().to_string(),
            })?;
        parent.parse()
    }
}

impl FromStr for ReactionKey {
    type Err = CageyError;

    fn from_str(name: &str) -> Result<Self> {
        let invalid = || CageyError::ReactionKey {
            name: name.to_owned(),
        };

        let mut parts = name.split('_');
        let (Some(experiment), Some(plate), Some(formulation_number), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if experiment.is_empty() {
            return Err(invalid());
        }

        let plate = plate.parse().map_err(|_| invalid())?;
        let formulation_number = formulation_number.parse().map_err(|_| invalid())?;
        Ok(Self::new(experiment, plate, formulation_number))
    }
}

// Module Tests ========================================================================================================
