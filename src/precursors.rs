// Standard Library Imports
use std::{collections::BTreeMap, path::Path};

// External Crate Imports
use serde::{Deserialize, Serialize};

// Local Crate Imports
use crate::{FormulaTable, MemoryStore, Precursors, ReactionKey, Result, config::read_json};

// Public API ==========================================================================================================

/// The building blocks used in each reaction, along with the formula of every building block structure:
///
/// ```json
/// {
///   "formulae": { "O=Cc1cccc(C=O)c1": "C8H6O2", "NCCN(CCN)CCN": "C6H18N4" },
///   "reactions": { "AB-02-005_01_12": { "di": "O=Cc1cccc(C=O)c1", "tri": "NCCN(CCN)CCN" } }
/// }
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrecursorFile {
    pub formulae: BTreeMap<String, String>,
    pub reactions: BTreeMap<String, Precursors>,
}

impl PrecursorFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path)
    }

    /// Splits the file into a formula table and a store holding the precursors of every reaction
    pub fn into_parts(self) -> Result<(FormulaTable, MemoryStore)> {
        let mut store = MemoryStore::new();
        for (name, precursors) in self.reactions {
            store.insert_precursors(name.parse::<ReactionKey>()?, precursors);
        }
        Ok((self.formulae.into_iter().collect(), store))
    }
}

// Module Tests ========================================================================================================
