//! The charge carriers a cage can pick up in electrospray mass spectrometry

use std::fmt::{self, Display, Formatter};

use crate::{AtomicDatabase, ChemicalFormula, Result};

// NOTE: Every adduct is written as the ion it forms: each cation donates one positive charge, so metal adducts are
// written as metals stripped of an electron, and a bare `H` adduct is just a proton
pub const ADDUCTS: [Adduct; 10] = [
    Adduct::new("H", "H-e"),
    Adduct::new("H2", "H2-2e"),
    Adduct::new("H3", "H3-3e"),
    Adduct::new("K", "K-e"),
    Adduct::new("K2", "K2-2e"),
    Adduct::new("K3", "K3-3e"),
    Adduct::new("Na", "Na-e"),
    Adduct::new("Na2", "Na2-2e"),
    Adduct::new("Na3", "Na3-3e"),
    Adduct::new("NH4", "NH4-e"),
];

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Adduct {
    name: &'static str,
    formula: &'static str,
}

impl Adduct {
    const fn new(name: &'static str, formula: &'static str) -> Self {
        Self { name, formula }
    }

    /// Finds one of the known [`ADDUCTS`] by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ADDUCTS.into_iter().find(|adduct| adduct.name == name)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn formula<'a>(&self, db: &'a AtomicDatabase) -> Result<ChemicalFormula<'a>> {
        ChemicalFormula::new(db, self.formula)
    }
}

impl Display for Adduct {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
