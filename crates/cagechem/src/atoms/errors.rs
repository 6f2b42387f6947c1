use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use crate::{Isotope, MassNumber};

#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
pub enum AtomicLookupError {
    #[diagnostic(help("cage precursors are built from {known}"))]
    #[error("{symbol:?} isn't an element the atomic database knows about")]
    Element { symbol: String, known: String },

    #[diagnostic(help("the known isotopes of {name} have mass numbers {known}"))]
    #[error("there's no isotope of {name} with a mass number of {mass_number}")]
    Isotope {
        name: String,
        mass_number: MassNumber,
        known: String,
    },

    #[diagnostic(help("formulae can only be offset by protons (p) or electrons (e)"))]
    #[error("{symbol:?} isn't a particle the atomic database knows about")]
    Particle { symbol: String },
}

impl AtomicLookupError {
    pub(crate) fn element<'s>(symbol: &str, known: impl IntoIterator<Item = &'s str>) -> Self {
        Self::Element {
            symbol: symbol.to_owned(),
            known: known.into_iter().sorted_unstable().join(", "),
        }
    }

    pub(crate) fn isotope(name: &str, mass_number: MassNumber, isotopes: &[Isotope]) -> Self {
        Self::Isotope {
            name: name.to_owned(),
            mass_number,
            known: isotopes.iter().map(|i| i.mass_number).join(" and "),
        }
    }

    pub(crate) fn particle(symbol: &str) -> Self {
        Self::Particle {
            symbol: symbol.to_owned(),
        }
    }
}
