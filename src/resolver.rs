// External Crate Imports
use ahash::HashMap;
use cagechem::{AtomicDatabase, ChemicalFormula};

// Local Crate Imports
use crate::{CageyError, Result};

// Public API ==========================================================================================================

/// Works out the chemical formula of a molecular structure
pub trait FormulaResolver {
    fn resolve<'a>(&self, db: &'a AtomicDatabase, structure: &str) -> Result<ChemicalFormula<'a>>;
}

/// Resolves structures from a table of already known formulae
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct FormulaTable(HashMap<String, String>);

impl FormulaTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, structure: impl Into<String>, formula: impl Into<String>) {
        self.0.insert(structure.into(), formula.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>, F: Into<String>> FromIterator<(S, F)> for FormulaTable {
    fn from_iter<T: IntoIterator<Item = (S, F)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(s, f)| (s.into(), f.into())).collect())
    }
}

impl FormulaResolver for FormulaTable {
    fn resolve<'a>(&self, db: &'a AtomicDatabase, structure: &str) -> Result<ChemicalFormula<'a>> {
        let formula = self.0.get(structure).ok_or_else(|| CageyError::UnknownStructure {
            structure: structure.to_owned(),
        })?;
        Ok(ChemicalFormula::new(db, formula)?)
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    static DB: LazyLock<AtomicDatabase> = LazyLock::new(AtomicDatabase::default);

    const IPA: &str = "O=Cc1cccc(C=O)c1";

    #[test]
    fn resolve_known_structures() {
        let table: FormulaTable = [(IPA, "C8H6O2")].into_iter().collect();
        assert_eq!(table.len(), 1);
        let formula = table.resolve(&DB, IPA).unwrap();
        assert_eq!(formula.to_string(), "C8H6O2");
    }

    #[test]
    fn unknown_structures() {
        let table = FormulaTable::new();
        assert!(table.is_empty());
        assert!(matches!(
            table.resolve(&DB, IPA),
            Err(CageyError::UnknownStructure { structure }) if structure == IPA
        ));
    }

    #[test]
    fn malformed_formulae() {
        let mut table = FormulaTable::new();
        table.insert(IPA, "C8H6Q2");
        assert!(matches!(table.resolve(&DB, IPA), Err(CageyError::Chemistry(_))));
    }
}
