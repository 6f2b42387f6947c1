use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, AddAssign, Mul},
};

// External Crate Imports
use itertools::Itertools;
use rust_decimal::Decimal;

// Local Crate Imports
use crate::{
    AtomicDatabase, CageChemError, Charge, Charged, ChemicalFormula, Element, Massive, Particle, Result,
    parsers::{chemical_formula::chemical_formula, errors::FormulaErrorKind},
};

// Public API ==========================================================================================================

impl<'a> ChemicalFormula<'a> {
    /// Parses a formula like `C8H6O2`, `[13C]H4`, or `Na-e` using the elements and particles in `db`
    pub fn new(db: &'a AtomicDatabase, formula: impl AsRef<str>) -> Result<Self> {
        let input = formula.as_ref();
        let mut parser = chemical_formula(db);
        match parser(input) {
            Ok(("", formula)) => Ok(formula),
            Ok((rest, _)) => Err(Box::new(CageChemError::formula(
                input,
                input.len() - rest.len(),
                rest.len(),
                FormulaErrorKind::IncompleteParse,
            ))),
            Err(nom::Err::Error(failure) | nom::Err::Failure(failure)) => {
                let offset = input.len() - failure.input.len();
                Err(Box::new(CageChemError::formula(
                    input,
                    offset,
                    failure.len,
                    failure.kind,
                )))
            }
            // NOTE: None of the parsers used here are streaming, so they can never ask for more input
            Err(nom::Err::Incomplete(_)) => Err(Box::new(CageChemError::formula(
                input,
                input.len(),
                0,
                FormulaErrorKind::IncompleteParse,
            ))),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.particles.is_empty()
    }

    /// The number of atoms of an element (summed over all of its isotopes) in this formula
    #[must_use]
    pub fn atom_count(&self, symbol: &str) -> u32 {
        self.atoms
            .iter()
            .filter(|(element, _)| element.symbol() == symbol)
            .map(|(_, &count)| count)
            .sum()
    }

    /// Removes every atom and particle in `other` from this formula, failing if that would leave any element with
    /// a negative count
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        let mut difference = self.clone();
        for (element, &count) in &other.atoms {
            let remaining = difference
                .atoms
                .get(element)
                .and_then(|&present| present.checked_sub(count))
                .ok_or_else(|| {
                    Box::new(CageChemError::InsufficientAtoms {
                        minuend: self.to_string(),
                        subtrahend: other.to_string(),
                        symbol: element.to_string(),
                    })
                })?;
            difference.set_atoms(element.clone(), remaining);
        }

        for (particle, &count) in &other.particles {
            difference.add_particles(*particle, -count);
        }

        Ok(difference)
    }
}

// Arithmetic Trait Implementations ====================================================================================

impl<'a> AddAssign<&ChemicalFormula<'a>> for ChemicalFormula<'a> {
    fn add_assign(&mut self, rhs: &ChemicalFormula<'a>) {
        for (element, &count) in &rhs.atoms {
            self.add_atoms(element.clone(), count);
        }
        for (particle, &count) in &rhs.particles {
            self.add_particles(*particle, count);
        }
    }
}

impl<'a> Add for ChemicalFormula<'a> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl<'a> Add<&ChemicalFormula<'a>> for &ChemicalFormula<'a> {
    type Output = ChemicalFormula<'a>;

    fn add(self, rhs: &ChemicalFormula<'a>) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl<'a> Mul<u32> for &ChemicalFormula<'a> {
    type Output = ChemicalFormula<'a>;

    fn mul(self, rhs: u32) -> Self::Output {
        let mut product = ChemicalFormula::default();
        for (element, &count) in &self.atoms {
            product.add_atoms(element.clone(), count * rhs);
        }
        for (particle, &count) in &self.particles {
            product.add_particles(*particle, count * i64::from(rhs));
        }
        product
    }
}

// Massive and Charged Trait Implementations ===========================================================================

impl Massive for ChemicalFormula<'_> {
    fn monoisotopic_mass(&self) -> Decimal {
        self.mass(Element::monoisotopic_mass)
    }

    fn average_mass(&self) -> Decimal {
        self.mass(Element::average_mass)
    }
}

impl Charged for ChemicalFormula<'_> {
    fn charge(&self) -> Charge {
        self.particles
            .iter()
            .map(|(particle, &count)| Charge(count * particle.charge().0))
            .sum()
    }
}

// Display Trait Implementation ========================================================================================

impl Display for ChemicalFormula<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // NOTE: Elements are written in Hill order: carbon, then hydrogen, then everything else alphabetically. Without
        // any carbon, hydrogen is sorted alphabetically along with everything else
        let has_carbon = self.atom_count("C") > 0;
        let hill_rank = |element: &Element| match element.symbol() {
            "C" => 0,
            "H" if has_carbon => 1,
            _ => 2,
        };
        let hill_order = self
            .atoms
            .iter()
            .sorted_by_key(|&(element, _)| (hill_rank(element), element));
        for (element, &count) in hill_order {
            write!(f, "{element}")?;
            if count > 1 {
                write!(f, "{count}")?;
            }
        }

        for (index, (particle, &count)) in self.particles.iter().enumerate() {
            if !(index == 0 && self.atoms.is_empty() && count > 0) {
                write!(f, "{}", if count < 0 { '-' } else { '+' })?;
            }
            if count.abs() > 1 {
                write!(f, "{}", count.abs())?;
            }
            write!(f, "{particle}")?;
        }

        Ok(())
    }
}

// Private Helper Methods ==============================================================================================

impl<'a> ChemicalFormula<'a> {
    pub(crate) fn add_atoms(&mut self, element: Element<'a>, count: u32) {
        *self.atoms.entry(element).or_default() += count;
    }

    pub(crate) fn add_particles(&mut self, particle: Particle<'a>, count: i64) {
        let total = self.particles.get(&particle).copied().unwrap_or_default() + count;
        if total == 0 {
            self.particles.remove(&particle);
        } else {
            self.particles.insert(particle, total);
        }
    }

    fn set_atoms(&mut self, element: Element<'a>, count: u32) {
        if count == 0 {
            self.atoms.remove(&element);
        } else {
            self.atoms.insert(element, count);
        }
    }

    fn mass(&self, accessor: impl Fn(&Element<'a>) -> Decimal) -> Decimal {
        let element_masses = self
            .atoms
            .iter()
            .map(|(element, &count)| Decimal::from(count) * accessor(element));

        let particle_masses = self
            .particles
            .iter()
            .map(|(particle, &count)| Decimal::from(count) * particle.monoisotopic_mass());

        element_masses.chain(particle_masses).sum()
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use insta::assert_snapshot;
    use rust_decimal_macros::dec;

    use super::*;

    static DB: LazyLock<AtomicDatabase> = LazyLock::new(AtomicDatabase::default);

    fn formula(formula: &str) -> ChemicalFormula<'static> {
        ChemicalFormula::new(&DB, formula).unwrap()
    }

    #[test]
    fn formula_errors() {
        let error = |formula| *ChemicalFormula::new(&DB, formula).unwrap_err();
        // Looking up non-existant isotopes, elements, and particles
        assert!(matches!(
            error("NH2[100C]O4"),
            CageChemError::Formula {
                kind: FormulaErrorKind::Lookup(_),
                ..
            }
        ));
        assert!(matches!(
            error("C8Yh6O2"),
            CageChemError::Formula {
                kind: FormulaErrorKind::Lookup(_),
                ..
            }
        ));
        // Starting a formula without an element or isotope
        assert!(matches!(
            error("+H2O"),
            CageChemError::Formula {
                kind: FormulaErrorKind::ExpectedChemicalFormula,
                ..
            }
        ));
        // Counts can't be zero or start with zero
        assert!(matches!(
            error("C3H0N4"),
            CageChemError::Formula {
                kind: FormulaErrorKind::ExpectedNoLeadingZero,
                ..
            }
        ));
        assert!(matches!(
            error("C3H06N4"),
            CageChemError::Formula {
                kind: FormulaErrorKind::ExpectedNoLeadingZero,
                ..
            }
        ));
        // Trailing junk is reported rather than silently dropped
        assert!(matches!(
            error("H2O,4"),
            CageChemError::Formula {
                kind: FormulaErrorKind::IncompleteParse,
                ..
            }
        ));
    }

    #[test]
    fn error_spans() {
        let CageChemError::Formula { span, .. } = *ChemicalFormula::new(&DB, "C8Yh6O2").unwrap_err() else {
            panic!("expected a formula parsing error");
        };
        assert_eq!((span.offset(), span.len()), (2, 2));

        let CageChemError::Formula { span, .. } = *ChemicalFormula::new(&DB, "H2O,4").unwrap_err() else {
            panic!("expected a formula parsing error");
        };
        assert_eq!((span.offset(), span.len()), (3, 2));
    }

    #[test]
    fn formula_display() {
        let formulae = [
            "2p",
            "C8H6O2",
            "C37H63N7O21+p",
            "C6H15N3",
            "Cl2O7+2e",
            "H2O",
            "H3-3e",
            "K-e",
            "Na2-2e",
            "[13C]6H6",
            "CH3[2H]",
            "p",
        ];
        for formula in formulae {
            assert_eq!(ChemicalFormula::new(&DB, formula).unwrap().to_string(), formula);
        }
        // Hill ordering is applied regardless of the order atoms are written in
        assert_eq!(formula("O2H6C8").to_string(), "C8H6O2");
        assert_eq!(formula("OH2").to_string(), "H2O");
        assert_eq!(formula("ClH").to_string(), "ClH");
        assert_eq!(formula("NH4-e").to_string(), "H4N-e");
        // Repeated elements are merged
        assert_eq!(formula("CH3CH2OH").to_string(), "C2H6O");
    }

    #[test]
    fn formula_monoisotopic_mass() {
        // The masses here have been checked against https://mstools.epfl.ch/info/
        assert_eq!(formula("H2O").monoisotopic_mass(), dec!(18.01056468403));
        assert_eq!(formula("C8H6O2").monoisotopic_mass(), dec!(134.03677943252));
        assert_eq!(formula("C6H15N3").monoisotopic_mass(), dec!(129.12659749674));
        assert_eq!(formula("[13C]6H6").monoisotopic_mass(), dec!(84.06707920380));

        // A proton adduct is a hydrogen atom without its electron
        assert_eq!(formula("H-e").monoisotopic_mass(), dec!(1.007276452320935));
        assert_eq!(formula("Na-e").monoisotopic_mass(), dec!(22.989220702090935));
    }

    #[test]
    fn formula_average_mass() {
        assert_eq!(formula("H2O").average_mass(), dec!(18.01528643242983260));
        assert_eq!(formula("p").average_mass(), dec!(1.007276466621));
    }

    #[test]
    fn formula_charges() {
        assert_eq!(formula("C8H6O2").charge(), Charge(0));
        assert_eq!(formula("H-e").charge(), Charge(1));
        assert_eq!(formula("Na3-3e").charge(), Charge(3));
        assert_eq!(formula("Cl2O7+2e").charge(), Charge(-2));
        assert_eq!(formula("2p").charge(), Charge(2));
    }

    #[test]
    fn formula_arithmetic() {
        let aldehyde = formula("C8H6O2");
        let amine = formula("C6H15N3");
        let water = formula("H2O");

        // Sums and multiples keep every atom
        let sum = &aldehyde + &amine;
        assert_eq!(sum.to_string(), "C14H21N3O2");
        assert_eq!(sum.monoisotopic_mass(), aldehyde.monoisotopic_mass() + amine.monoisotopic_mass());
        assert_eq!((&aldehyde * 3).to_string(), "C24H18O6");
        assert_eq!((&aldehyde * 3).atom_count("O"), 6);

        // Subtraction removes atoms, dropping any that reach zero
        let condensed = (&aldehyde * 3 + &amine * 2).checked_sub(&(&water * 6)).unwrap();
        assert_eq!(condensed.to_string(), "C36H36N6");
        let dehydrated = water.checked_sub(&formula("OH")).unwrap();
        assert_eq!(dehydrated.to_string(), "H");

        // Particles are tracked with their sign and cancel out
        let ion = formula("Na-e") + formula("H-e");
        assert_eq!(ion.to_string(), "HNa-2e");
        assert_eq!(ion.charge(), Charge(2));
        let neutral = ion.checked_sub(&formula("Na-e")).unwrap().checked_sub(&formula("H-e")).unwrap();
        assert!(neutral.is_empty());
    }

    #[test]
    fn insufficient_atoms() {
        let error = formula("C8H6O2").checked_sub(&formula("N2")).unwrap_err();
        assert_snapshot!(error, @"cannot remove N2 from C8H6O2, as that would leave a negative number of N atoms");
        let error = formula("H2O").checked_sub(&(&formula("H2O") * 2)).unwrap_err();
        assert!(matches!(*error, CageChemError::InsufficientAtoms { .. }));
    }
}
