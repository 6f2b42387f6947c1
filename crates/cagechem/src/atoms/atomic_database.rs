// External Crate Imports
use ahash::HashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Local Crate Imports
use crate::{Charge, Isotope, MassNumber};

// NOTE: Only the elements that turn up in cage precursors, solvents, and adducts are tabulated here. Masses and
// natural abundances are taken from the 2021 AME and the IUPAC isotopic composition tables
const ELEMENTS: &[(&str, &str, &[Isotope])] = &[
    ("B", "Boron", &[
        isotope(10, dec!(10.01293695), dec!(0.199)),
        isotope(11, dec!(11.00930536), dec!(0.801)),
    ]),
    ("Br", "Bromine", &[
        isotope(79, dec!(78.9183376), dec!(0.5069)),
        isotope(81, dec!(80.9162897), dec!(0.4931)),
    ]),
    ("C", "Carbon", &[
        isotope(12, dec!(12), dec!(0.9893)),
        isotope(13, dec!(13.00335483507), dec!(0.0107)),
    ]),
    ("Cl", "Chlorine", &[
        isotope(35, dec!(34.968852682), dec!(0.7576)),
        isotope(37, dec!(36.965902602), dec!(0.2424)),
    ]),
    ("F", "Fluorine", &[isotope(19, dec!(18.99840316273), dec!(1))]),
    ("H", "Hydrogen", &[
        isotope(1, dec!(1.00782503223), dec!(0.999885)),
        isotope(2, dec!(2.01410177812), dec!(0.000115)),
    ]),
    ("I", "Iodine", &[isotope(127, dec!(126.9044719), dec!(1))]),
    ("K", "Potassium", &[
        isotope(39, dec!(38.9637064864), dec!(0.932581)),
        isotope(40, dec!(39.963998166), dec!(0.000117)),
        isotope(41, dec!(40.9618252579), dec!(0.067302)),
    ]),
    ("Li", "Lithium", &[
        isotope(6, dec!(6.0151228874), dec!(0.0759)),
        isotope(7, dec!(7.0160034366), dec!(0.9241)),
    ]),
    ("N", "Nitrogen", &[
        isotope(14, dec!(14.00307400443), dec!(0.99636)),
        isotope(15, dec!(15.00010889888), dec!(0.00364)),
    ]),
    ("Na", "Sodium", &[isotope(23, dec!(22.9897692820), dec!(1))]),
    ("O", "Oxygen", &[
        isotope(16, dec!(15.99491461957), dec!(0.99757)),
        isotope(17, dec!(16.99913175650), dec!(0.00038)),
        isotope(18, dec!(17.99915961286), dec!(0.00205)),
    ]),
    ("P", "Phosphorus", &[isotope(31, dec!(30.97376199842), dec!(1))]),
    ("S", "Sulfur", &[
        isotope(32, dec!(31.9720711744), dec!(0.9499)),
        isotope(33, dec!(32.9714589098), dec!(0.0075)),
        isotope(34, dec!(33.967867004), dec!(0.0425)),
        isotope(36, dec!(35.96708071), dec!(0.0001)),
    ]),
    ("Si", "Silicon", &[
        isotope(28, dec!(27.97692653465), dec!(0.92223)),
        isotope(29, dec!(28.97649466490), dec!(0.04685)),
        isotope(30, dec!(29.973770136), dec!(0.03092)),
    ]),
];

const PARTICLES: &[(&str, &str, Decimal, i64)] = &[
    ("e", "Electron", dec!(0.000548579909065), -1),
    ("p", "Proton", dec!(1.007276466621), 1),
];

// Public API ==========================================================================================================

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AtomicDatabase {
    pub(super) elements: HashMap<&'static str, ElementDescription>,
    pub(super) particles: HashMap<&'static str, ParticleDescription>,
}

impl Default for AtomicDatabase {
    fn default() -> Self {
        let elements = ELEMENTS
            .iter()
            .map(|&(symbol, name, isotopes)| (symbol, ElementDescription { name, isotopes }))
            .collect();
        let particles = PARTICLES
            .iter()
            .map(|&(symbol, name, mass, charge)| {
                let charge = Charge(charge);
                (symbol, ParticleDescription { name, mass, charge })
            })
            .collect();

        Self {
            elements,
            particles,
        }
    }
}

impl AtomicDatabase {
    #[must_use]
    pub fn element_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<_> = self.elements.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }
}

// Private Helper Types and Functions ==================================================================================

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) struct ElementDescription {
    pub(super) name: &'static str,
    pub(super) isotopes: &'static [Isotope],
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) struct ParticleDescription {
    pub(super) name: &'static str,
    pub(super) mass: Decimal,
    pub(super) charge: Charge,
}

const fn isotope(mass_number: u32, relative_mass: Decimal, abundance: Decimal) -> Isotope {
    Isotope {
        mass_number: MassNumber(mass_number),
        relative_mass,
        abundance,
    }
}

// Module Tests ========================================================================================================
