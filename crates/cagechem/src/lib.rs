//! Exact masses for imine cages, their precursors, and the ions they form

pub mod adducts;
pub mod atoms;
pub mod cage;
pub mod errors;
pub mod parsers;

// Standard Library Imports
use std::collections::BTreeMap;

// External Crate Imports
use derive_more::{Add, AddAssign, Display, From, Into, Neg, Sum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Local Crate Imports
pub use adducts::{ADDUCTS, Adduct};
pub use atoms::atomic_database::AtomicDatabase;
pub use errors::{CageChemError, Result};

// NOTE: For the types in this module, 'a lifetimes indicate references to the `AtomicDatabase`
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ChemicalFormula<'a> {
    atoms: BTreeMap<Element<'a>, u32>,
    // NOTE: Particle counts are signed, since adducts like `Na-e` remove electrons rather than adding them
    particles: BTreeMap<Particle<'a>, i64>,
}

/// A precursor molecule taking part in cage assembly, along with how many copies of it the cage contains and how
/// many amine or aldehyde groups each copy brings to the condensation
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BuildingBlock<M> {
    molecule: M,
    count: u32,
    functional_groups: u32,
}

/// A neutral imine cage assembled from a ditopic and a tritopic building block, losing one water per imine bond formed
#[derive(Clone, Debug)]
pub struct Cage<'a, M> {
    di: BuildingBlock<M>,
    tri: BuildingBlock<M>,
    water: ChemicalFormula<'a>,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Element<'a> {
    symbol: &'a str,
    name: &'a str,
    mass_number: Option<MassNumber>,
    isotopes: &'a [Isotope],
}

#[derive(Copy, Clone, Debug)]
pub struct Particle<'a> {
    symbol: &'a str,
    name: &'a str,
    mass: Decimal,
    charge: Charge,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into)]
pub struct MassNumber(u32);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Isotope {
    mass_number: MassNumber,
    relative_mass: Decimal,
    abundance: Decimal,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OffsetKind {
    Add,
    Remove,
}

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Default,
    Display,
    From,
    Into,
    Add,
    AddAssign,
    Neg,
    Sum,
    Serialize,
    Deserialize,
)]
pub struct Charge(i64);

// =====================================================================================================================

pub trait Massive {
    fn monoisotopic_mass(&self) -> Decimal;
    fn average_mass(&self) -> Decimal;
}

pub trait Charged {
    fn charge(&self) -> Charge;
}

// Blanket impls

macro_rules! massive_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Massive + ?Sized> Massive for $ref_type {
                fn monoisotopic_mass(&self) -> Decimal {
                    (**self).monoisotopic_mass()
                }

                fn average_mass(&self) -> Decimal {
                    (**self).average_mass()
                }
            }
        )+
    };
}

massive_ref_impls!(&T, &mut T, Box<T>);

macro_rules! charged_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Charged + ?Sized> Charged for $ref_type {
                fn charge(&self) -> Charge {
                    (**self).charge()
                }
            }
        )+
    };
}

charged_ref_impls!(&T, &mut T, Box<T>);
