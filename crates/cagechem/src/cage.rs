//! Imine condensation: `di × count + tri × count − H₂O × (imine bonds)`

// External Crate Imports
use rust_decimal::Decimal;

// Local Crate Imports
use crate::{AtomicDatabase, BuildingBlock, Cage, ChemicalFormula, Massive, Result};

// Public API ==========================================================================================================

impl<M> BuildingBlock<M> {
    pub const fn new(molecule: M, count: u32, functional_groups: u32) -> Self {
        Self {
            molecule,
            count,
            functional_groups,
        }
    }

    #[must_use]
    pub const fn molecule(&self) -> &M {
        &self.molecule
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The number of amine or aldehyde groups contributed by every copy of this building block
    #[must_use]
    pub const fn reactive_sites(&self) -> u32 {
        self.count * self.functional_groups
    }
}

impl<'a, M: Massive> Cage<'a, M> {
    pub fn new(db: &'a AtomicDatabase, di: BuildingBlock<M>, tri: BuildingBlock<M>) -> Result<Self> {
        let water = ChemicalFormula::new(db, "H2O")?;
        Ok(Self { di, tri, water })
    }

    #[must_use]
    pub const fn di(&self) -> &BuildingBlock<M> {
        &self.di
    }

    #[must_use]
    pub const fn tri(&self) -> &BuildingBlock<M> {
        &self.tri
    }

    /// Every imine bond pairs one aldehyde with one amine, so the scarcer of the two groups limits how many can form
    #[must_use]
    pub fn imine_bonds(&self) -> u32 {
        self.di.reactive_sites().min(self.tri.reactive_sites())
    }

    /// The mass of this cage after picking up `adduct`
    pub fn ion_mass(&self, adduct: &impl Massive) -> Decimal {
        self.monoisotopic_mass() + adduct.monoisotopic_mass()
    }

    /// The m/z this cage would appear at after picking up `adduct` and carrying `charge`, or `None` for a neutral
    /// (and therefore invisible) ion
    pub fn mz(&self, adduct: &impl Massive, charge: u32) -> Option<Decimal> {
        (charge != 0).then(|| self.ion_mass(adduct) / Decimal::from(charge))
    }
}

impl<'a> Cage<'a, &ChemicalFormula<'a>> {
    /// The full formula of the condensed cage, failing only if the building blocks together hold fewer hydrogen or
    /// oxygen atoms than the water they're meant to lose
    pub fn formula(&self) -> Result<ChemicalFormula<'a>> {
        let precursors = self.di.molecule * self.di.count + self.tri.molecule * self.tri.count;
        precursors.checked_sub(&(&self.water * self.imine_bonds()))
    }
}

impl<M: Massive> Massive for BuildingBlock<M> {
    fn monoisotopic_mass(&self) -> Decimal {
        Decimal::from(self.count) * self.molecule.monoisotopic_mass()
    }

    fn average_mass(&self) -> Decimal {
        Decimal::from(self.count) * self.molecule.average_mass()
    }
}

impl<M: Massive> Massive for Cage<'_, M> {
    fn monoisotopic_mass(&self) -> Decimal {
        let lost = Decimal::from(self.imine_bonds()) * self.water.monoisotopic_mass();
        self.di.monoisotopic_mass() + self.tri.monoisotopic_mass() - lost
    }

    fn average_mass(&self) -> Decimal {
        let lost = Decimal::from(self.imine_bonds()) * self.water.average_mass();
        self.di.average_mass() + self.tri.average_mass() - lost
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rust_decimal_macros::dec;

    use crate::{ADDUCTS, Adduct};

    use super::*;

    static DB: LazyLock<AtomicDatabase> = LazyLock::new(AtomicDatabase::default);

    // NOTE: A stand-in for a building block where only the mass is known
    #[derive(Copy, Clone, Debug)]
    struct Fixed(Decimal);

    impl Massive for Fixed {
        fn monoisotopic_mass(&self) -> Decimal {
            self.0
        }

        fn average_mass(&self) -> Decimal {
            self.0
        }
    }

    #[test]
    fn imine_bonds_are_limited_by_the_scarcer_group() {
        let cage = |tri, di| {
            Cage::new(
                &DB,
                BuildingBlock::new(Fixed(dec!(200)), di, 2),
                BuildingBlock::new(Fixed(dec!(300)), tri, 3),
            )
            .unwrap()
        };
        // Balanced stoichiometries use every group
        assert_eq!(cage(2, 3).imine_bonds(), 6);
        assert_eq!(cage(4, 6).imine_bonds(), 12);
        assert_eq!(cage(8, 12).imine_bonds(), 24);
        // Unbalanced stoichiometries leave some groups dangling
        assert_eq!(cage(3, 5).imine_bonds(), 9);
        assert_eq!(cage(3, 3).imine_bonds(), 6);
    }

    #[test]
    fn two_plus_three_proton_adduct() {
        let di = BuildingBlock::new(Fixed(dec!(200)), 3, 2);
        let tri = BuildingBlock::new(Fixed(dec!(300)), 2, 3);
        let cage = Cage::new(&DB, di, tri).unwrap();
        // 3 × 200 + 2 × 300 − 6 × 18.0106 ≈ 1091.9366
        assert_eq!(cage.monoisotopic_mass(), dec!(1091.93661189582));

        let proton = Adduct::from_name("H").unwrap().formula(&DB).unwrap();
        let mz = cage.mz(&proton, 1).unwrap();
        assert_eq!(mz, dec!(1092.943888348140935));
        let mz = cage.mz(&proton, 2).unwrap();
        assert_eq!(mz, dec!(546.4719441740704675));
        // Neutral ions have no m/z
        assert_eq!(cage.mz(&proton, 0), None);
    }

    #[test]
    fn real_cage_formula() {
        // A [4+6] cage of tris(2-aminoethyl)amine and isophthalaldehyde, as seen in the literature
        let tren = ChemicalFormula::new(&DB, "C6H18N4").unwrap();
        let ipa = ChemicalFormula::new(&DB, "C8H6O2").unwrap();
        let cage = Cage::new(&DB, BuildingBlock::new(&ipa, 6, 2), BuildingBlock::new(&tren, 4, 3)).unwrap();
        let formula = cage.formula().unwrap();
        assert_eq!(formula.to_string(), "C72H84N16");
        assert_eq!(formula.monoisotopic_mass(), cage.monoisotopic_mass());
    }

    #[test]
    fn impossible_cage_formula() {
        let oxygen = ChemicalFormula::new(&DB, "O2").unwrap();
        let cage = Cage::new(&DB, BuildingBlock::new(&oxygen, 3, 2), BuildingBlock::new(&oxygen, 2, 3)).unwrap();
        assert!(cage.formula().is_err());
    }

    #[test]
    fn mass_is_conserved() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let di_mass = Decimal::new(rng.gen_range(50_000..500_000), 3);
            let tri_mass = Decimal::new(rng.gen_range(50_000..500_000), 3);
            let (di_count, tri_count) = (rng.gen_range(1..=12), rng.gen_range(1..=8));
            let adduct = ADDUCTS[rng.gen_range(0..ADDUCTS.len())].formula(&DB).unwrap();
            let charge = rng.gen_range(1..=4);

            let cage = Cage::new(
                &DB,
                BuildingBlock::new(Fixed(di_mass), di_count, 2),
                BuildingBlock::new(Fixed(tri_mass), tri_count, 3),
            )
            .unwrap();
            let bonds = (2 * di_count).min(3 * tri_count);
            let expected = Decimal::from(di_count) * di_mass + Decimal::from(tri_count) * tri_mass
                - Decimal::from(bonds) * dec!(18.01056468403)
                + adduct.monoisotopic_mass();

            assert_eq!(cage.ion_mass(&adduct), expected);
            let mz = cage.mz(&adduct, charge).unwrap();
            let error = (mz * Decimal::from(charge) - expected).abs();
            assert!(error < dec!(0.000000000000000001), "{mz} × {charge} drifted from {expected}");
        }
    }
}
