// External Crate Imports
use cagechem::{ADDUCTS, AtomicDatabase, BuildingBlock, Cage, ChemicalFormula, Massive};
use log::{debug, trace};
use rust_decimal::prelude::ToPrimitive;

// Local Crate Imports
use crate::{
    CageMatcher, CandidateAssembly, DI_FUNCTIONAL_GROUPS, MassSpectrumPeak, MatchSettings, ObservedPeak, PeakList,
    Result, STOICHIOMETRIES, TRI_FUNCTIONAL_GROUPS, enumerate_candidates,
};

// Public API ==========================================================================================================

impl<'a> CageMatcher<'a> {
    pub fn new(
        db: &'a AtomicDatabase,
        di: &ChemicalFormula<'a>,
        tri: &ChemicalFormula<'a>,
        settings: MatchSettings,
    ) -> Result<Self> {
        let cages = STOICHIOMETRIES
            .into_iter()
            .map(|stoichiometry| {
                let di = BuildingBlock::new(di.clone(), stoichiometry.di_count, DI_FUNCTIONAL_GROUPS);
                let tri = BuildingBlock::new(tri.clone(), stoichiometry.tri_count, TRI_FUNCTIONAL_GROUPS);
                Ok((stoichiometry, Cage::new(db, di, tri)?))
            })
            .collect::<Result<_>>()?;

        let adducts = ADDUCTS
            .into_iter()
            .map(|adduct| Ok((adduct, adduct.formula(db)?)))
            .collect::<Result<_>>()?;

        // NOTE: Converting a `Decimal` to an `f64` only ever loses precision, it never actually fails
        let proton_mass = ChemicalFormula::new(db, "p")?
            .monoisotopic_mass()
            .to_f64()
            .unwrap_or_default();

        Ok(Self {
            cages,
            adducts,
            proton_mass,
            settings,
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Where `candidate` should turn up in a spectrum
    #[must_use]
    pub fn calculated_mz(&self, candidate: &CandidateAssembly) -> Option<f64> {
        let (_, cage) = self.cages.iter().find(|(s, _)| *s == candidate.stoichiometry)?;
        let (_, adduct) = self.adducts.iter().find(|(a, _)| *a == candidate.adduct)?;
        cage.mz(adduct, candidate.charge)?.to_f64()
    }

    /// Every validated cage ion in `peaks`, in candidate enumeration order
    #[must_use]
    pub fn find_peaks(&self, peaks: &PeakList) -> Vec<MassSpectrumPeak> {
        let found: Vec<_> = enumerate_candidates()
            .filter_map(|candidate| self.match_candidate(&candidate, peaks))
            .collect();
        debug!("found {} cage peaks among {} observed peaks", found.len(), peaks.len());
        found
    }

    /// Looks for `candidate` in `peaks`, along with a separation peak one proton-per-charge above it
    #[must_use]
    pub fn match_candidate(&self, candidate: &CandidateAssembly, peaks: &PeakList) -> Option<MassSpectrumPeak> {
        let MatchSettings {
            calculated_peak_tolerance,
            separation_peak_tolerance,
            max_ppm_error,
            require_separation_peak,
            ..
        } = self.settings;

        let calculated_mz = self.calculated_mz(candidate)?;
        // NOTE: Peaks are sorted by m/z, so the "first" peak in the window is the lowest
        let &cage_peak = peaks.within(calculated_mz, calculated_peak_tolerance).first()?;

        let ppm_error = (calculated_mz - cage_peak.mz).abs() / calculated_mz * 1e6;
        if ppm_error > max_ppm_error {
            trace!("{candidate}: rejected with a {ppm_error:.2} ppm error");
            return None;
        }

        let expected_separation_mz = cage_peak.mz + self.proton_mass / f64::from(candidate.charge);
        let separation_peak = peaks
            .within(expected_separation_mz, separation_peak_tolerance)
            .first()
            .copied();

        let separation_mz = match separation_peak {
            Some(separation_peak) => Some(self.validate_separation(candidate, cage_peak, separation_peak, peaks)?),
            None if require_separation_peak => {
                trace!("{candidate}: rejected without a separation peak");
                return None;
            }
            None => None,
        };

        Some(MassSpectrumPeak {
            di_count: candidate.stoichiometry.di_count,
            tri_count: candidate.stoichiometry.tri_count,
            adduct: candidate.adduct.name().to_owned(),
            charge: candidate.charge,
            calculated_mz,
            spectrum_mz: cage_peak.mz,
            separation_mz,
            intensity: cage_peak.height,
        })
    }
}

// Private Helper Methods ==============================================================================================

impl CageMatcher<'_> {
    fn validate_separation(
        &self,
        candidate: &CandidateAssembly,
        cage_peak: ObservedPeak,
        separation_peak: ObservedPeak,
        peaks: &PeakList,
    ) -> Option<f64> {
        let MatchSettings {
            max_separation,
            max_between_peak_height,
            ..
        } = self.settings;

        let separation = separation_peak.mz - cage_peak.mz;
        let separation_error = (separation - 1.0 / f64::from(candidate.charge)).abs();
        if separation_error > max_separation {
            trace!("{candidate}: rejected with a separation of {separation:.4}");
            return None;
        }

        let max_height = max_between_peak_height * separation_peak.height;
        let interference = peaks
            .between(cage_peak.mz, separation_peak.mz)
            .iter()
            .any(|p| p.height > max_height);
        if interference {
            trace!("{candidate}: rejected due to an interfering peak");
            return None;
        }

        Some(separation_peak.mz)
    }
}

// Module Tests ========================================================================================================
