use crate::{MassSpectrumPeak, Stoichiometry};

impl MassSpectrumPeak {
    #[must_use]
    pub const fn stoichiometry(&self) -> Stoichiometry {
        Stoichiometry::new(self.tri_count, self.di_count)
    }

    /// How far (in parts-per-million) the observed cage peak sits from where it was predicted
    #[must_use]
    pub fn ppm_error(&self) -> f64 {
        (self.calculated_mz - self.spectrum_mz).abs() / self.calculated_mz * 1e6
    }

    /// The observed gap between the cage peak and its separation peak
    #[must_use]
    pub fn separation(&self) -> Option<f64> {
        self.separation_mz.map(|separation_mz| separation_mz - self.spectrum_mz)
    }

    /// How far the observed separation strays from the `1 / charge` spacing expected between isotopologues
    #[must_use]
    pub fn separation_error(&self) -> Option<f64> {
        self.separation()
            .map(|separation| (separation - 1.0 / f64::from(self.charge)).abs())
    }
}
