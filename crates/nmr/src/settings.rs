use crate::{NmrSettings, PpmRange};

impl Default for NmrSettings {
    fn default() -> Self {
        Self {
            reference_ppm: 7.28,
            reference_tolerance: 0.05,
            target_ppm: 7.26,
            // NOTE: CDCl₃ and its two satellites
            solvent_peaks: vec![7.26, 7.52, 7.00],
            solvent_tolerance: 0.02,
            aldehyde_range: PpmRange::new(9.0, 11.0),
            imine_range: PpmRange::new(6.5, 9.0),
        }
    }
}

impl PpmRange {
    #[must_use]
    pub fn contains(&self, ppm: f64) -> bool {
        self.min < ppm && ppm < self.max
    }
}
