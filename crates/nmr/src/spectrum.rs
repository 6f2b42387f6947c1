// Standard Library Imports
use std::path::Path;

// External Crate Imports
use log::{debug, warn};

// Local Crate Imports
use crate::{NmrError, NmrPeak, NmrSettings, NmrSpectrum, PeakPicker, PpmRange, Result};

// Public API ==========================================================================================================

impl NmrSpectrum {
    /// Corrects `peaks` against the solvent reference, keeping only aldehyde and imine signals with a positive
    /// amplitude. Ranges are checked against the uncorrected shifts
    pub fn from_peaks(peaks: &[NmrPeak], settings: &NmrSettings) -> Result<Self> {
        let offset = reference_offset(peaks, settings)?;
        debug!("correcting {} peaks by {offset:+.4} ppm", peaks.len());

        Ok(Self {
            aldehyde_peaks: extract_peaks(peaks, settings.aldehyde_range, offset, settings),
            imine_peaks: extract_peaks(peaks, settings.imine_range, offset, settings),
        })
    }

    /// Picks the peaks of the spectrum at `path`, then processes them like [`NmrSpectrum::from_peaks`]
    pub fn from_picker(picker: &impl PeakPicker, path: impl AsRef<Path>, settings: &NmrSettings) -> Result<Self> {
        let path = path.as_ref();
        let peaks = picker.pick_peaks(path)?;
        Self::from_peaks(&peaks, settings).inspect_err(|e| warn!("skipping the spectrum at {path:?}: {e}"))
    }
}

/// How far every peak has to move so that the tallest candidate reference peak lands on the target shift
pub fn reference_offset(peaks: &[NmrPeak], settings: &NmrSettings) -> Result<f64> {
    let window = PpmRange::new(
        settings.reference_ppm - settings.reference_tolerance,
        settings.reference_ppm + settings.reference_tolerance,
    );
    // NOTE: Ties in amplitude go to the earliest peak
    let reference = peaks
        .iter()
        .filter(|p| window.contains(p.ppm))
        .reduce(|tallest, p| if p.amplitude > tallest.amplitude { p } else { tallest })
        .ok_or(NmrError::MissingReferencePeak {
            expected: settings.reference_ppm,
            tolerance: settings.reference_tolerance,
        })?;

    Ok(settings.target_ppm - reference.ppm)
}

// Private Helper Methods ==============================================================================================

fn extract_peaks(peaks: &[NmrPeak], range: PpmRange, offset: f64, settings: &NmrSettings) -> Vec<NmrPeak> {
    let is_solvent = |ppm: f64| {
        settings
            .solvent_peaks
            .iter()
            .any(|solvent| (ppm - solvent).abs() <= settings.solvent_tolerance)
    };

    peaks
        .iter()
        .filter(|p| range.contains(p.ppm))
        .map(|p| NmrPeak::new(p.ppm + offset, p.amplitude))
        .filter(|p| !is_solvent(p.ppm) && p.amplitude > 0.0)
        .collect()
}

// Module Tests ========================================================================================================
