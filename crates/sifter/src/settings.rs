use crate::MatchSettings;

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            calculated_peak_tolerance: 0.1,
            separation_peak_tolerance: 0.1,
            max_ppm_error: 10.0,
            max_separation: 0.02,
            min_peak_height: 1e4,
            max_between_peak_height: 0.7,
            require_separation_peak: true,
        }
    }
}
