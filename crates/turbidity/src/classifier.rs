// External Crate Imports
use log::debug;

// Local Crate Imports
use crate::{ClassifierSettings, DissolutionState, TurbidityRecord, TurbidityRun};

// Public API ==========================================================================================================

impl TurbidityRun {
    /// Judges the first window that stays stable for long enough against `dissolved_reference`. A run that never
    /// settles is `Unstable`
    #[must_use]
    pub fn classify(&self, dissolved_reference: f64, settings: &ClassifierSettings) -> DissolutionState {
        let min_stable_duration = settings.min_stable_duration();
        let settled = self
            .stability_windows(settings)
            .into_iter()
            .find(|w| w.stable && w.time_span >= min_stable_duration);

        let Some(window) = settled else {
            debug!("no stable window lasted {}s out of {} samples", settings.min_stable_secs, self.len());
            return DissolutionState::Unstable;
        };

        let threshold = dissolved_reference + settings.dissolved_margin;
        let state = if window.mean_turbidity < threshold {
            DissolutionState::Dissolved
        } else {
            DissolutionState::Turbid
        };
        debug!(
            "window {} settled at {:.3} against a threshold of {threshold:.3}, so the reaction is {state}",
            window.group_id, window.mean_turbidity
        );
        state
    }
}

impl TurbidityRecord {
    #[must_use]
    pub fn classify(&self, settings: &ClassifierSettings) -> DissolutionState {
        self.run.classify(self.dissolved_reference, settings)
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};

    use super::*;
    use crate::TurbiditySample;

    fn run(samples: impl IntoIterator<Item = (i64, f64)>) -> TurbidityRun {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TurbidityRun::new(
            samples
                .into_iter()
                .map(|(secs, turbidity)| TurbiditySample::new(start + TimeDelta::seconds(secs), turbidity)),
        )
    }

    fn steady_then_spike() -> TurbidityRun {
        run((0..=48).map(|i| {
            let secs = i * 5;
            let turbidity = if secs < 120 {
                20.0
            } else if secs == 120 {
                500.0
            } else {
                80.0
            };
            (secs, turbidity)
        }))
    }

    #[test]
    fn gently_wobbling_runs_settle() {
        let run = run((0..10).map(|i| (i * 12, if i % 2 == 0 { 20.0 } else { 20.5 })));
        let windows = run.stability_windows(&ClassifierSettings::default());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].time_span, TimeDelta::seconds(108));

        let settings = ClassifierSettings::default();
        assert_eq!(run.classify(25.0, &settings), DissolutionState::Dissolved);
        assert_eq!(run.classify(15.0, &settings), DissolutionState::Turbid);
    }

    #[test]
    fn oscillating_runs_never_settle() {
        let mut samples: Vec<_> = (0..66).map(|i| (i * 3, 100.0)).collect();
        for spike in [0, 15, 30, 45, 60] {
            samples[spike].1 = if spike % 30 == 0 { 190.0 } else { 10.0 };
        }
        let run = run(samples);
        assert_eq!(run.classify(1000.0, &ClassifierSettings::default()), DissolutionState::Unstable);
        assert_eq!(run.classify(0.0, &ClassifierSettings::default()), DissolutionState::Unstable);
    }

    #[test]
    fn first_settled_window_wins() {
        let run = steady_then_spike();
        let summary: Vec<_> = run
            .stability_windows(&ClassifierSettings::default())
            .iter()
            .map(|w| (w.group_id, w.stable, w.time_span.num_seconds()))
            .collect();
        assert_eq!(summary, [(1, true, 115), (2, false, 0), (3, true, 115)]);

        let settings = ClassifierSettings::default();
        // The later window averages 80, but only the first (averaging 20) is ever compared
        assert_eq!(run.classify(25.0, &settings), DissolutionState::Dissolved);
        assert_eq!(run.classify(19.0, &settings), DissolutionState::Turbid);
        // The comparison is strict
        assert_eq!(run.classify(20.0, &settings), DissolutionState::Turbid);
    }

    #[test]
    fn dissolved_margin() {
        let run = steady_then_spike();
        let settings = ClassifierSettings {
            dissolved_margin: 1.5,
            ..ClassifierSettings::default()
        };
        assert_eq!(run.classify(19.0, &settings), DissolutionState::Dissolved);
        assert_eq!(run.classify(18.0, &settings), DissolutionState::Turbid);
    }

    #[test]
    fn short_windows_are_ignored() {
        // A single sample spans no time at all
        let lone = run([(0, 5.0)]);
        assert_eq!(lone.classify(10.0, &ClassifierSettings::default()), DissolutionState::Unstable);
        // Nor does anything, when there's nothing to measure
        assert_eq!(
            TurbidityRun::default().classify(10.0, &ClassifierSettings::default()),
            DissolutionState::Unstable
        );

        // But exactly a minute is long enough
        let pair = run([(0, 5.0), (60, 50.0)]);
        let windows = pair.stability_windows(&ClassifierSettings::default());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].mean_turbidity, 27.5);
        assert_eq!(pair.classify(10.0, &ClassifierSettings::default()), DissolutionState::Turbid);

        // Unless the minimum is raised
        let settings = ClassifierSettings {
            min_stable_secs: 61,
            ..ClassifierSettings::default()
        };
        assert_eq!(pair.classify(10.0, &settings), DissolutionState::Unstable);
    }

    #[test]
    fn duplicate_timestamps() {
        let run = run([(0, 10.0), (0, 10.0), (30, 10.0), (60, 10.0), (60, 10.0)]);
        let windows = run.stability_windows(&ClassifierSettings::default());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].time_span, TimeDelta::seconds(60));
        assert_eq!(run.classify(20.0, &ClassifierSettings::default()), DissolutionState::Dissolved);
    }

    #[test]
    fn classification_is_deterministic() {
        let run = steady_then_spike();
        let settings = ClassifierSettings::default();
        assert_eq!(run.label_samples(&settings), run.label_samples(&settings));
        assert_eq!(run.stability_windows(&settings), run.stability_windows(&settings));
        assert_eq!(run.classify(25.0, &settings), run.classify(25.0, &settings));
    }

    #[test]
    fn records_classify_against_their_own_reference() {
        let record = TurbidityRecord {
            run: steady_then_spike(),
            dissolved_reference: 25.0,
        };
        assert_eq!(record.classify(&ClassifierSettings::default()), DissolutionState::Dissolved);
    }
}
