// External Crate Imports
use chrono::NaiveDateTime;
use itertools::Itertools;
use statrs::statistics::Statistics;

// Local Crate Imports
use crate::{ClassifierSettings, StabilityWindow, TurbidityRun, TurbiditySample};

// Public API ==========================================================================================================

/// A sample along with the rolling statistics of the window starting at it
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LabeledSample {
    pub sample: TurbiditySample,
    pub window_len: usize,
    pub mean: f64,
    // NOTE: `None` for windows holding a single sample, where a spread isn't defined
    pub std_dev: Option<f64>,
    pub stable: bool,
    pub group_id: usize,
}

impl TurbidityRun {
    /// Sorts `samples` by time, keeping duplicates (and the order between them)
    pub fn new(samples: impl IntoIterator<Item = TurbiditySample>) -> Self {
        let mut samples: Vec<_> = samples.into_iter().collect();
        samples.sort_by_key(|s| s.time);
        Self(samples)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurbiditySample> {
        self.0.iter()
    }

    /// Labels every sample as stable or not, then numbers the runs of equally labeled samples from 1
    #[must_use]
    pub fn label_samples(&self, settings: &ClassifierSettings) -> Vec<LabeledSample> {
        let window = settings.window();
        let mut group_id = 0;
        // NOTE: The first sample always opens group 1, even when it follows an implicit stable predecessor
        let mut previous = None;

        self.0
            .iter()
            .map(|&sample| {
                let values = self.window_values(sample.time, sample.time + window);
                let window_len = values.len();
                let mean = values.iter().mean();
                let (std_dev, stable) = if window_len == 1 {
                    (None, true)
                } else {
                    let std_dev = values.iter().std_dev();
                    let spread = settings.std_devs * std_dev;
                    let stable = (mean - spread..=mean + spread).contains(&sample.turbidity);
                    (Some(std_dev), stable)
                };

                if previous != Some(stable) {
                    group_id += 1;
                }
                previous = Some(stable);

                LabeledSample {
                    sample,
                    window_len,
                    mean,
                    std_dev,
                    stable,
                    group_id,
                }
            })
            .collect()
    }

    /// Collapses labeled samples into windows of consecutive samples sharing a label, in time order
    #[must_use]
    pub fn stability_windows(&self, settings: &ClassifierSettings) -> Vec<StabilityWindow> {
        self.label_samples(settings)
            .into_iter()
            .chunk_by(|labeled| labeled.group_id)
            .into_iter()
            .filter_map(|(group_id, group)| {
                let group: Vec<_> = group.collect();
                let first = group.first()?;
                let last = group.last()?;
                Some(StabilityWindow {
                    group_id,
                    stable: first.stable,
                    start: first.sample.time,
                    time_span: last.sample.time - first.sample.time,
                    mean_turbidity: group.iter().map(|l| l.sample.turbidity).mean(),
                })
            })
            .collect()
    }
}

// Private Helper Methods ==============================================================================================

impl TurbidityRun {
    // NOTE: Every sample sharing a timestamp shares a window, so windows start at the first of any duplicates
    fn window_values(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<f64> {
        let from = self.0.partition_point(|s| s.time < start);
        let to = self.0.partition_point(|s| s.time <= end);
        self.0[from..to].iter().map(|s| s.turbidity).collect()
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn run(samples: &[(i64, f64)]) -> TurbidityRun {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TurbidityRun::new(
            samples
                .iter()
                .map(|&(secs, turbidity)| TurbiditySample::new(start + TimeDelta::seconds(secs), turbidity)),
        )
    }

    #[test]
    fn samples_are_sorted() {
        let run = run(&[(30, 3.0), (0, 1.0), (15, 2.0), (15, 2.5)]);
        let values: Vec<_> = run.iter().map(|s| s.turbidity).collect();
        assert_eq!(values, [1.0, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn rolling_windows_look_ahead() {
        let run = run(&[(0, 10.0), (30, 20.0), (60, 30.0), (61, 40.0)]);
        let labeled = run.label_samples(&ClassifierSettings::default());
        let window_lens: Vec<_> = labeled.iter().map(|l| l.window_len).collect();
        // Both ends of the window are inclusive, so the first window reaches exactly 60 seconds ahead
        assert_eq!(window_lens, [3, 3, 2, 1]);
        assert_float_absolute_eq!(labeled[0].mean, 20.0, 1e-12);
        assert_float_absolute_eq!(labeled[0].std_dev.unwrap(), 10.0, 1e-12);
        assert_eq!(labeled[3].std_dev, None);
    }

    #[test]
    fn single_sample_windows_are_stable() {
        let labeled = run(&[(0, 5.0)]).label_samples(&ClassifierSettings::default());
        assert_eq!(labeled.len(), 1);
        assert!(labeled[0].stable);
        assert_eq!(labeled[0].group_id, 1);

        // Even when the lone sample is wildly different from everything before it
        let labeled = run(&[(0, 5.0), (5, 5.0), (120, 5000.0)]).label_samples(&ClassifierSettings::default());
        assert!(labeled.iter().all(|l| l.stable));
    }

    #[test]
    fn spikes_are_unstable() {
        let mut samples: Vec<_> = (0..20).map(|i| (i * 3, 100.0)).collect();
        samples[5].1 = 190.0;
        let labeled = run(&samples).label_samples(&ClassifierSettings::default());
        let stable: Vec<_> = labeled.iter().map(|l| l.stable).collect();
        assert!(!stable[5]);
        assert_eq!(stable.iter().filter(|&&s| s).count(), 19);
        let groups: Vec<_> = labeled.iter().map(|l| l.group_id).collect();
        assert_eq!(groups[..7], [1, 1, 1, 1, 1, 2, 3]);
        assert_eq!(groups[19], 3);
    }

    #[test]
    fn first_unstable_sample_still_opens_group_one() {
        let mut samples: Vec<_> = (0..30).map(|i| (i * 3, 100.0)).collect();
        samples[0].1 = 190.0;
        let labeled = run(&samples).label_samples(&ClassifierSettings::default());
        assert!(!labeled[0].stable);
        assert_eq!(labeled[0].group_id, 1);
        assert_eq!(labeled[1].group_id, 2);
    }

    #[test]
    fn stability_windows() {
        let mut samples: Vec<_> = (0..66).map(|i| (i * 3, 100.0)).collect();
        for spike in [0, 15, 30, 45, 60] {
            samples[spike].1 = if spike % 30 == 0 { 190.0 } else { 10.0 };
        }
        let windows = run(&samples).stability_windows(&ClassifierSettings::default());
        let summary: Vec<_> = windows
            .iter()
            .map(|w| (w.group_id, w.stable, w.time_span.num_seconds()))
            .collect();
        assert_eq!(
            summary,
            [
                (1, false, 0),
                (2, true, 39),
                (3, false, 0),
                (4, true, 39),
                (5, false, 0),
                (6, true, 39),
                (7, false, 0),
                (8, true, 57),
            ]
        );
        assert_float_absolute_eq!(windows[1].mean_turbidity, 100.0, 1e-12);
        assert_float_absolute_eq!(windows[7].mean_turbidity, 104.5, 1e-12);
    }

    #[test]
    fn duplicate_timestamps_share_windows() {
        let labeled = run(&[(0, 10.0), (0, 12.0), (60, 10.0), (60, 12.0)]).label_samples(&ClassifierSettings::default());
        let window_lens: Vec<_> = labeled.iter().map(|l| l.window_len).collect();
        assert_eq!(window_lens, [4, 4, 2, 2]);
    }

    #[test]
    fn empty_runs() {
        let run = TurbidityRun::default();
        assert!(run.is_empty());
        assert!(run.label_samples(&ClassifierSettings::default()).is_empty());
        assert!(run.stability_windows(&ClassifierSettings::default()).is_empty());
    }
}
