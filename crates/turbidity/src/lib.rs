//! Classifies turbidity time series as dissolved, turbid, or never settling down at all

mod classifier;
mod errors;
mod record;
mod segmenter;

// External Crate Imports
use chrono::{NaiveDateTime, TimeDelta};
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

// Local Crate Imports
pub use errors::{Result, TurbidityError};
pub use segmenter::LabeledSample;

// Public API ==========================================================================================================

#[derive(Copy, Clone, PartialEq, Debug, Constructor, Serialize, Deserialize)]
pub struct TurbiditySample {
    pub time: NaiveDateTime,
    pub turbidity: f64,
}

/// The samples taken from a single reaction, kept in time order
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TurbidityRun(Vec<TurbiditySample>);

/// A run of samples sharing the same stability label
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StabilityWindow {
    pub group_id: usize,
    pub stable: bool,
    pub start: NaiveDateTime,
    pub time_span: TimeDelta,
    pub mean_turbidity: f64,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DissolutionState {
    #[display("dissolved")]
    Dissolved,
    #[display("turbid")]
    Turbid,
    #[display("unstable")]
    Unstable,
}

/// A turbidity run along with the reading expected from a fully dissolved reaction
#[derive(Clone, PartialEq, Debug)]
pub struct TurbidityRecord {
    pub run: TurbidityRun,
    pub dissolved_reference: f64,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClassifierSettings {
    /// How far ahead of each sample its rolling statistics look
    pub window_secs: u32,
    /// The shortest run of stable samples that counts as settled
    pub min_stable_secs: u32,
    /// How many standard deviations from the rolling mean a sample may stray and still be stable
    pub std_devs: f64,
    /// Added to the dissolved reference before comparing
    pub dissolved_margin: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            window_secs: 60,
            min_stable_secs: 60,
            std_devs: 3.0,
            dissolved_margin: 0.0,
        }
    }
}

impl ClassifierSettings {
    #[must_use]
    pub fn window(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.window_secs))
    }

    #[must_use]
    pub fn min_stable_duration(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.min_stable_secs))
    }
}
