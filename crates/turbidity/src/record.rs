// Standard Library Imports
use std::collections::BTreeMap;

// External Crate Imports
use chrono::NaiveDateTime;
use serde::Deserialize;

// Local Crate Imports
use crate::{Result, TurbidityError, TurbidityRecord, TurbidityRun, TurbiditySample};

// Constants ===========================================================================================================

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S_%6f";

// Public API ==========================================================================================================

impl TurbidityRecord {
    /// Reads an instrument export of the form:
    ///
    /// ```json
    /// {
    ///   "turbidity_data": { "2024_03_01_09_00_00_000000": 20.5, ... },
    ///   "turbidity_dissolved_reference": 25.0
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let RawRecord {
            turbidity_data,
            turbidity_dissolved_reference,
        } = serde_json::from_str(json)?;

        let samples = turbidity_data
            .into_iter()
            .map(|(timestamp, turbidity)| Ok(TurbiditySample::new(parse_timestamp(&timestamp)?, turbidity)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            run: TurbidityRun::new(samples),
            dissolved_reference: turbidity_dissolved_reference,
        })
    }
}

// Private Types =======================================================================================================

#[derive(Deserialize)]
struct RawRecord {
    turbidity_data: BTreeMap<String, f64>,
    turbidity_dissolved_reference: f64,
}

// Private Helper Methods ==============================================================================================

fn parse_timestamp(timestamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|source| TurbidityError::Timestamp {
        timestamp: timestamp.to_owned(),
        source,
    })
}

// Module Tests ========================================================================================================
