// Standard Library Imports
use std::{fs::File, io::Cursor, path::Path};

// External Crate Imports
use polars::prelude::*;

// Local Crate Imports
use crate::{ObservedPeak, PeakList, Result, SifterError};

// Constants ===========================================================================================================

struct InputColumns;
impl InputColumns {
    const MZ: &str = "mz";
    const HEIGHT: &str = "height";
}

// Public API ==========================================================================================================

impl PeakList {
    /// Drops every peak at or below `min_height`, then sorts what's left by m/z. Peaks sharing an m/z keep their
    /// original order
    pub fn new(peaks: impl IntoIterator<Item = ObservedPeak>, min_height: f64) -> Self {
        let mut peaks: Vec<_> = peaks.into_iter().filter(|p| p.height > min_height).collect();
        peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
        Self(peaks)
    }

    pub fn from_csv(csv: &str, min_height: f64) -> Result<Self> {
        let df = CsvReader::new(Cursor::new(csv)).finish()?;
        Self::from_dataframe(df, min_height)
    }

    pub fn from_path(path: impl AsRef<Path>, min_height: f64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SifterError::Io {
            path: path.to_owned(),
            source,
        })?;
        let df = CsvReader::new(file).finish()?;
        Self::from_dataframe(df, min_height)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObservedPeak> {
        self.0.iter()
    }

    /// Peaks with an m/z in `[center - tolerance, center + tolerance]`, lowest m/z first
    #[must_use]
    pub fn within(&self, center: f64, tolerance: f64) -> &[ObservedPeak] {
        let start = self.0.partition_point(|p| p.mz < center - tolerance);
        let end = self.0.partition_point(|p| p.mz <= center + tolerance);
        &self.0[start..end.max(start)]
    }

    /// Peaks with an m/z strictly between `low` and `high`
    #[must_use]
    pub fn between(&self, low: f64, high: f64) -> &[ObservedPeak] {
        let start = self.0.partition_point(|p| p.mz <= low);
        let end = self.0.partition_point(|p| p.mz < high);
        &self.0[start..end.max(start)]
    }
}

// Private Helper Methods ==============================================================================================

impl PeakList {
    fn from_dataframe(df: DataFrame, min_height: f64) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(InputColumns::MZ).cast(DataType::Float64),
                col(InputColumns::HEIGHT).cast(DataType::Float64),
            ])
            .drop_nulls(None)
            .collect()?;

        let mz = df.column(InputColumns::MZ)?.as_materialized_series().f64()?;
        let height = df.column(InputColumns::HEIGHT)?.as_materialized_series().f64()?;
        let peaks = mz
            .into_iter()
            .zip(height)
            .filter_map(|(mz, height)| Some(ObservedPeak::new(mz?, height?)));

        Ok(Self::new(peaks, min_height))
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;

    use super::*;

    fn peaks(mzs: &[f64]) -> PeakList {
        PeakList::new(mzs.iter().map(|&mz| ObservedPeak::new(mz, 1e5)), 1e4)
    }

    fn mzs(peaks: &[ObservedPeak]) -> Vec<f64> {
        peaks.iter().map(|p| p.mz).collect()
    }

    #[test]
    fn height_filter_and_sorting() {
        let list = PeakList::new(
            [
                ObservedPeak::new(600.0, 2e4),
                ObservedPeak::new(500.0, 1e4),
                ObservedPeak::new(400.0, 5e5),
                ObservedPeak::new(550.0, 9e3),
            ],
            1e4,
        );
        // Peaks need to be strictly above the noise floor
        assert_eq!(list.len(), 2);
        assert_eq!(mzs(&list.0), [400.0, 600.0]);
    }

    #[test]
    fn tied_peaks_keep_their_order() {
        let list = PeakList::new(
            [
                ObservedPeak::new(500.0, 3e4),
                ObservedPeak::new(400.0, 5e5),
                ObservedPeak::new(500.0, 2e4),
            ],
            1e4,
        );
        let heights: Vec<_> = list.iter().map(|p| p.height).collect();
        assert_eq!(heights, [5e5, 3e4, 2e4]);
    }

    #[test]
    fn window_edges_are_inclusive() {
        let list = peaks(&[999.85, 999.900_001, 1000.0, 1000.099_999, 1000.100_001, 1000.2]);
        assert_eq!(mzs(list.within(1000.0, 0.1)), [999.900_001, 1000.0, 1000.099_999]);
        assert_eq!(mzs(list.within(1000.0, 0.0)), [1000.0]);
        assert!(list.within(2000.0, 0.1).is_empty());
        // Exact boundaries are included
        let list = peaks(&[0.5, 1.0, 1.5]);
        assert_eq!(mzs(list.within(1.0, 0.5)), [0.5, 1.0, 1.5]);
    }

    #[test]
    fn between_is_exclusive() {
        let list = peaks(&[1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(mzs(list.between(1.0, 2.0)), [1.25, 1.5, 1.75]);
        assert_eq!(mzs(list.between(1.25, 1.5)), Vec::<f64>::new());
        assert_eq!(mzs(list.between(2.0, 1.0)), Vec::<f64>::new());
    }

    #[test]
    fn read_csv() {
        let csv = indoc! {"
            mz,height,resolution
            1092.94,250000,60000
            546.47,9000,60000
            1093.95,120000.5,60000
        "};
        let list = PeakList::from_csv(csv, 1e4).unwrap();
        assert_eq!(mzs(&list.0), [1092.94, 1093.95]);
        assert_eq!(list.0[1].height, 120_000.5);
    }

    #[test]
    fn read_csv_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "height,mz\n50000,800.5\n60000,700.25").unwrap();
        let list = PeakList::from_path(file.path(), 1e4).unwrap();
        assert_eq!(mzs(&list.0), [700.25, 800.5]);

        assert!(matches!(
            PeakList::from_path("does/not/exist.csv", 1e4),
            Err(SifterError::Io { .. })
        ));
    }

    #[test]
    fn missing_columns() {
        let csv = "mass,intensity\n100.0,5e5\n";
        assert!(matches!(PeakList::from_csv(csv, 1e4), Err(SifterError::Table(_))));
    }
}
