// Standard Library Imports
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

// External Crate Imports
use ahash::HashMap;
use cagechem::AtomicDatabase;
use log::{info, warn};
use nmr::{NmrSpectrum, PeakPicker};
use rayon::prelude::*;
use sifter::{CageMatcher, MassSpectrumPeak, PeakList, assign_topologies};
use turbidity::DissolutionState;

// Local Crate Imports
use crate::{
    BatchReport, CageyError, Failure, FormulaResolver, MassSpecJob, MassSpecResult, NmrJob, Pipeline, ReactionKey,
    ReactionStore, Result, Settings,
};

// Public API ==========================================================================================================

impl Pipeline {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            db: AtomicDatabase::default(),
            settings,
            cancelled: Arc::default(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Once set, inputs that haven't been started yet fail as cancelled. Anything already running is left to finish
    #[must_use]
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Searches each job's peak list for cages built from that reaction's precursors, then assigns topologies using
    /// the peaks found across every spectrum of a reaction
    pub fn mass_spec<S: ReactionStore + Sync>(
        &self,
        resolver: &(impl FormulaResolver + Sync),
        store: &mut S,
        jobs: &[MassSpecJob],
    ) -> BatchReport<MassSpecResult> {
        let reader: &S = store;
        let outcomes = self.compute(jobs, |job| self.find_cage_peaks(resolver, reader, job));
        let (reactions, failures) = pool_by_reaction(jobs, outcomes);
        let (keys, results) = reaction_results(reactions);

        self.commit(&keys, results, failures, |key, result| {
            store.write_mass_spectrum_peaks(key, &result.peaks)?;
            store.write_topology_assignments(key, &result.topologies)
        })
    }

    pub fn turbidity<S: ReactionStore + Sync>(
        &self,
        store: &mut S,
        keys: &[ReactionKey],
    ) -> BatchReport<DissolutionState> {
        let reader: &S = store;
        let outcomes = self.compute(keys, |key| {
            Ok(reader.turbidity_record(key)?.classify(&self.settings.turbidity))
        });
        self.commit(keys, outcomes, Vec::new(), |key, &state| store.write_dissolution_state(key, state))
    }

    pub fn nmr(
        &self,
        picker: &(impl PeakPicker + Sync),
        store: &mut impl ReactionStore,
        jobs: &[NmrJob],
    ) -> BatchReport<NmrSpectrum> {
        let outcomes = self.compute(jobs, |job| {
            Ok(NmrSpectrum::from_picker(picker, &job.spectrum, &self.settings.nmr)?)
        });
        self.commit(jobs, outcomes, Vec::new(), |key, spectrum| store.write_nmr_spectrum(key, spectrum))
    }
}

impl<T> BatchReport<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

// Private Types =======================================================================================================

trait Job {
    fn key(&self) -> &ReactionKey;
    fn input(&self) -> String;
}

impl Job for MassSpecJob {
    fn key(&self) -> &ReactionKey {
        &self.key
    }

    fn input(&self) -> String {
        self.peak_list.display().to_string()
    }
}

impl Job for NmrJob {
    fn key(&self) -> &ReactionKey {
        &self.key
    }

    fn input(&self) -> String {
        self.spectrum.display().to_string()
    }
}

impl Job for ReactionKey {
    fn key(&self) -> &ReactionKey {
        self
    }

    fn input(&self) -> String {
        self.to_string()
    }
}

struct PooledPeaks {
    key: ReactionKey,
    peaks: Vec<MassSpectrumPeak>,
    spectra: usize,
    failed: usize,
}

// Private Helper Methods ==============================================================================================

impl Pipeline {
    fn compute<J: Job + Sync, T: Send>(&self, jobs: &[J], work: impl Fn(&J) -> Result<T> + Sync) -> Vec<Result<T>> {
        jobs.par_iter()
            .map(|job| {
                if self.cancelled.load(Ordering::Relaxed) {
                    return Err(CageyError::Cancelled);
                }
                work(job)
            })
            .collect()
    }

    // NOTE: Nothing is written until every worker has finished, and a failed write only fails its own input
    fn commit<J: Job, T>(
        &self,
        jobs: &[J],
        outcomes: Vec<Result<T>>,
        failures: Vec<Failure>,
        mut write: impl FnMut(&ReactionKey, &T) -> Result<()>,
    ) -> BatchReport<T> {
        let mut report = BatchReport {
            successes: Vec::new(),
            failures,
        };
        for (job, outcome) in jobs.iter().zip(outcomes) {
            let key = job.key();
            match outcome.and_then(|result| write(key, &result).map(|()| result)) {
                Ok(result) => report.successes.push((key.clone(), result)),
                Err(error) => report.failures.push(failure(job, error)),
            }
        }

        info!(
            "processed {} inputs: {} succeeded and {} failed",
            report.len(),
            report.successes.len(),
            report.failures.len()
        );
        report
    }

    fn find_cage_peaks(
        &self,
        resolver: &impl FormulaResolver,
        store: &impl ReactionStore,
        job: &MassSpecJob,
    ) -> Result<Vec<MassSpectrumPeak>> {
        let precursors = store.precursors(&job.key)?;
        let di = resolver.resolve(&self.db, &precursors.di)?;
        let tri = resolver.resolve(&self.db, &precursors.tri)?;

        let settings = self.settings.mass_spec;
        let matcher = CageMatcher::new(&self.db, &di, &tri, settings)?;

        // NOTE: An unreadable peak list is just a spectrum where nothing was found
        let peak_list = match PeakList::from_path(&job.peak_list, settings.min_peak_height) {
            Ok(peak_list) if peak_list.is_empty() => {
                warn!("no peaks rose above the noise floor in {:?}", job.peak_list);
                peak_list
            }
            Ok(peak_list) => peak_list,
            Err(error) => {
                warn!("treating {:?} as an empty peak list: {error}", job.peak_list);
                PeakList::default()
            }
        };

        Ok(matcher.find_peaks(&peak_list))
    }
}

fn failure<J: Job>(job: &J, error: CageyError) -> Failure {
    let input = job.input();
    warn!("failed to process {input}: {error}");
    Failure { input, error }
}

// NOTE: Reactions keep the order their first spectrum was given in, and their peaks keep the order of their spectra
fn pool_by_reaction(
    jobs: &[MassSpecJob],
    outcomes: Vec<Result<Vec<MassSpectrumPeak>>>,
) -> (Vec<PooledPeaks>, Vec<Failure>) {
    let mut reactions: Vec<PooledPeaks> = Vec::new();
    let mut index: HashMap<&ReactionKey, usize> = HashMap::default();
    let mut failures = Vec::new();

    for (job, outcome) in jobs.iter().zip(outcomes) {
        let i = *index.entry(&job.key).or_insert_with(|| {
            reactions.push(PooledPeaks {
                key: job.key.clone(),
                peaks: Vec::new(),
                spectra: 0,
                failed: 0,
            });
            reactions.len() - 1
        });
        reactions[i].spectra += 1;
        match outcome {
            Ok(peaks) => reactions[i].peaks.extend(peaks),
            Err(error) => {
                reactions[i].failed += 1;
                failures.push(failure(job, error));
            }
        }
    }

    (reactions, failures)
}

// NOTE: Reactions where every spectrum failed have nothing more to report than those failures
fn reaction_results(reactions: Vec<PooledPeaks>) -> (Vec<ReactionKey>, Vec<Result<MassSpecResult>>) {
    reactions
        .into_iter()
        .filter(|reaction| reaction.failed < reaction.spectra)
        .map(|PooledPeaks { key, peaks, failed, .. }| {
            let result = if failed > 0 {
                Err(CageyError::IncompleteReaction {
                    key: key.to_string(),
                    failed,
                })
            } else {
                let topologies = assign_topologies(peaks.iter().enumerate().map(|(i, peak)| (i + 1, peak)));
                Ok(MassSpecResult { peaks, topologies })
            };
            (key, result)
        })
        .unzip()
}

// Module Tests ========================================================================================================
