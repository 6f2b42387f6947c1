// Standard Library Imports
use std::{fs, path::PathBuf};

// External Crate Imports
use cagey::{
    BatchReport, CageyError, Failure, MassSpecJob, MemoryStore, NmrJob, Pipeline, PrecursorFile, ReactionKey, Settings,
};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use nmr::PeakTable;
use serde::Serialize;
use turbidity::TurbidityRecord;

/// Screens imine cage reactions, printing one JSON object per reaction
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A JSON file of tolerances and thresholds; anything left out uses its default
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// How many worker threads to use (defaults to one per CPU)
    #[arg(short, long)]
    threads: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find cage ions in peak lists named like `AB-02-005_01_12.csv`
    MassSpec {
        /// A JSON file listing each reaction's precursors, and the formula of each precursor
        #[arg(short, long)]
        precursors: PathBuf,
        /// CSV peak lists with `mz` and `height` columns
        #[arg(required = true)]
        peak_lists: Vec<PathBuf>,
    },
    /// Classify turbidity exports, each in a directory named after its reaction
    Turbidity {
        #[arg(required = true)]
        exports: Vec<PathBuf>,
    },
    /// Extract aldehyde and imine peaks from picked NMR peak tables, each named after its reaction
    Nmr {
        #[arg(required = true)]
        peak_tables: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct Line<'a, T> {
    reaction: String,
    result: &'a T,
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CAGEY_LOG", "error,cagey=info"))
        .init();

    let args = Args::parse();
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(CageyError::from)?;
    }

    let settings = args
        .config
        .map(Settings::from_path)
        .transpose()?
        .unwrap_or_default();
    let pipeline = Pipeline::new(settings);

    match args.command {
        Command::MassSpec {
            precursors,
            peak_lists,
        } => {
            let (resolver, mut store) = PrecursorFile::from_path(precursors)?.into_parts()?;
            let (jobs, mut failures) = jobs(&peak_lists, |p| ReactionKey::from_path(p), MassSpecJob::new);
            let mut report = pipeline.mass_spec(&resolver, &mut store, &jobs);
            report.failures.append(&mut failures);
            print_report(report)
        }
        Command::Turbidity { exports } => {
            let mut store = MemoryStore::new();
            let (records, mut failures) = jobs(&exports, |p| ReactionKey::from_parent_dir(p), |key, path| (key, path));
            let mut keys = Vec::new();
            for (key, path) in records {
                match fs::read_to_string(&path)
                    .map_err(|source| CageyError::Io { path: path.clone(), source })
                    .and_then(|json| Ok(TurbidityRecord::from_json(&json)?))
                {
                    Ok(record) => {
                        store.insert_turbidity_record(key.clone(), record);
                        keys.push(key);
                    }
                    Err(error) => failures.push(Failure {
                        input: path.display().to_string(),
                        error,
                    }),
                }
            }
            let mut report = pipeline.turbidity(&mut store, &keys);
            report.failures.append(&mut failures);
            print_report(report)
        }
        Command::Nmr { peak_tables } => {
            let (jobs, mut failures) = jobs(&peak_tables, |p| ReactionKey::from_path(p), NmrJob::new);
            let mut report = pipeline.nmr(&PeakTable, &mut MemoryStore::new(), &jobs);
            report.failures.append(&mut failures);
            print_report(report)
        }
    }
}

fn jobs<J>(
    paths: &[PathBuf],
    key: impl Fn(&PathBuf) -> cagey::Result<ReactionKey>,
    job: impl Fn(ReactionKey, PathBuf) -> J,
) -> (Vec<J>, Vec<Failure>) {
    let mut jobs = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match key(path) {
            Ok(key) => jobs.push(job(key, path.clone())),
            Err(error) => failures.push(Failure {
                input: path.display().to_string(),
                error,
            }),
        }
    }
    (jobs, failures)
}

fn print_report<T: Serialize>(report: BatchReport<T>) -> Result<()> {
    for (key, result) in &report.successes {
        let line = Line {
            reaction: key.to_string(),
            result,
        };
        println!("{}", serde_json::to_string(&line).into_diagnostic()?);
    }
    for Failure { input, error } in report.failures {
        eprintln!("{:?}", miette::Report::new(error).wrap_err(format!("skipped {input}")));
    }
    Ok(())
}
