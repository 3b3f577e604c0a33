//! Command-line arguments and run configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use triplejoin_core::{EstimatorKind, JoinAlgorithm, JoinConfig, PredicateSet};

use crate::executor::RunError;
use crate::formatter::OutputFormat;

/// Which algorithm(s) to run the pipeline with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Hash,
    SortMerge,
    /// Hash join first, then sort-merge join
    Both,
}

/// Build-side heuristic for hash joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimatorArg {
    /// Build on the input with fewer rows
    Rows,
    /// Build on the input with fewer payload bytes
    Bytes,
}

impl From<EstimatorArg> for EstimatorKind {
    fn from(arg: EstimatorArg) -> Self {
        match arg {
            EstimatorArg::Rows => EstimatorKind::RowCount,
            EstimatorArg::Bytes => EstimatorKind::ByteSize,
        }
    }
}

/// Built-in predicate spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PredicatePreset {
    /// Prefixed names (wsdbm:follows, ...)
    Short,
    /// Full WatDiv URIs
    Uri,
}

impl From<PredicatePreset> for PredicateSet {
    fn from(preset: PredicatePreset) -> Self {
        match preset {
            PredicatePreset::Short => PredicateSet::short(),
            PredicatePreset::Uri => PredicateSet::watdiv_uri(),
        }
    }
}

/// Run the friendOf/follows/likes/hasReview join pipeline over a triple file.
#[derive(Parser, Debug)]
#[command(name = "triplejoin")]
#[command(version, about = "Hash vs sort-merge join pipeline runner", long_about = None)]
pub struct Args {
    /// Tab-separated triple file (subject, predicate, object)
    pub dataset: PathBuf,

    /// Join algorithm
    #[arg(short, long, default_value = "both", value_enum)]
    pub algorithm: AlgorithmArg,

    /// Sort both sort-merge inputs on two threads
    #[arg(long)]
    pub parallel_sort: bool,

    /// Hash join build-side estimator
    #[arg(long, default_value = "rows", value_enum)]
    pub estimator: EstimatorArg,

    /// Predicate spelling used by the dataset
    #[arg(short, long, default_value = "short", value_enum)]
    pub predicates: PredicatePreset,

    /// JSON file with custom predicate names (overrides --predicates)
    #[arg(long)]
    pub predicates_file: Option<PathBuf>,

    /// Number of pipeline runs per algorithm
    #[arg(short, long, default_value_t = 1)]
    pub repeat: usize,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,
}

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dataset: PathBuf,
    pub predicates: PredicateSet,
    pub joins: Vec<JoinConfig>,
    pub repeat: usize,
    pub format: OutputFormat,
}

impl Args {
    /// Convert command-line arguments to a run configuration.
    pub fn into_config(self) -> Result<RunConfig, RunError> {
        let predicates = match &self.predicates_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                PredicateSet::from_json(&json)?
            }
            None => self.predicates.into(),
        };

        let algorithms: &[JoinAlgorithm] = match self.algorithm {
            AlgorithmArg::Hash => &[JoinAlgorithm::Hash],
            AlgorithmArg::SortMerge => &[JoinAlgorithm::SortMerge],
            AlgorithmArg::Both => &[JoinAlgorithm::Hash, JoinAlgorithm::SortMerge],
        };
        let joins = algorithms
            .iter()
            .map(|&algorithm| {
                JoinConfig::new(algorithm)
                    .with_estimator(self.estimator.into())
                    .with_parallel_sort(self.parallel_sort)
            })
            .collect();

        Ok(RunConfig {
            dataset: self.dataset,
            predicates,
            joins,
            repeat: self.repeat.max(1),
            format: self.format,
        })
    }
}
