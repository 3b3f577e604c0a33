//! Pipeline execution for the CLI.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use triplejoin_core::{Dataset, JoinAlgorithm, JoinConfig, QueryPlanExecutor, StageReport};

use crate::config::RunConfig;

/// Execution errors.
#[derive(Debug, Error)]
pub enum RunError {
    /// Join engine or loader error.
    #[error(transparent)]
    Core(#[from] triplejoin_core::Error),

    /// Reading a configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Two runs of the same pipeline disagreed on row count.
    #[error("{algorithm} runs disagree: {first} vs {other} rows")]
    Nondeterministic {
        algorithm: JoinAlgorithm,
        first: usize,
        other: usize,
    },
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub algorithm: JoinAlgorithm,
    pub parallel_sort: bool,
    pub run: usize,
    pub rows: usize,
    pub elapsed: Duration,
    pub stages: Vec<StageReport>,
}

/// Run the pipeline `config.repeat` times for each configured algorithm.
pub fn run_pipeline(dataset: &Dataset, config: &RunConfig) -> Result<Vec<RunReport>, RunError> {
    let executor = QueryPlanExecutor::new(&dataset.store);
    let mut reports = Vec::with_capacity(config.joins.len() * config.repeat);

    for join in &config.joins {
        let mut first_rows = None;
        for run in 1..=config.repeat {
            let result = executor.execute(&config.predicates, join)?;
            let rows = result.row_count();

            match first_rows {
                None => first_rows = Some(rows),
                Some(first) if first != rows => {
                    return Err(RunError::Nondeterministic {
                        algorithm: join.algorithm,
                        first,
                        other: rows,
                    });
                }
                Some(_) => {}
            }

            tracing::info!(
                algorithm = %join.algorithm,
                run,
                rows,
                elapsed = ?result.elapsed,
                "pipeline run finished"
            );

            reports.push(report(join, run, rows, result.elapsed, result.stages));
        }
    }

    Ok(reports)
}

fn report(
    join: &JoinConfig,
    run: usize,
    rows: usize,
    elapsed: Duration,
    stages: Vec<StageReport>,
) -> RunReport {
    RunReport {
        algorithm: join.algorithm,
        parallel_sort: join.algorithm == JoinAlgorithm::SortMerge && join.parallel_sort,
        run,
        rows,
        elapsed,
        stages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::OutputFormat;
    use triplejoin_core::{load_reader, PredicateSet};

    fn dataset() -> Dataset {
        let data = "\
a\twsdbm:follows\tb .
c\twsdbm:friendOf\td .
b\twsdbm:friendOf\tc .
c\twsdbm:likes\tp .
p\trev:hasReview\tr1 .
p\trev:hasReview\tr2 .
";
        load_reader(data.as_bytes()).unwrap()
    }

    fn config(joins: Vec<JoinConfig>) -> RunConfig {
        RunConfig {
            dataset: "unused".into(),
            predicates: PredicateSet::short(),
            joins,
            repeat: 2,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_reports_per_algorithm_and_run() {
        let dataset = dataset();
        let config = config(vec![
            JoinConfig::new(JoinAlgorithm::Hash),
            JoinConfig::new(JoinAlgorithm::SortMerge).with_parallel_sort(true),
        ]);

        let reports = run_pipeline(&dataset, &config).unwrap();

        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|r| r.rows == 2));
        assert_eq!(reports[1].run, 2);
        assert!(!reports[0].parallel_sort);
        assert!(reports[2].parallel_sort);
    }

    #[test]
    fn test_missing_relation_surfaces() {
        let dataset = load_reader("a\twsdbm:follows\tb .\n".as_bytes()).unwrap();
        let err = run_pipeline(&dataset, &config(vec![JoinConfig::default()])).unwrap_err();

        assert!(matches!(
            err,
            RunError::Core(triplejoin_core::Error::RelationNotFound(_))
        ));
    }
}
