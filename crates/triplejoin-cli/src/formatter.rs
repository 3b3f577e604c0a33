//! Output formatters for pipeline reports.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use triplejoin_core::Dataset;

use crate::executor::RunReport;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format a summary of the loaded dataset.
    fn format_dataset(&self, dataset: &Dataset, load_secs: f64) -> String;

    /// Format pipeline run reports.
    fn format_reports(&self, reports: &[RunReport]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_dataset(&self, dataset: &Dataset, load_secs: f64) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Predicate", "Rows"]);

        for predicate in dataset.store.predicates() {
            let rows = dataset.store.get(predicate).map(|t| t.len()).unwrap_or(0);
            table.add_row(vec![Cell::new(predicate), Cell::new(rows)]);
        }

        format!(
            "Loaded {} triples, {} terms in {:.3}s\n{}",
            dataset.triples,
            dataset.dictionary.len(),
            load_secs,
            table
        )
    }

    fn format_reports(&self, reports: &[RunReport]) -> String {
        if reports.is_empty() {
            return "No runs".to_string();
        }

        let mut table = Table::new();
        let mut headers = vec![
            Cell::new("Algorithm"),
            Cell::new("Run"),
            Cell::new("Rows"),
            Cell::new("Runtime (s)"),
        ];
        if let Some(first) = reports.first() {
            for stage in &first.stages {
                headers.push(Cell::new(format!("{} (s)", stage.name)));
            }
        }
        table.set_header(headers);

        for report in reports {
            let algorithm = if report.parallel_sort {
                format!("{} (parallel sort)", report.algorithm)
            } else {
                report.algorithm.to_string()
            };

            let mut row = vec![
                Cell::new(algorithm),
                Cell::new(report.run),
                Cell::new(report.rows),
                Cell::new(format!("{:.6}", report.elapsed.as_secs_f64())),
            ];
            for stage in &report.stages {
                row.push(Cell::new(format!("{:.6}", stage.elapsed.as_secs_f64())));
            }
            table.add_row(row);
        }

        table.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_dataset(&self, dataset: &Dataset, load_secs: f64) -> String {
        let relations: serde_json::Map<String, serde_json::Value> = dataset
            .store
            .predicates()
            .into_iter()
            .map(|p| {
                let rows = dataset.store.get(p).map(|t| t.len()).unwrap_or(0);
                (p.to_string(), serde_json::Value::from(rows))
            })
            .collect();

        serde_json::json!({
            "triples": dataset.triples,
            "terms": dataset.dictionary.len(),
            "load_secs": load_secs,
            "relations": relations,
        })
        .to_string()
    }

    fn format_reports(&self, reports: &[RunReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use triplejoin_core::{load_reader, JoinAlgorithm, StageReport};

    fn reports() -> Vec<RunReport> {
        vec![RunReport {
            algorithm: JoinAlgorithm::SortMerge,
            parallel_sort: true,
            run: 1,
            rows: 42,
            elapsed: Duration::from_millis(1500),
            stages: vec![StageReport {
                name: "hasReview",
                rows: 42,
                elapsed: Duration::from_millis(500),
            }],
        }]
    }

    #[test]
    fn test_table_reports() {
        let output = TableFormatter.format_reports(&reports());

        assert!(output.contains("sort-merge (parallel sort)"));
        assert!(output.contains("42"));
        assert!(output.contains("1.500000"));
        assert!(output.contains("hasReview (s)"));
        assert_eq!(TableFormatter.format_reports(&[]), "No runs");
    }

    #[test]
    fn test_json_reports() {
        let output = JsonFormatter.format_reports(&reports());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["algorithm"], "sort_merge");
        assert_eq!(value[0]["rows"], 42);
        assert_eq!(value[0]["stages"][0]["name"], "hasReview");
    }

    #[test]
    fn test_dataset_summary() {
        let dataset = load_reader("a\tp\tb .\nb\tp\tc .\nc\tq\ta .\n".as_bytes()).unwrap();

        let table = TableFormatter.format_dataset(&dataset, 0.25);
        assert!(table.contains("Loaded 3 triples, 3 terms"));

        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_dataset(&dataset, 0.25)).unwrap();
        assert_eq!(json["relations"]["p"], 2);
        assert_eq!(json["relations"]["q"], 1);
    }
}
