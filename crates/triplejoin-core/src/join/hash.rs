//! Hash join.
//!
//! Algorithm:
//! 1. Build phase: index the cheaper input as `HashMap<key, Vec<row>>`
//! 2. Probe phase: stream the other input, emitting one row per match
//!
//! Complexity: O(N + M) expected, degrading toward O(N * M) under heavy key skew.

use std::collections::HashMap;

use crate::error::Error;
use crate::table::Table;

use super::cost::{BuildSide, BuildSideEstimator, RowCountEstimator};
use super::JoinExecutor;

/// Hash join executor with a pluggable build-side estimator.
#[derive(Debug, Clone, Default)]
pub struct HashJoinExecutor<E = RowCountEstimator> {
    estimator: E,
}

impl HashJoinExecutor {
    /// Create an executor that builds on the side with fewer rows.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: BuildSideEstimator> HashJoinExecutor<E> {
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    /// Join `left` and `right` where `left[left_key] == right[right_key]`.
    ///
    /// Output rows are always `left` columns followed by `right` columns,
    /// whichever side was indexed.
    pub fn execute(
        &self,
        left: &Table,
        left_key: usize,
        right: &Table,
        right_key: usize,
    ) -> Result<Table, Error> {
        left.check_column(left_key)?;
        right.check_column(right_key)?;

        let side = self.estimator.choose(left, right);
        let mut output = Table::new(left.width() + right.width())?;

        match side {
            BuildSide::Left => {
                let index = build_index(left, left_key);
                for probe in right.rows() {
                    if let Some(matches) = index.get(&probe[right_key]) {
                        for build in matches {
                            output.push_concat(build, probe);
                        }
                    }
                }
            }
            BuildSide::Right => {
                let index = build_index(right, right_key);
                for probe in left.rows() {
                    if let Some(matches) = index.get(&probe[left_key]) {
                        for build in matches {
                            output.push_concat(probe, build);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            build_side = ?side,
            left_rows = left.len(),
            right_rows = right.len(),
            output_rows = output.len(),
            "hash join complete"
        );

        Ok(output)
    }
}

impl<E: BuildSideEstimator> JoinExecutor for HashJoinExecutor<E> {
    fn join(
        &self,
        left: &Table,
        left_key: usize,
        right: &Table,
        right_key: usize,
    ) -> Result<Table, Error> {
        self.execute(left, left_key, right, right_key)
    }
}

/// Multimap from key to rows, each list in insertion order.
fn build_index(table: &Table, key: usize) -> HashMap<u64, Vec<&[u64]>> {
    let mut index: HashMap<u64, Vec<&[u64]>> = HashMap::new();
    for row in table.rows() {
        index.entry(row[key]).or_default().push(row);
    }
    index
}
