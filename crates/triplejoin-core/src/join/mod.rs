//! Equi-join algorithms over integer tables.
//!
//! This module provides two interchangeable join algorithms:
//! - HashJoin: index the cheaper input, probe with the other
//! - SortMerge: sort both inputs on the key, then merge
//!
//! Both emit the full cross product of every duplicate-key group and always
//! lay out output rows as left columns followed by right columns.

mod cost;
mod hash;
mod parallel;
mod sort_merge;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::table::Table;

pub use cost::{BuildSide, BuildSideEstimator, ByteSizeEstimator, EstimatorKind, RowCountEstimator};
pub use hash::HashJoinExecutor;
pub use parallel::{fork_join, parallel_sort};
pub use sort_merge::SortMergeExecutor;

/// A binary equi-join.
pub trait JoinExecutor {
    /// Join rows where `left[left_key] == right[right_key]`.
    fn join(
        &self,
        left: &Table,
        left_key: usize,
        right: &Table,
        right_key: usize,
    ) -> Result<Table, Error>;
}

/// Join algorithm selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinAlgorithm {
    /// Hash join - O(N+M) expected.
    #[default]
    Hash,
    /// Sort-merge join - O(N log N + M log M).
    SortMerge,
}

impl JoinAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            JoinAlgorithm::Hash => "hash",
            JoinAlgorithm::SortMerge => "sort-merge",
        }
    }
}

impl fmt::Display for JoinAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm plus its tuning knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Which algorithm every join uses.
    pub algorithm: JoinAlgorithm,
    /// Build-side heuristic for hash joins.
    pub estimator: EstimatorKind,
    /// Sort sort-merge inputs on two threads.
    pub parallel_sort: bool,
}

impl JoinConfig {
    pub fn new(algorithm: JoinAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the hash join build-side estimator.
    pub fn with_estimator(mut self, estimator: EstimatorKind) -> Self {
        self.estimator = estimator;
        self
    }

    /// Enable or disable parallel sorting for sort-merge joins.
    pub fn with_parallel_sort(mut self, enabled: bool) -> Self {
        self.parallel_sort = enabled;
        self
    }
}

impl JoinExecutor for JoinConfig {
    fn join(
        &self,
        left: &Table,
        left_key: usize,
        right: &Table,
        right_key: usize,
    ) -> Result<Table, Error> {
        execute_join(self, left, left_key, right, right_key)
    }
}

/// Execute a join using the configured algorithm.
pub fn execute_join(
    config: &JoinConfig,
    left: &Table,
    left_key: usize,
    right: &Table,
    right_key: usize,
) -> Result<Table, Error> {
    match config.algorithm {
        JoinAlgorithm::Hash => HashJoinExecutor::with_estimator(config.estimator)
            .execute(left, left_key, right, right_key),
        JoinAlgorithm::SortMerge => SortMergeExecutor::new()
            .with_parallel_sort(config.parallel_sort)
            .execute(left, left_key, right, right_key),
    }
}
