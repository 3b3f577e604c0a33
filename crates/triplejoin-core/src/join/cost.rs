//! Build-side estimation for hash joins.
//!
//! The hash join indexes the cheaper input and streams the other one. Which
//! input counts as cheaper is decided by a [`BuildSideEstimator`], so the
//! heuristic can be swapped without touching join correctness.

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Which input of a hash join gets indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSide {
    Left,
    Right,
}

/// Estimates the relative cost of holding a table in a hash index.
pub trait BuildSideEstimator {
    /// Cost of indexing `table`. Only the relative order matters.
    fn cost(&self, table: &Table) -> u64;

    /// Pick the build side: the left input when strictly cheaper, otherwise
    /// the right input.
    fn choose(&self, left: &Table, right: &Table) -> BuildSide {
        if self.cost(left) < self.cost(right) {
            BuildSide::Left
        } else {
            BuildSide::Right
        }
    }
}

/// Compares inputs by row count.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCountEstimator;

impl BuildSideEstimator for RowCountEstimator {
    fn cost(&self, table: &Table) -> u64 {
        table.len() as u64
    }
}

/// Compares inputs by payload bytes (rows x width x 8).
///
/// Differs from [`RowCountEstimator`] once intermediate results are wider
/// than base relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSizeEstimator;

impl BuildSideEstimator for ByteSizeEstimator {
    fn cost(&self, table: &Table) -> u64 {
        table.byte_size() as u64
    }
}

/// Estimator selection for configuration surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// See [`RowCountEstimator`].
    #[default]
    RowCount,
    /// See [`ByteSizeEstimator`].
    ByteSize,
}

impl BuildSideEstimator for EstimatorKind {
    fn cost(&self, table: &Table) -> u64 {
        match self {
            EstimatorKind::RowCount => RowCountEstimator.cost(table),
            EstimatorKind::ByteSize => ByteSizeEstimator.cost(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(width: usize, rows: usize) -> Table {
        let mut table = Table::new(width).unwrap();
        for i in 0..rows {
            table.push_row(&vec![i as u64; width]).unwrap();
        }
        table
    }

    #[test]
    fn test_row_count_choice() {
        let small = table(2, 3);
        let large = table(2, 10);

        assert_eq!(RowCountEstimator.choose(&small, &large), BuildSide::Left);
        assert_eq!(RowCountEstimator.choose(&large, &small), BuildSide::Right);
        // Ties build the right side
        assert_eq!(RowCountEstimator.choose(&small, &small), BuildSide::Right);
    }

    #[test]
    fn test_byte_size_accounts_for_width() {
        // 4 rows x 6 columns = 192 bytes vs 6 rows x 2 columns = 96 bytes
        let wide = table(6, 4);
        let narrow = table(2, 6);

        assert_eq!(RowCountEstimator.choose(&wide, &narrow), BuildSide::Left);
        assert_eq!(ByteSizeEstimator.choose(&wide, &narrow), BuildSide::Right);
        assert_eq!(EstimatorKind::ByteSize.choose(&wide, &narrow), BuildSide::Right);
    }

    #[test]
    fn test_estimator_kind_serde() {
        let kind: EstimatorKind = serde_json::from_str("\"byte_size\"").unwrap();
        assert_eq!(kind, EstimatorKind::ByteSize);
        assert_eq!(EstimatorKind::default(), EstimatorKind::RowCount);
    }
}
