//! Sort-merge join.
//!
//! Both inputs are copied and sorted on their join keys (optionally on two
//! threads), then merged with two cursors. When the cursors meet on equal
//! keys, the duplicate-key group on each side is measured and the full
//! group cross product is emitted, so the result matches the hash join row
//! for row (up to order).

use std::cmp::Ordering;

use crate::error::Error;
use crate::table::Table;

use super::parallel::parallel_sort;
use super::JoinExecutor;

/// Sort-merge join executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortMergeExecutor {
    parallel_sort: bool,
}

impl SortMergeExecutor {
    /// Create an executor that sorts both inputs sequentially.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort the two inputs concurrently.
    pub fn with_parallel_sort(mut self, enabled: bool) -> Self {
        self.parallel_sort = enabled;
        self
    }

    pub fn parallel_sort(&self) -> bool {
        self.parallel_sort
    }

    /// Join `left` and `right` where `left[left_key] == right[right_key]`.
    pub fn execute(
        &self,
        left: &Table,
        left_key: usize,
        right: &Table,
        right_key: usize,
    ) -> Result<Table, Error> {
        left.check_column(left_key)?;
        right.check_column(right_key)?;

        let (sorted_left, sorted_right) = if self.parallel_sort {
            parallel_sort(left, left_key, right, right_key)?
        } else {
            (left.sorted_by(left_key)?, right.sorted_by(right_key)?)
        };

        let output = merge(&sorted_left, left_key, &sorted_right, right_key)?;

        tracing::debug!(
            parallel_sort = self.parallel_sort,
            left_rows = left.len(),
            right_rows = right.len(),
            output_rows = output.len(),
            "sort-merge join complete"
        );

        Ok(output)
    }
}

impl JoinExecutor for SortMergeExecutor {
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

/// Merge two tables already sorted ascending on their key columns.
fn merge(left: &Table, left_key: usize, right: &Table, right_key: usize) -> Result<Table, Error> {
    let mut output = Table::new(left.width() + right.width())?;
    let left_rows: Vec<&[u64]> = left.rows().collect();
    let right_rows: Vec<&[u64]> = right.rows().collect();

    let mut r = 0;
    let mut q = 0;
    while r < left_rows.len() && q < right_rows.len() {
        let key = left_rows[r][left_key];
        match key.cmp(&right_rows[q][right_key]) {
            Ordering::Less => r += 1,
            Ordering::Greater => q += 1,
            Ordering::Equal => {
                let r_end = group_end(&left_rows, left_key, r);
                let q_end = group_end(&right_rows, right_key, q);

                for left_row in &left_rows[r..r_end] {
                    for right_row in &right_rows[q..q_end] {
                        output.push_concat(left_row, right_row);
                    }
                }

                r = r_end;
                q = q_end;
            }
        }
    }

    Ok(output)
}

/// One past the last row sharing `rows[start][key]`.
fn group_end(rows: &[&[u64]], key: usize, start: usize) -> usize {
    let value = rows[start][key];
    start
        + rows[start..]
            .iter()
            .take_while(|row| row[key] == value)
            .count()
}
