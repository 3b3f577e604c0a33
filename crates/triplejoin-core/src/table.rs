//! Fixed-width integer tables.
//!
//! A [`Table`] stores rows of `u64` values in a single row-major buffer.
//! Base relations have two columns (subject_id, object_id); join outputs
//! have the combined width of their inputs.

use crate::error::Error;

/// An ordered sequence of fixed-width rows of unsigned integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    width: usize,
    data: Vec<u64>,
}

impl Table {
    /// Create an empty table with the given number of columns.
    pub fn new(width: usize) -> Result<Self, Error> {
        if width == 0 {
            return Err(Error::InvalidWidth);
        }
        Ok(Self {
            width,
            data: Vec::new(),
        })
    }

    /// Create an empty table, reserving space for `rows` rows.
    pub fn with_capacity(width: usize, rows: usize) -> Result<Self, Error> {
        let mut table = Self::new(width)?;
        table.data.reserve(rows.saturating_mul(width));
        Ok(table)
    }

    /// Build a table from a list of rows, checking each row's width.
    pub fn from_rows<R>(width: usize, rows: impl IntoIterator<Item = R>) -> Result<Self, Error>
    where
        R: AsRef<[u64]>,
    {
        let mut table = Self::new(width)?;
        for row in rows {
            table.push_row(row.as_ref())?;
        }
        Ok(table)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload size in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len() * std::mem::size_of::<u64>()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: &[u64]) -> Result<(), Error> {
        if row.len() != self.width {
            return Err(Error::RowWidthMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Append `left` followed by `right` as one row.
    ///
    /// Callers guarantee `left.len() + right.len() == self.width()`.
    pub(crate) fn push_concat(&mut self, left: &[u64], right: &[u64]) {
        debug_assert_eq!(left.len() + right.len(), self.width);
        self.data.extend_from_slice(left);
        self.data.extend_from_slice(right);
    }

    /// Get a row by position.
    pub fn row(&self, index: usize) -> Option<&[u64]> {
        let start = index.checked_mul(self.width)?;
        self.data.get(start..start + self.width)
    }

    /// Iterate over rows in storage order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u64]> + '_ {
        self.data.chunks_exact(self.width)
    }

    /// Iterate over the values of one column.
    pub fn column(&self, column: usize) -> Result<impl Iterator<Item = u64> + '_, Error> {
        self.check_column(column)?;
        Ok(self.rows().map(move |row| row[column]))
    }

    /// Fail with [`Error::ColumnOutOfRange`] unless `column < width`.
    pub fn check_column(&self, column: usize) -> Result<(), Error> {
        if column >= self.width {
            return Err(Error::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Copy the listed columns, in the listed order, into a new table.
    pub fn project(&self, columns: &[usize]) -> Result<Table, Error> {
        for &column in columns {
            self.check_column(column)?;
        }

        let mut projected = Table::with_capacity(columns.len(), self.len())?;
        for row in self.rows() {
            projected.data.extend(columns.iter().map(|&c| row[c]));
        }
        Ok(projected)
    }

    /// Return a private copy sorted ascending on `column`.
    ///
    /// The sort is stable: rows with equal keys keep their relative order.
    pub fn sorted_by(&self, column: usize) -> Result<Table, Error> {
        self.check_column(column)?;

        let width = self.width;
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.data[i * width + column]);

        let mut sorted = Table::with_capacity(width, self.len())?;
        for i in order {
            sorted
                .data
                .extend_from_slice(&self.data[i * width..(i + 1) * width]);
        }
        Ok(sorted)
    }

    /// Rows as owned vectors in lexicographic order.
    ///
    /// Useful for order-independent comparison of join outputs.
    pub fn sorted_rows(&self) -> Vec<Vec<u64>> {
        let mut rows: Vec<Vec<u64>> = self.rows().map(<[u64]>::to_vec).collect();
        rows.sort_unstable();
        rows
    }
}
