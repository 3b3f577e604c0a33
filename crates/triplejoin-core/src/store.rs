//! Relation store: predicate name to two-column table.

use std::collections::HashMap;

use crate::error::Error;
use crate::table::Table;

/// Width of every base relation: (subject_id, object_id).
pub const BASE_WIDTH: usize = 2;

/// Mapping from predicate name to its (subject_id, object_id) table.
///
/// Populated once by the loader; joins only ever read from it.
#[derive(Debug, Clone, Default)]
pub struct RelationStore {
    relations: HashMap<String, Table>,
}

impl RelationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation, replacing any existing table for the predicate.
    pub fn insert(&mut self, predicate: impl Into<String>, table: Table) -> Result<(), Error> {
        if table.width() != BASE_WIDTH {
            return Err(Error::RowWidthMismatch {
                expected: BASE_WIDTH,
                actual: table.width(),
            });
        }
        self.relations.insert(predicate.into(), table);
        Ok(())
    }

    /// Append one (subject_id, object_id) pair to a predicate's table.
    pub(crate) fn append(&mut self, predicate: &str, subject: u64, object: u64) -> Result<(), Error> {
        match self.relations.get_mut(predicate) {
            Some(table) => table.push_row(&[subject, object]),
            None => {
                let mut table = Table::new(BASE_WIDTH)?;
                table.push_row(&[subject, object])?;
                self.relations.insert(predicate.to_string(), table);
                Ok(())
            }
        }
    }

    /// Look up a relation by predicate name.
    pub fn get(&self, predicate: &str) -> Result<&Table, Error> {
        self.relations
            .get(predicate)
            .ok_or_else(|| Error::RelationNotFound(predicate.to_string()))
    }

    pub fn contains(&self, predicate: &str) -> bool {
        self.relations.contains_key(predicate)
    }

    /// Predicate names in sorted order.
    pub fn predicates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.relations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Total number of rows across all relations.
    pub fn total_rows(&self) -> usize {
        self.relations.values().map(Table::len).sum()
    }
}
