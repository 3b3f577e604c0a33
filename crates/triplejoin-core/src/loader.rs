//! Triple loader.
//!
//! Reads one triple per line in the form `subject<TAB>predicate<TAB>object`,
//! with an optional trailing ` .` on the object. Subjects and objects share
//! a single dictionary that assigns IDs from 1 in first-seen order; each
//! triple becomes a `(subject_id, object_id)` row in its predicate's table.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;
use crate::store::RelationStore;

/// Bidirectional term <-> ID dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    ids: HashMap<String, u64>,
    /// `terms[id - 1]` is the term for `id`.
    terms: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ID for `term`, assigning the next one if unseen.
    pub fn get_or_insert(&mut self, term: &str) -> u64 {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        self.terms.push(term.to_string());
        let id = self.terms.len() as u64;
        self.ids.insert(term.to_string(), id);
        id
    }

    pub fn id(&self, term: &str) -> Option<u64> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: u64) -> Option<&str> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.terms.get(index).map(String::as_str)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A loaded dataset: term dictionary plus relation store.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub dictionary: Dictionary,
    pub store: RelationStore,
    /// Number of triples read.
    pub triples: usize,
}

/// Split a line into `(subject, predicate, object)`.
///
/// Line terminators and a trailing ` .` are stripped from the object; fields
/// past the third are ignored. Returns `None` if a field is missing or empty.
pub fn parse_triple(line: &str) -> Option<(&str, &str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split('\t');

    let subject = fields.next()?;
    let predicate = fields.next()?;
    let object = fields.next()?;
    let object = object.strip_suffix(" .").unwrap_or(object);

    if subject.is_empty() || predicate.is_empty() || object.is_empty() {
        return None;
    }
    Some((subject, predicate, object))
}

/// Load triples from a buffered reader. Blank lines are skipped.
pub fn load_reader<R: BufRead>(reader: R) -> Result<Dataset, Error> {
    let mut dataset = Dataset::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (subject, predicate, object) =
            parse_triple(&line).ok_or(Error::MalformedTriple { line: index + 1 })?;

        let subject_id = dataset.dictionary.get_or_insert(subject);
        let object_id = dataset.dictionary.get_or_insert(object);
        dataset.store.append(predicate, subject_id, object_id)?;
        dataset.triples += 1;
    }

    tracing::info!(
        triples = dataset.triples,
        relations = dataset.store.len(),
        terms = dataset.dictionary.len(),
        "dataset loaded"
    );

    Ok(dataset)
}

/// Load triples from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Dataset, Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading dataset");
    let file = File::open(path)?;
    load_reader(BufReader::new(file))
}
