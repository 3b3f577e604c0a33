//! Fixed three-stage join pipeline.
//!
//! Evaluates, over four predicates,
//!
//! ```text
//! friendOf.subject = follows.object
//!   AND friendOf.object = likes.subject
//!   AND likes.object = hasReview.subject
//! ```
//!
//! as a left-deep chain of three binary joins. Column positions follow from
//! the two-column base schema and the left-then-right concatenation rule, so
//! they are fixed constants rather than derived at run time.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::join::JoinExecutor;
use crate::store::RelationStore;
use crate::table::Table;

/// Stage 1: friendOf.subject = follows.object
const STAGE1_KEYS: (usize, usize) = (0, 1);
/// Stage 2: stage1 column 1 (friendOf.object) = likes.subject
const STAGE2_KEYS: (usize, usize) = (1, 0);
/// Columns of stage 2 kept for stage 3; drops friendOf.subject.
const STAGE3_PROJECTION: [usize; 5] = [1, 2, 3, 4, 5];
/// Stage 3: projected column 4 (likes.object) = hasReview.subject
const STAGE3_KEYS: (usize, usize) = (4, 0);

/// Predicate names of the four relations the pipeline reads.
///
/// Datasets spell predicates differently (prefixed names vs full URIs), so
/// the caller supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    pub follows: String,
    pub friend_of: String,
    pub likes: String,
    pub has_review: String,
}

impl PredicateSet {
    pub fn new(
        follows: impl Into<String>,
        friend_of: impl Into<String>,
        likes: impl Into<String>,
        has_review: impl Into<String>,
    ) -> Self {
        Self {
            follows: follows.into(),
            friend_of: friend_of.into(),
            likes: likes.into(),
            has_review: has_review.into(),
        }
    }

    /// Prefixed names used by the small WatDiv sample.
    pub fn short() -> Self {
        Self::new("wsdbm:follows", "wsdbm:friendOf", "wsdbm:likes", "rev:hasReview")
    }

    /// Full URIs used by the WatDiv N-Triples dumps.
    pub fn watdiv_uri() -> Self {
        Self::new(
            "<http://db.uwaterloo.ca/~galuc/wsdbm/follows>",
            "<http://db.uwaterloo.ca/~galuc/wsdbm/friendOf>",
            "<http://db.uwaterloo.ca/~galuc/wsdbm/likes>",
            "<http://purl.org/stuff/rev#hasReview>",
        )
    }

    /// Parse a predicate set from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for PredicateSet {
    fn default() -> Self {
        Self::short()
    }
}

/// Timing and cardinality of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub name: &'static str,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Final joined table (width 7).
    pub table: Table,
    /// Wall-clock time of all three stages.
    pub elapsed: Duration,
    /// Per-stage breakdown, in execution order.
    pub stages: Vec<StageReport>,
}

impl PipelineResult {
    pub fn row_count(&self) -> usize {
        self.table.len()
    }
}

/// Runs the fixed pipeline against a relation store.
pub struct QueryPlanExecutor<'a> {
    store: &'a RelationStore,
}

impl<'a> QueryPlanExecutor<'a> {
    pub fn new(store: &'a RelationStore) -> Self {
        Self { store }
    }

    /// Execute the three stages with `join` and the given predicates.
    ///
    /// All four relations are resolved before any join runs.
    pub fn execute<J>(&self, predicates: &PredicateSet, join: &J) -> Result<PipelineResult, Error>
    where
        J: JoinExecutor + ?Sized,
    {
        let follows = self.store.get(&predicates.follows)?;
        let friend_of = self.store.get(&predicates.friend_of)?;
        let likes = self.store.get(&predicates.likes)?;
        let has_review = self.store.get(&predicates.has_review)?;

        let mut stages = Vec::with_capacity(3);
        let start = Instant::now();

        let stage_start = Instant::now();
        let stage1 = join.join(friend_of, STAGE1_KEYS.0, follows, STAGE1_KEYS.1)?;
        stages.push(record_stage("friendOf_follows", &stage1, stage_start));

        let stage_start = Instant::now();
        let stage2 = join.join(&stage1, STAGE2_KEYS.0, likes, STAGE2_KEYS.1)?;
        drop(stage1);
        stages.push(record_stage("likes", &stage2, stage_start));

        let stage_start = Instant::now();
        let projected = stage2.project(&STAGE3_PROJECTION)?;
        drop(stage2);
        let stage3 = join.join(&projected, STAGE3_KEYS.0, has_review, STAGE3_KEYS.1)?;
        stages.push(record_stage("hasReview", &stage3, stage_start));

        let elapsed = start.elapsed();
        tracing::debug!(rows = stage3.len(), ?elapsed, "pipeline complete");

        Ok(PipelineResult {
            table: stage3,
            elapsed,
            stages,
        })
    }
}

fn record_stage(name: &'static str, output: &Table, started: Instant) -> StageReport {
    let report = StageReport {
        name,
        rows: output.len(),
        elapsed: started.elapsed(),
    };
    tracing::debug!(
        stage = report.name,
        rows = report.rows,
        elapsed = ?report.elapsed,
        "stage complete"
    );
    report
}
