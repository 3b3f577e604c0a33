//! triplejoin core - tables, join algorithms, and the fixed query pipeline.
//!
//! This crate evaluates equi-joins over binary relations loaded from
//! triple files, using either a hash join or a sort-merge join.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod error;
pub mod join;
pub mod loader;
pub mod pipeline;
pub mod store;
pub mod table;

pub use error::Error;
pub use join::{
    execute_join, BuildSide, BuildSideEstimator, ByteSizeEstimator, EstimatorKind,
    HashJoinExecutor, JoinAlgorithm, JoinConfig, JoinExecutor, RowCountEstimator,
    SortMergeExecutor,
};
pub use loader::{load_path, load_reader, Dataset, Dictionary};
pub use pipeline::{PipelineResult, PredicateSet, QueryPlanExecutor, StageReport};
pub use store::RelationStore;
pub use table::Table;
