//! triplejoin Benchmark Suite
//!
//! Criterion benchmarks comparing the join algorithms.
//!
//! # Benchmark Categories
//!
//! - **Join**: single binary joins (hash vs sort-merge, sequential vs parallel sort)
//! - **Pipeline**: the full three-stage query at several scales

pub mod fixtures;
pub mod harness;

pub use fixtures::{generate_store, random_pairs, to_triple_text, Scale};
pub use harness::BenchContext;
