//! Benchmark harness helpers.

use triplejoin_core::{
    JoinConfig, PipelineResult, PredicateSet, QueryPlanExecutor, RelationStore, Table,
};

use crate::fixtures::{generate_store, Scale};

/// Pre-generated relations for one benchmark scale.
pub struct BenchContext {
    pub store: RelationStore,
    pub predicates: PredicateSet,
}

impl BenchContext {
    /// Create a context populated at the given scale.
    pub fn with_scale(scale: Scale) -> Self {
        let predicates = PredicateSet::short();
        let store = generate_store(scale, &predicates);
        Self { store, predicates }
    }

    /// Look up one of the generated relations.
    pub fn relation(&self, predicate: &str) -> &Table {
        self.store.get(predicate).unwrap()
    }

    /// Run the full pipeline once.
    pub fn run_pipeline(&self, join: &JoinConfig) -> PipelineResult {
        QueryPlanExecutor::new(&self.store)
            .execute(&self.predicates, join)
            .unwrap()
    }
}

impl Default for BenchContext {
    fn default() -> Self {
        Self::with_scale(Scale::default())
    }
}
