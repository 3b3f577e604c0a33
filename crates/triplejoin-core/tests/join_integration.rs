//! Integration tests for the join engine and pipeline.

use triplejoin_core::join::parallel_sort;
use triplejoin_core::{
    load_reader, EstimatorKind, JoinAlgorithm, JoinConfig, JoinExecutor, PredicateSet,
    QueryPlanExecutor, RelationStore, Table,
};

fn configs() -> Vec<JoinConfig> {
    vec![
        JoinConfig::new(JoinAlgorithm::Hash),
        JoinConfig::new(JoinAlgorithm::Hash).with_estimator(EstimatorKind::ByteSize),
        JoinConfig::new(JoinAlgorithm::SortMerge),
        JoinConfig::new(JoinAlgorithm::SortMerge).with_parallel_sort(true),
    ]
}

fn pairs(rows: &[[u64; 2]]) -> Table {
    Table::from_rows(2, rows).unwrap()
}

/// A small social graph in the triple text format.
fn social_graph() -> String {
    let mut lines = Vec::new();
    for user in 0..30 {
        lines.push(format!(
            "wsdbm:User{user}\twsdbm:follows\twsdbm:User{} .",
            (user * 7 + 3) % 30
        ));
        lines.push(format!(
            "wsdbm:User{user}\twsdbm:friendOf\twsdbm:User{} .",
            (user * 11 + 5) % 30
        ));
        if user % 3 != 0 {
            lines.push(format!(
                "wsdbm:User{user}\twsdbm:friendOf\twsdbm:User{} .",
                (user + 1) % 30
            ));
        }
        for product in [user % 8, (user * 5) % 8] {
            lines.push(format!("wsdbm:User{user}\twsdbm:likes\twsdbm:Product{product} ."));
        }
    }
    for product in 0..8 {
        for review in 0..(product % 3 + 1) {
            lines.push(format!(
                "wsdbm:Product{product}\trev:hasReview\twsdbm:Review{product}_{review} ."
            ));
        }
    }
    lines.join("\n")
}

#[test]
fn test_concrete_scenario_all_algorithms() {
    let a = pairs(&[[1, 10], [2, 10], [3, 20]]);
    let b = pairs(&[[10, 100], [10, 200], [20, 300]]);

    for config in configs() {
        let result = config.join(&a, 1, &b, 0).unwrap();
        assert_eq!(
            result.sorted_rows(),
            vec![
                vec![1, 10, 10, 100],
                vec![1, 10, 10, 200],
                vec![2, 10, 10, 100],
                vec![2, 10, 10, 200],
                vec![3, 20, 20, 300],
            ],
            "{config:?}"
        );
    }
}

#[test]
fn test_unique_keys_equivalence() {
    let a = Table::from_rows(2, (0..100u64).map(|i| [i, (i * 37) % 101])).unwrap();
    let b = Table::from_rows(2, (0..80u64).map(|i| [(i * 53) % 101, i + 1000])).unwrap();

    let hash = JoinConfig::new(JoinAlgorithm::Hash).join(&a, 1, &b, 0).unwrap();
    let merge = JoinConfig::new(JoinAlgorithm::SortMerge).join(&a, 1, &b, 0).unwrap();

    assert!(!hash.is_empty());
    assert_eq!(hash.sorted_rows(), merge.sorted_rows());
}

#[test]
fn test_empty_input_law() {
    let empty = Table::new(2).unwrap();
    let a = pairs(&[[1, 2], [2, 3]]);

    for config in configs() {
        assert!(config.join(&empty, 0, &a, 1).unwrap().is_empty());
        assert!(config.join(&a, 0, &empty, 1).unwrap().is_empty());
        assert!(config.join(&empty, 0, &empty, 0).unwrap().is_empty());
    }
}

#[test]
fn test_sort_consistency() {
    let table = Table::from_rows(
        3,
        (0..1000u64).map(|i| [i, (i * 2654435761) % 97, i ^ 0x5a]),
    )
    .unwrap();

    let sequential = table.sorted_by(1).unwrap();
    let (parallel, _) = parallel_sort(&table, 1, &table, 2).unwrap();

    let seq_keys: Vec<u64> = sequential.column(1).unwrap().collect();
    let par_keys: Vec<u64> = parallel.column(1).unwrap().collect();
    assert_eq!(seq_keys, par_keys);
    // Every row keeps its own key
    assert_eq!(sequential.sorted_rows(), parallel.sorted_rows());
    assert_eq!(parallel.sorted_rows(), table.sorted_rows());
}

#[test]
fn test_pipeline_deterministic_across_runs_and_algorithms() {
    let dataset = load_reader(social_graph().as_bytes()).unwrap();
    let executor = QueryPlanExecutor::new(&dataset.store);
    let predicates = PredicateSet::short();

    let reference = executor
        .execute(&predicates, &JoinConfig::new(JoinAlgorithm::Hash))
        .unwrap();
    assert!(reference.row_count() > 0);
    assert_eq!(reference.table.width(), 7);

    for config in configs() {
        for _ in 0..2 {
            let result = executor.execute(&predicates, &config).unwrap();
            assert_eq!(
                result.table.sorted_rows(),
                reference.table.sorted_rows(),
                "{config:?}"
            );
            assert_eq!(result.stages.len(), 3);
        }
    }
}

#[test]
fn test_pipeline_matches_naive_evaluation() {
    let dataset = load_reader(social_graph().as_bytes()).unwrap();
    let store = &dataset.store;
    let p = PredicateSet::short();

    let follows = store.get(&p.follows).unwrap();
    let friend_of = store.get(&p.friend_of).unwrap();
    let likes = store.get(&p.likes).unwrap();
    let has_review = store.get(&p.has_review).unwrap();

    // Nested loops over the same query
    let mut expected = Vec::new();
    for fr in friend_of.rows() {
        for fo in follows.rows().filter(|fo| fo[1] == fr[0]) {
            for li in likes.rows().filter(|li| li[0] == fr[1]) {
                for hr in has_review.rows().filter(|hr| hr[0] == li[1]) {
                    expected.push(vec![fr[1], fo[0], fo[1], li[0], li[1], hr[0], hr[1]]);
                }
            }
        }
    }
    expected.sort_unstable();

    let result = QueryPlanExecutor::new(store)
        .execute(&p, &JoinConfig::new(JoinAlgorithm::SortMerge))
        .unwrap();
    assert_eq!(result.table.sorted_rows(), expected);
}

#[test]
fn test_pipeline_with_custom_predicates() {
    let mut store = RelationStore::new();
    store.insert("f", pairs(&[[1, 2]])).unwrap();
    store.insert("fo", pairs(&[[2, 3]])).unwrap();
    store.insert("l", pairs(&[[3, 4]])).unwrap();
    store.insert("hr", Table::new(2).unwrap()).unwrap();

    let predicates = PredicateSet::new("f", "fo", "l", "hr");
    let result = QueryPlanExecutor::new(&store)
        .execute(&predicates, &JoinConfig::new(JoinAlgorithm::SortMerge))
        .unwrap();

    // Empty hasReview empties the final stage only
    assert_eq!(result.row_count(), 0);
    let rows: Vec<usize> = result.stages.iter().map(|s| s.rows).collect();
    assert_eq!(rows, vec![1, 1, 0]);
}
