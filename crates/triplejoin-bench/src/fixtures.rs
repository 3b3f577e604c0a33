//! Test data generation for benchmarks.
//!
//! Generates a synthetic social graph in the shape of the WatDiv data the
//! pipeline was written for. All generators are seeded for reproducibility.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use triplejoin_core::{PredicateSet, RelationStore, Table};

/// Scale factor for benchmark data generation.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// Tiny scale: 50 users. Use for quick tests.
    Tiny,
    /// Small scale: 1,000 users
    Small,
    /// Medium scale: 10,000 users
    Medium,
    /// Large scale: 100,000 users
    Large,
}

impl Scale {
    /// Number of users.
    pub fn users(&self) -> usize {
        match self {
            Scale::Tiny => 50,
            Scale::Small => 1_000,
            Scale::Medium => 10_000,
            Scale::Large => 100_000,
        }
    }

    /// Number of products (liked and reviewed items).
    pub fn products(&self) -> usize {
        (self.users() / 4).max(1)
    }

    /// Average out-degree of follows and friendOf per user.
    pub fn edges_per_user(&self) -> usize {
        match self {
            Scale::Tiny => 2,
            Scale::Small => 3,
            Scale::Medium => 3,
            Scale::Large => 4,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Small
    }
}

/// Generate a two-column table of `rows` random pairs.
///
/// Subjects are drawn from `0..subjects`, objects from `offset..offset + objects`.
pub fn random_pairs(
    rng: &mut StdRng,
    rows: usize,
    subjects: usize,
    objects: usize,
    offset: u64,
) -> Table {
    let mut table = Table::with_capacity(2, rows).expect("width 2 is valid");
    for _ in 0..rows {
        let subject = rng.gen_range(0..subjects as u64);
        let object = offset + rng.gen_range(0..objects as u64);
        table
            .push_row(&[subject, object])
            .expect("row width matches table");
    }
    table
}

/// Generate the four relations the pipeline reads, keyed by `predicates`.
///
/// Users get IDs `0..users`, products `users..users + products`, reviews
/// after that, so keys line up across relations as they would after loading.
pub fn generate_store(scale: Scale, predicates: &PredicateSet) -> RelationStore {
    const SEED: u64 = 12345;
    let mut rng = StdRng::seed_from_u64(SEED);

    let users = scale.users();
    let products = scale.products();
    let edges = users * scale.edges_per_user();
    let product_base = users as u64;
    let review_base = product_base + products as u64;

    let follows = random_pairs(&mut rng, edges, users, users, 0);
    let friend_of = random_pairs(&mut rng, edges, users, users, 0);
    let mut likes = Table::with_capacity(2, users * 2).expect("width 2 is valid");
    for user in 0..users as u64 {
        for _ in 0..rng.gen_range(0..4) {
            let product = product_base + rng.gen_range(0..products as u64);
            likes.push_row(&[user, product]).expect("row width matches table");
        }
    }
    let mut has_review = Table::with_capacity(2, products * 2).expect("width 2 is valid");
    let mut review = review_base;
    for product in product_base..review_base {
        for _ in 0..rng.gen_range(0..3) {
            has_review
                .push_row(&[product, review])
                .expect("row width matches table");
            review += 1;
        }
    }

    let mut store = RelationStore::new();
    for (name, table) in [
        (&predicates.follows, follows),
        (&predicates.friend_of, friend_of),
        (&predicates.likes, likes),
        (&predicates.has_review, has_review),
    ] {
        store.insert(name, table).expect("base relations have width 2");
    }
    store
}

/// Render a store back into the tab-separated triple format.
pub fn to_triple_text(store: &RelationStore) -> String {
    let mut out = String::new();
    for predicate in store.predicates() {
        let Ok(table) = store.get(predicate) else {
            continue;
        };
        for row in table.rows() {
            out.push_str(&format!("node{}\t{}\tnode{} .\n", row[0], predicate, row[1]));
        }
    }
    out
}
